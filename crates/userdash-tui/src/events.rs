//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! ticks, and results sent back by flows through the runtime inbox.

use crossterm::event::Event;
use userdash_core::router::Route;
use userdash_core::store::Action;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Animation tick (spinner).
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// A store action dispatched by a flow.
    Store(Action),

    /// A flow asked for a route change.
    Navigate(Route),

    /// Boot-time session validation finished.
    ///
    /// Carries a notice for the login screen when the server could not be
    /// reached.
    RestoreFinished { notice: Option<String> },
}
