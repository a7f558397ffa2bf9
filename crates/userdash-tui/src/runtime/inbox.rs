//! Inbox channel and the adapters flows use to reach the UI.
//!
//! Flows dispatch actions and navigate through these adapters; both end up
//! as `UiEvent`s the runtime drains each frame, so the reducer stays the
//! only place state changes.

use tokio::sync::mpsc;
use userdash_core::router::{Navigator, Route};
use userdash_core::store::{Action, Dispatch};

use crate::events::UiEvent;

/// Sender for the runtime's event inbox.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver for the runtime's event inbox.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Forwards store actions into the inbox.
#[derive(Debug, Clone)]
pub struct InboxDispatcher {
    tx: UiEventSender,
}

impl InboxDispatcher {
    pub fn new(tx: UiEventSender) -> Self {
        Self { tx }
    }
}

impl Dispatch for InboxDispatcher {
    fn dispatch(&self, action: Action) {
        // Closed inbox means the UI is shutting down.
        let _ = self.tx.send(UiEvent::Store(action));
    }
}

/// Forwards navigation into the inbox.
#[derive(Debug, Clone)]
pub struct InboxNavigator {
    tx: UiEventSender,
}

impl InboxNavigator {
    pub fn new(tx: UiEventSender) -> Self {
        Self { tx }
    }
}

impl Navigator for InboxNavigator {
    fn navigate(&self, route: Route) {
        let _ = self.tx.send(UiEvent::Navigate(route));
    }
}

#[cfg(test)]
mod tests {
    use userdash_core::store::{AuthAction, UsersAction};

    use super::*;

    #[test]
    fn test_adapters_preserve_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = InboxDispatcher::new(tx.clone());
        let navigator = InboxNavigator::new(tx);

        dispatcher.dispatch(Action::Auth(AuthAction::LoginStart));
        dispatcher.dispatch(Action::Users(UsersAction::FetchStart));
        navigator.navigate(Route::Dashboard);

        assert!(matches!(
            rx.try_recv().unwrap(),
            UiEvent::Store(Action::Auth(AuthAction::LoginStart))
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            UiEvent::Store(Action::Users(UsersAction::FetchStart))
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            UiEvent::Navigate(Route::Dashboard)
        ));
    }

    #[test]
    fn test_send_after_close_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        InboxDispatcher::new(tx).dispatch(Action::Auth(AuthAction::Logout));
    }
}
