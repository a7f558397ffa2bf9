//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and flow spawning only; the reducer never performs
//! I/O directly.

use userdash_core::api::Credentials;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the auth flow with the submitted form values.
    Login { credentials: Credentials },

    /// Run the logout flow.
    Logout,

    /// Dashboard mount: fetch unless the list is already populated, loading
    /// or errored.
    FetchOnMount { limit: usize },

    /// Fetch again from the start regardless of current state.
    Refetch { limit: usize },

    /// Validate the persisted token.
    RestoreSession,

    /// Persist the dashboard page size to config.
    PersistPageSize { page_size: usize },
}
