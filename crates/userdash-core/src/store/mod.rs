//! Process-wide state container.
//!
//! Two slices (auth, users), each with its own action type and pure reducer.
//! Flows only dispatch actions; views only read snapshots.

pub mod auth;
pub mod users;

use std::sync::{Arc, Mutex, PoisonError};

pub use auth::{AuthAction, AuthState};
use tracing::debug;
pub use users::{UsersAction, UsersState};

/// Root state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStore {
    pub auth: AuthState,
    pub users: UsersState,
}

/// Any action the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Auth(AuthAction),
    Users(UsersAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Auth(a) => a.name(),
            Action::Users(a) => a.name(),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<UsersAction> for Action {
    fn from(action: UsersAction) -> Self {
        Action::Users(action)
    }
}

impl AppStore {
    /// Routes an action to its slice reducer.
    pub fn reduce(&mut self, action: Action) {
        debug!(action = action.name(), "dispatch");
        match action {
            Action::Auth(a) => auth::reduce(&mut self.auth, a),
            Action::Users(a) => users::reduce(&mut self.users, a),
        }
    }
}

/// Sink for actions.
///
/// Implemented by [`Store`] for headless use and by the terminal UI, which
/// forwards actions into its event loop.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

/// Shared handle to an [`AppStore`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppStore>>,
}

impl Store {
    pub fn new(initial: AppStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> AppStore {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Dispatch for Store {
    fn dispatch(&self, action: Action) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reduce(action);
    }
}
