//! Flows: start -> network call -> success/failure.
//!
//! Flows are the only layer that touches the network. They report progress
//! by dispatching store actions, persist the token and drive navigation.
//! Each flow kind keeps a [`RequestTracker`]; a completion that is no longer
//! the latest request for its kind is dropped without side effects.

pub mod auth;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use auth::{LoginOutcome, RestoreOutcome, login, logout, restore_session};
pub use users::{FetchOutcome, fetch_on_mount, fetch_users, refetch};

use crate::api::{ApiError, Backend};
use crate::router::{Navigator, Route};
use crate::storage::Storage;
use crate::store::{Action, Dispatch};

/// Identifies one started request within a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Monotonic request sequence for one flow kind.
///
/// The most recently started request is the only one whose completion is
/// applied.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    current: Arc<AtomicU64>,
}

impl RequestTracker {
    /// Starts a request and makes it current.
    pub fn begin(&self) -> RequestId {
        RequestId(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.current.load(Ordering::SeqCst) == id.0
    }

    /// Makes every outstanding request stale.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a flow needs: backend, dispatcher, navigator, storage.
pub struct FlowContext<B> {
    backend: Arc<B>,
    dispatcher: Arc<dyn Dispatch>,
    navigator: Arc<dyn Navigator>,
    storage: Arc<dyn Storage>,
    auth_requests: RequestTracker,
    users_requests: RequestTracker,
}

impl<B> Clone for FlowContext<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            dispatcher: Arc::clone(&self.dispatcher),
            navigator: Arc::clone(&self.navigator),
            storage: Arc::clone(&self.storage),
            auth_requests: self.auth_requests.clone(),
            users_requests: self.users_requests.clone(),
        }
    }
}

impl<B: Backend> FlowContext<B> {
    pub fn new(
        backend: B,
        dispatcher: Arc<dyn Dispatch>,
        navigator: Arc<dyn Navigator>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            dispatcher,
            navigator,
            storage,
            auth_requests: RequestTracker::default(),
            users_requests: RequestTracker::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    fn dispatch(&self, action: impl Into<Action>) {
        self.dispatcher.dispatch(action.into());
    }

    fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }
}

/// Reduces an API error to the single string shown to the user.
fn display_message(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
