//! Routes and navigation.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can move the app to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Default)]
struct RouterInner {
    current: Route,
    history: Vec<Route>,
}

/// Headless router: records the current route and every navigation.
#[derive(Debug, Clone, Default)]
pub struct Router {
    inner: Arc<Mutex<RouterInner>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RouterInner {
                current: initial,
                history: Vec::new(),
            })),
        }
    }

    pub fn current(&self) -> Route {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    /// Routes navigated to, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .clone()
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(from = %inner.current, to = %route, "navigate");
        inner.current = route;
        inner.history.push(route);
    }
}
