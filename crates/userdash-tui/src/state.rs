//! Application state composition.
//!
//! ```text
//! AppState
//! ├── store: AppStore          (auth + users slices, fed by flow actions)
//! ├── route: Route             (current screen)
//! ├── login: LoginState        (form fields, focus, validation)
//! └── dashboard: DashboardState (page, page size, sort; view-local)
//! ```
//!
//! The TUI owns its copy of the store: flows dispatch actions into the
//! runtime inbox and the reducer applies them here.

use userdash_core::config::Config;
use userdash_core::router::Route;
use userdash_core::store::AppStore;

use crate::dashboard::DashboardState;
use crate::login::LoginState;

pub struct AppState {
    pub store: AppStore,
    pub route: Route,
    pub login: LoginState,
    pub dashboard: DashboardState,
    /// Window requested from the API when the dashboard loads.
    pub fetch_limit: usize,
    /// True until boot-time session validation finishes.
    pub restoring: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: AppStore::default(),
            route: Route::Login,
            login: LoginState::default(),
            dashboard: DashboardState::new(config.page_size),
            fetch_limit: config.fetch_limit,
            restoring: true,
            spinner_frame: 0,
            should_quit: false,
        }
    }
}
