//! Dashboard screen: current user card, users table, sort and pagination.

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{COLUMNS, DashboardState, SortColumn, SortOrder, SortState};
pub use update::handle_key;
