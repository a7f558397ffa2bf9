//! Dashboard key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use userdash_core::store::{Action, UsersAction, UsersState};

use super::state::DashboardState;
use crate::effects::UiEffect;

/// Handles a key on the dashboard.
///
/// Sort and pagination are view-local and change `dash` directly; anything
/// touching the users slice comes back as an action.
pub fn handle_key(
    dash: &mut DashboardState,
    users: &UsersState,
    fetch_limit: usize,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<Action>) {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return (vec![], vec![]);
    }

    let rows = users.users.len();
    match key.code {
        KeyCode::Esc if users.error.is_some() => {
            (vec![], vec![Action::Users(UsersAction::ClearError)])
        }
        KeyCode::Char('q') => (vec![UiEffect::Quit], vec![]),
        KeyCode::Char('l') => (vec![UiEffect::Logout], vec![]),
        KeyCode::Char('r') => (vec![UiEffect::Refetch { limit: fetch_limit }], vec![]),
        KeyCode::Char('s') => {
            dash.sort.cycle_column();
            (vec![], vec![])
        }
        KeyCode::Char('o') => {
            dash.sort.flip_order();
            (vec![], vec![])
        }
        KeyCode::Char('p') => {
            let page_size = dash.cycle_page_size(rows);
            (vec![UiEffect::PersistPageSize { page_size }], vec![])
        }
        KeyCode::Right | KeyCode::PageDown => {
            dash.next_page(rows);
            (vec![], vec![])
        }
        KeyCode::Left | KeyCode::PageUp => {
            dash.prev_page();
            (vec![], vec![])
        }
        KeyCode::Home => {
            dash.page = 0;
            (vec![], vec![])
        }
        KeyCode::End => {
            dash.last_page(rows);
            (vec![], vec![])
        }
        _ => (vec![], vec![]),
    }
}
