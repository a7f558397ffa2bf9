//! Login form reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use userdash_core::store::{Action, AuthAction, AuthState};

use super::state::LoginState;
use crate::effects::UiEffect;

/// Handles a key on the login screen.
///
/// Returns effects for the runtime and store actions for the reducer to
/// apply; the auth slice is only read here.
pub fn handle_key(
    login: &mut LoginState,
    auth_state: &AuthState,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<Action>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc if auth_state.error.is_some() => {
            (vec![], vec![Action::Auth(AuthAction::ClearError)])
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            login.focus = login.focus.toggle();
            (vec![], vec![])
        }
        KeyCode::Enter if !auth_state.is_loading => match login.validate() {
            Some(credentials) => (vec![UiEffect::Login { credentials }], vec![]),
            None => (vec![], vec![]),
        },
        // Fields are read-only while a login is in flight.
        _ if auth_state.is_loading => (vec![], vec![]),
        KeyCode::Char('u') if ctrl => {
            login.focused_mut().clear();
            (vec![], vec![])
        }
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            login.focused_mut().push(c);
            login.revalidate_focused();
            (vec![], vec![])
        }
        KeyCode::Backspace => {
            login.focused_mut().pop();
            (vec![], vec![])
        }
        _ => (vec![], vec![]),
    }
}

/// Inserts pasted text (first line only) into the focused field.
pub fn handle_paste(login: &mut LoginState, auth_state: &AuthState, text: &str) {
    if auth_state.is_loading {
        return;
    }
    let line = text.lines().next().unwrap_or_default();
    login.focused_mut().push_str(line);
    login.revalidate_focused();
}
