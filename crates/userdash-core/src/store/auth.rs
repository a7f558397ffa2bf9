//! Auth slice.

use crate::api::Session;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<Session>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|s| s.token.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess(Session),
    LoginFailure(String),
    Logout,
    /// Dismisses the login error banner.
    ClearError,
}

impl AuthAction {
    pub fn name(&self) -> &'static str {
        match self {
            AuthAction::LoginStart => "auth/loginStart",
            AuthAction::LoginSuccess(_) => "auth/loginSuccess",
            AuthAction::LoginFailure(_) => "auth/loginFailure",
            AuthAction::Logout => "auth/logout",
            AuthAction::ClearError => "auth/clearError",
        }
    }
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::LoginStart => {
            state.is_loading = true;
            state.error = None;
        }
        AuthAction::LoginSuccess(session) => {
            state.user = Some(session);
            state.is_authenticated = true;
            state.is_loading = false;
            state.error = None;
        }
        AuthAction::LoginFailure(message) => {
            state.user = None;
            state.is_authenticated = false;
            state.is_loading = false;
            state.error = Some(message);
        }
        AuthAction::Logout => {
            *state = AuthState::default();
        }
        AuthAction::ClearError => {
            state.error = None;
        }
    }
}
