//! Users slice.

use crate::api::UserRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<UserRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Server-reported collection size; may exceed `users.len()`.
    pub total: usize,
}

impl UsersState {
    /// Whether opening the dashboard should start a fetch.
    ///
    /// Only an empty, idle, error-free list qualifies. A failed fetch is not
    /// retried automatically.
    pub fn needs_initial_fetch(&self) -> bool {
        self.users.is_empty() && !self.is_loading && self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersAction {
    FetchStart,
    FetchSuccess { users: Vec<UserRecord>, total: usize },
    FetchFailure(String),
    /// Dismisses the fetch error banner. Fetched rows are kept.
    ClearError,
}

impl UsersAction {
    pub fn name(&self) -> &'static str {
        match self {
            UsersAction::FetchStart => "users/fetchStart",
            UsersAction::FetchSuccess { .. } => "users/fetchSuccess",
            UsersAction::FetchFailure(_) => "users/fetchFailure",
            UsersAction::ClearError => "users/clearError",
        }
    }
}

pub fn reduce(state: &mut UsersState, action: UsersAction) {
    match action {
        UsersAction::FetchStart => {
            state.is_loading = true;
            state.error = None;
        }
        UsersAction::FetchSuccess { users, total } => {
            state.is_loading = false;
            state.users = users;
            state.total = total;
        }
        UsersAction::FetchFailure(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        UsersAction::ClearError => {
            state.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, first: &str) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: String::new(),
            username: String::new(),
            phone: String::new(),
            image: String::new(),
            age: 30,
            gender: String::new(),
        }
    }

    #[test]
    fn test_needs_initial_fetch() {
        let mut state = UsersState::default();
        assert!(state.needs_initial_fetch());

        reduce(&mut state, UsersAction::FetchStart);
        assert!(!state.needs_initial_fetch());

        reduce(&mut state, UsersAction::FetchFailure("boom".to_string()));
        assert!(!state.needs_initial_fetch());

        let populated = UsersState {
            users: vec![record(1, "Emily")],
            total: 1,
            ..UsersState::default()
        };
        assert!(!populated.needs_initial_fetch());
    }

    #[test]
    fn test_fetch_success_replaces_users() {
        let mut state = UsersState {
            users: vec![record(9, "Old")],
            total: 1,
            ..UsersState::default()
        };
        reduce(&mut state, UsersAction::FetchStart);
        reduce(
            &mut state,
            UsersAction::FetchSuccess {
                users: vec![record(1, "Emily"), record(2, "Michael")],
                total: 208,
            },
        );

        assert!(!state.is_loading);
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[0].first_name, "Emily");
        assert_eq!(state.total, 208);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_users() {
        let mut state = UsersState {
            users: vec![record(1, "Emily")],
            total: 1,
            ..UsersState::default()
        };
        reduce(&mut state, UsersAction::FetchStart);
        reduce(&mut state, UsersAction::FetchFailure("HTTP 503".to_string()));

        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("HTTP 503"));
        assert_eq!(state.users.len(), 1);
    }

    #[test]
    fn test_fetch_start_clears_error() {
        let mut state = UsersState::default();
        reduce(&mut state, UsersAction::FetchFailure("boom".to_string()));
        reduce(&mut state, UsersAction::FetchStart);
        assert!(state.error.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_clear_error_keeps_rows() {
        let mut state = UsersState {
            users: vec![record(1, "Emily")],
            total: 1,
            ..UsersState::default()
        };
        reduce(&mut state, UsersAction::FetchFailure("HTTP 503".to_string()));
        reduce(&mut state, UsersAction::ClearError);

        assert!(state.error.is_none());
        assert!(!state.is_loading);
        assert_eq!(state.users.len(), 1);
        assert_eq!(UsersAction::ClearError.name(), "users/clearError");
    }
}
