//! Fetch flow: Idle -> Loading -> {Loaded, Failed}.

use tracing::{debug, info, warn};

use super::{FlowContext, display_message};
use crate::api::{Backend, UsersPage};
use crate::store::{UsersAction, UsersState};

/// Shown when a fetch error carries no message.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch users. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(UsersPage),
    Failed(String),
    /// The mount guard decided no fetch was needed.
    Skipped,
    /// A newer fetch started before this one resolved.
    Superseded,
}

/// Fetches one window of users and replaces the list in the store.
pub async fn fetch_users<B: Backend>(
    ctx: &FlowContext<B>,
    limit: usize,
    skip: usize,
) -> FetchOutcome {
    let id = ctx.users_requests.begin();
    debug!(limit, skip, request = id.0, "fetch users started");
    ctx.dispatch(UsersAction::FetchStart);

    let result = ctx.backend.list_users(limit, skip).await;

    if !ctx.users_requests.is_current(id) {
        debug!(request = id.0, "fetch superseded; dropping result");
        return FetchOutcome::Superseded;
    }

    match result {
        Ok(page) => {
            info!(count = page.users.len(), total = page.total, "users loaded");
            ctx.dispatch(UsersAction::FetchSuccess {
                users: page.users.clone(),
                total: page.total,
            });
            FetchOutcome::Loaded(page)
        }
        Err(err) => {
            warn!(kind = %err.kind, error = %err, "fetch users failed");
            let message = display_message(&err, FETCH_FALLBACK_MESSAGE);
            ctx.dispatch(UsersAction::FetchFailure(message.clone()));
            FetchOutcome::Failed(message)
        }
    }
}

/// Dashboard mount hook: fetches only when the list is empty and idle.
pub async fn fetch_on_mount<B: Backend>(
    ctx: &FlowContext<B>,
    state: &UsersState,
    limit: usize,
) -> FetchOutcome {
    if !state.needs_initial_fetch() {
        debug!(
            count = state.users.len(),
            loading = state.is_loading,
            errored = state.error.is_some(),
            "skipping mount fetch"
        );
        return FetchOutcome::Skipped;
    }
    fetch_users(ctx, limit, 0).await
}

/// Fetches again regardless of current state.
pub async fn refetch<B: Backend>(ctx: &FlowContext<B>, limit: usize) -> FetchOutcome {
    fetch_users(ctx, limit, 0).await
}
