//! Auth flow: Idle -> Authenticating -> {Authenticated, Failed}.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::{FlowContext, display_message};
use crate::api::{ApiErrorKind, Backend, Credentials, Session};
use crate::router::Route;
use crate::storage::TOKEN_KEY;
use crate::store::AuthAction;

/// Shown when a login error carries no message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Session),
    Failed(String),
    /// A newer login (or a logout) started before this one resolved.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The persisted token is valid; the session is back in the store.
    Restored(Session),
    /// Nothing persisted.
    NoToken,
    /// The server rejected the token; it has been removed.
    Rejected(String),
    /// The server could not be reached; the token is kept.
    Unreachable(String),
    Superseded,
}

/// Logs in with `credentials`.
///
/// On success the session is stored, the token persisted and the app
/// navigates to the dashboard. On failure only the error is stored.
pub async fn login<B: Backend>(ctx: &FlowContext<B>, credentials: Credentials) -> LoginOutcome {
    let id = ctx.auth_requests.begin();
    info!(username = %credentials.username, request = id.0, "login started");
    ctx.dispatch(AuthAction::LoginStart);

    let result = ctx.backend.authenticate(&credentials).await;
    drop(credentials);

    if !ctx.auth_requests.is_current(id) {
        debug!(request = id.0, "login superseded; dropping result");
        return LoginOutcome::Superseded;
    }

    match result {
        Ok(session) => {
            info!(username = %session.username, "login succeeded");
            ctx.dispatch(AuthAction::LoginSuccess(session.clone()));
            if let Err(e) = ctx.storage.set_item(TOKEN_KEY, &session.token) {
                warn!(error = %format!("{e:#}"), "failed to persist token");
            }
            ctx.navigate(Route::Dashboard);
            LoginOutcome::Authenticated(session)
        }
        Err(err) => {
            warn!(kind = %err.kind, error = %err, "login failed");
            let message = display_message(&err, LOGIN_FALLBACK_MESSAGE);
            ctx.dispatch(AuthAction::LoginFailure(message.clone()));
            LoginOutcome::Failed(message)
        }
    }
}

/// Clears the session, removes the persisted token and returns to login.
///
/// Any login still in flight is dropped when it resolves. Returns whether a
/// token was persisted.
pub fn logout<B: Backend>(ctx: &FlowContext<B>) -> bool {
    ctx.auth_requests.invalidate();
    ctx.dispatch(AuthAction::Logout);

    let removed = match ctx.storage.remove_item(TOKEN_KEY) {
        Ok(removed) => removed,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "failed to remove persisted token");
            false
        }
    };

    info!(had_token = removed, "logged out");
    ctx.navigate(Route::Login);
    removed
}

/// Validates a persisted token and rebuilds the session from it.
///
/// Errors only when durable storage cannot be read.
pub async fn restore_session<B: Backend>(ctx: &FlowContext<B>) -> Result<RestoreOutcome> {
    let token = ctx
        .storage
        .get_item(TOKEN_KEY)
        .context("Failed to read persisted token")?
        .filter(|t| !t.trim().is_empty());

    let Some(token) = token else {
        debug!("no persisted token");
        ctx.navigate(Route::Login);
        return Ok(RestoreOutcome::NoToken);
    };

    let id = ctx.auth_requests.begin();
    debug!(request = id.0, "validating persisted token");
    let result = ctx.backend.current_user(&token).await;

    if !ctx.auth_requests.is_current(id) {
        debug!(request = id.0, "restore superseded; dropping result");
        return Ok(RestoreOutcome::Superseded);
    }

    let outcome = match result {
        Ok(session) => {
            info!(username = %session.username, "session restored");
            ctx.dispatch(AuthAction::LoginSuccess(session.clone()));
            ctx.navigate(Route::Dashboard);
            RestoreOutcome::Restored(session)
        }
        Err(err) if matches!(err.kind, ApiErrorKind::Auth | ApiErrorKind::HttpStatus) => {
            warn!(error = %err, "persisted token rejected");
            ctx.storage
                .remove_item(TOKEN_KEY)
                .context("Failed to remove rejected token")?;
            ctx.dispatch(AuthAction::Logout);
            ctx.navigate(Route::Login);
            RestoreOutcome::Rejected(err.to_string())
        }
        Err(err) => {
            warn!(kind = %err.kind, error = %err, "could not validate persisted token");
            ctx.navigate(Route::Login);
            RestoreOutcome::Unreachable(err.to_string())
        }
    };
    Ok(outcome)
}
