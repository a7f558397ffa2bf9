//! Login, logout and whoami handlers.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use userdash_core::api::Credentials;
use userdash_core::config::Config;
use userdash_core::flows::{self, LoginOutcome, RestoreOutcome};
use userdash_core::storage::Storage;

use super::headless;

pub async fn login(
    config: &Config,
    storage: Arc<dyn Storage>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        anyhow::bail!("Username is required");
    }

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }

    let h = headless(config, storage)?;
    let outcome = flows::login(&h.ctx, Credentials::new(username, password)).await;
    debug!(route = %h.router.current(), "login finished");

    match outcome {
        LoginOutcome::Authenticated(session) => {
            println!("Logged in as {}", session.username);
            Ok(())
        }
        LoginOutcome::Failed(message) => anyhow::bail!("{message}"),
        LoginOutcome::Superseded => anyhow::bail!("Login was interrupted"),
    }
}

pub fn logout(config: &Config, storage: Arc<dyn Storage>) -> Result<()> {
    let h = headless(config, storage)?;
    if flows::logout(&h.ctx) {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn whoami(config: &Config, storage: Arc<dyn Storage>) -> Result<()> {
    let h = headless(config, storage)?;

    match flows::restore_session(&h.ctx).await? {
        RestoreOutcome::Restored(session) => {
            println!("Name:     {}", session.full_name());
            println!("Username: @{}", session.username);
            println!("Email:    {}", session.email);
            println!("Gender:   {}", session.gender);
            Ok(())
        }
        RestoreOutcome::NoToken => {
            anyhow::bail!("Not logged in. Run `userdash login --username <name>` first.")
        }
        RestoreOutcome::Rejected(message) => {
            anyhow::bail!("Session expired ({message}). Please log in again.")
        }
        RestoreOutcome::Unreachable(message) => {
            anyhow::bail!("Could not validate session: {message}")
        }
        RestoreOutcome::Superseded => anyhow::bail!("Session check was interrupted"),
    }
}

/// Reads the password from stdin, prompting when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
