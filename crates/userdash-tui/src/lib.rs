//! Full-screen TUI for userdash.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;

use anyhow::Result;
pub use features::{dashboard, login};
pub use runtime::TuiRuntime;
use userdash_core::api::ApiClient;
use userdash_core::config::Config;
use userdash_core::storage::Storage;

/// Runs the dashboard until the user quits.
///
/// Validates any persisted token first; the login screen shows while that
/// happens.
pub async fn run_dashboard(config: &Config, storage: Arc<dyn Storage>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `userdash users` for non-interactive output."
        );
    }

    let client = ApiClient::from_config(config)?;
    tracing::info!(base_url = client.base_url(), "starting dashboard");

    let mut runtime = TuiRuntime::new(config, client, storage)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
