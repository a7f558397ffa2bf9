//! Headless user listing.

use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use userdash_core::api::UserRecord;
use userdash_core::config::Config;
use userdash_core::flows::{self, FetchOutcome};
use userdash_core::storage::Storage;

use super::headless;

pub async fn list(
    config: &Config,
    storage: Arc<dyn Storage>,
    limit: usize,
    skip: usize,
    json: bool,
) -> Result<()> {
    let h = headless(config, storage)?;

    let page = match flows::fetch_users(&h.ctx, limit, skip).await {
        FetchOutcome::Loaded(page) => page,
        FetchOutcome::Failed(message) => anyhow::bail!("{message}"),
        FetchOutcome::Skipped | FetchOutcome::Superseded => {
            anyhow::bail!("Fetch did not complete")
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&page.users).context("serialize users")?;
        println!("{out}");
        return Ok(());
    }

    if page.users.is_empty() {
        println!("No users found (total {}).", page.total);
        return Ok(());
    }

    println!("{}", render_table(&page.users));
    println!("Showing {} of {} users", page.users.len(), page.total);
    Ok(())
}

fn render_table(users: &[UserRecord]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "First Name", "Last Name", "Age", "Email"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            user.first_name.clone(),
            user.last_name.clone(),
            user.age.to_string(),
            user.email.clone(),
        ]);
    }
    table
}
