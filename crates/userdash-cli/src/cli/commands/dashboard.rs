//! Interactive dashboard (default command).

use std::sync::Arc;

use anyhow::Result;
use userdash_core::config::Config;
use userdash_core::storage::Storage;

pub async fn run(config: &Config, storage: Arc<dyn Storage>) -> Result<()> {
    userdash_tui::run_dashboard(config, storage).await
}
