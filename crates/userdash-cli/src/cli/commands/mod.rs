//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod users;

use std::sync::Arc;

use anyhow::Result;
use userdash_core::api::ApiClient;
use userdash_core::config::Config;
use userdash_core::flows::FlowContext;
use userdash_core::router::Router;
use userdash_core::storage::Storage;
use userdash_core::store::Store;

/// Flow context wired to an in-process store and router.
pub(crate) struct Headless {
    pub ctx: FlowContext<ApiClient>,
    pub router: Router,
}

pub(crate) fn headless(config: &Config, storage: Arc<dyn Storage>) -> Result<Headless> {
    let client = ApiClient::from_config(config)?;
    let store = Store::default();
    let router = Router::default();
    let ctx = FlowContext::new(
        client,
        Arc::new(store),
        Arc::new(router.clone()),
        storage,
    );
    Ok(Headless { ctx, router })
}
