//! File logging for userdash.
//!
//! The terminal belongs to the UI, so events go to a daily-rolling file under
//! `<home>/logs/` through a non-blocking writer.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{Config, paths};

/// Log file prefix; the appender adds the date suffix.
pub const LOG_FILE_NAME: &str = "userdash.log";

/// Installs the global subscriber writing to `<home>/logs/userdash.log`.
///
/// `RUST_LOG` takes precedence over `config.log_filter`. Keep the returned
/// guard alive for the lifetime of the process; dropping it flushes the
/// writer.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), config)
}

/// Same as [`init`] with an explicit log directory.
pub fn init_in(log_dir: &Path, config: &Config) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_filter(build_filter(config));

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn build_filter(config: &Config) -> EnvFilter {
    let from_env = env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), &config.log_filter)
}

/// First valid of: `RUST_LOG`, the configured filter, `info`.
fn filter_from(from_env: Option<&str>, configured: &str) -> EnvFilter {
    from_env
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
