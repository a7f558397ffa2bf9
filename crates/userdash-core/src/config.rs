//! Configuration management for userdash.
//!
//! Loads configuration from ${USERDASH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Page sizes offered by the dashboard size changer.
pub const PAGE_SIZES: &[usize] = &[10, 20, 50, 100];

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for userdash configuration and data.
    //!
    //! USERDASH_HOME resolution order:
    //! 1. USERDASH_HOME environment variable (if set)
    //! 2. ~/.config/userdash (default)
    //! 3. ./.userdash when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the userdash home directory.
    pub fn home() -> PathBuf {
        if let Ok(home) = std::env::var("USERDASH_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".userdash"),
            |h| h.join(".config").join("userdash"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        home().join("config.toml")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL override.
    pub base_url: Option<String>,

    /// Number of users fetched for the dashboard.
    pub fetch_limit: usize,

    /// Rows per dashboard page.
    pub page_size: usize,

    /// Default tracing filter for the log file.
    pub log_filter: String,
}

impl Config {
    const DEFAULT_FETCH_LIMIT: usize = crate::api::DEFAULT_LIMIT;
    const DEFAULT_PAGE_SIZE: usize = 10;
    const DEFAULT_LOG_FILTER: &str = "info";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Clamps values that would make the dashboard unusable.
    fn normalized(mut self) -> Self {
        if self.fetch_limit == 0 {
            self.fetch_limit = Self::DEFAULT_FETCH_LIMIT;
        }
        if self.page_size == 0 {
            self.page_size = Self::DEFAULT_PAGE_SIZE;
        }
        self
    }

    /// Saves only the page_size field to the config file.
    pub fn save_page_size(page_size: usize) -> Result<()> {
        Self::save_page_size_to(&paths::config_path(), page_size)
    }

    /// Saves only the page_size field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_page_size_to(path: &Path, page_size: usize) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["page_size"] = value(i64::try_from(page_size).unwrap_or(i64::MAX));

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            fetch_limit: Self::DEFAULT_FETCH_LIMIT,
            page_size: Self::DEFAULT_PAGE_SIZE,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
