//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use userdash_core::api::DEFAULT_LIMIT;
use userdash_core::config::Config;
use userdash_core::logging;
use userdash_core::storage::{FileStorage, MemoryStorage, Storage};

mod commands;

#[derive(Parser)]
#[command(name = "userdash")]
#[command(version)]
#[command(about = "Log in to the demo users API and browse its users")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Keep the session in memory only (nothing is read from or written to disk)
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and persist the session token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Remove the persisted session token
    Logout,
    /// Print one window of users as a table
    Users {
        /// Number of users to request
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Number of users to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the persisted token and print the logged-in user
    Whoami,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let Cli { command, ephemeral } = cli;
    let storage: Arc<dyn Storage> = if ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::open_default())
    };

    // default to the dashboard
    let Some(command) = command else {
        return commands::dashboard::run(&config, storage).await;
    };

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&config, storage, &username, password).await
        }
        Commands::Logout => commands::auth::logout(&config, storage),
        Commands::Users { limit, skip, json } => {
            commands::users::list(&config, storage, limit, skip, json).await
        }
        Commands::Whoami => commands::auth::whoami(&config, storage).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
