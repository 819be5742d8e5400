//! Backlog link host
//!
//! Command-line host for the Backlog project link: binds configuration
//! forms to jobs, stores them and renders their link actions.

use anyhow::{Context, Result};
use backlog_core::storage::{
    init_config_dir, init_data_dir, ConfigStorage, KeyringSecretStore, PropertyStorage,
};
use backlog_core::{Config, ConfigOverrides, Locale};
use clap::Parser;
use std::path::PathBuf;

mod commands;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "backlog-link")]
#[command(about = "Link build jobs to Backlog spaces and projects", long_about = None)]
struct Args {
    /// Log level: error, warn, info, debug or trace (overrides the config file)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Data directory holding stored job properties
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Message locale (en, ja)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn setup_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = ConfigOverrides {
        log_level: args.log_level.clone(),
        locale: args.locale.as_deref().map(str::parse::<Locale>).transpose()?,
    };

    let config_dir = init_config_dir().context("Failed to create config directory")?;
    let config = ConfigStorage::new(config_dir)
        .load_with(overrides)
        .context("Invalid configuration")?;

    setup_logging(&config.log_level);

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => init_data_dir().context("Failed to create data directory")?,
    };
    tracing::debug!("Using data directory {}", data_dir.display());

    let storage = open_storage(&config, data_dir);
    commands::run(args.command, &storage, config.locale)
}

fn open_storage(config: &Config, data_dir: PathBuf) -> PropertyStorage {
    let secrets = KeyringSecretStore::new(config.keyring_service.clone());
    PropertyStorage::new(data_dir, Box::new(secrets))
}
