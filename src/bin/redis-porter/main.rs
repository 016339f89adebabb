// redis-porter - export a Redis database to JSON, or import it back

mod cli;
mod commands;
mod data_file;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cli::{Cli, Mode};
use commands::{execute_export, execute_import};
use redis_porter::{init_logging, PorterConfig, RedisStore, RedisStoreConfig};

fn connecting_message(config: &RedisStoreConfig) -> String {
    format!(
        "Connecting to {} and selecting database at index {}",
        config.endpoint(),
        config.db
    )
}

/// Load configuration from the given file, or the default one if present
fn load_config(path: Option<&str>) -> Result<PorterConfig> {
    match path {
        Some(path) => PorterConfig::load(path),
        None => PorterConfig::load_default(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging(&config.log)?;

    let mode = cli.mode();
    let path = config.file_path();
    data_file::validate(&path, mode)?;

    if mode == Mode::Import && !cli.confirm {
        eprintln!(
            "WARNING: importing writes into database {} on {}{}.",
            config.redis.db,
            config.redis.endpoint(),
            if cli.flush {
                " and flushes it first"
            } else {
                ""
            }
        );
        eprintln!("Re-run with --confirm to proceed.");
        return Ok(());
    }

    info!("{}", connecting_message(&config.redis));
    let mut store = RedisStore::connect(config.redis.clone())
        .await
        .with_context(|| format!("Failed to connect to {}", config.redis.endpoint()))?;
    info!("Successfully connected!");

    match mode {
        Mode::Export => execute_export(&mut store, &path, &config).await?,
        Mode::Import => execute_import(&mut store, &path, &config, cli.flush).await?,
    }

    Ok(())
}
