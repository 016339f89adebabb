// CLI argument definitions using clap

use clap::{ArgAction, Parser};
use redis_porter::PorterConfig;

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Export,
    Import,
}

#[derive(Parser, Debug)]
#[command(name = "redis-porter")]
#[command(author = "hatlonely <hatlonely@foxmail.com>")]
#[command(version = "0.1.0")]
#[command(about = "Export a Redis database to a JSON file, or import it back", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.redis-porter/config.yaml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Redis host
    #[arg(long)]
    pub host: Option<String>,

    /// Redis port
    #[arg(long)]
    pub port: Option<u16>,

    /// Redis ACL username
    #[arg(long)]
    pub username: Option<String>,

    /// Redis password
    #[arg(long)]
    pub password: Option<String>,

    /// Database index
    #[arg(long)]
    pub index: Option<i64>,

    /// Export when true, import when false
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub export: bool,

    /// Data file path (default: data.json)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Confirm an import, which writes into the database
    #[arg(long)]
    pub confirm: bool,

    /// Flush the database before importing
    #[arg(long)]
    pub flush: bool,

    /// Key pattern to export (default: *)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.export {
            Mode::Export
        } else {
            Mode::Import
        }
    }

    /// Override config values with the flags that were given
    pub fn apply(&self, config: &mut PorterConfig) {
        if let Some(host) = &self.host {
            config.redis.host = host.clone();
        }
        if let Some(port) = self.port {
            config.redis.port = port;
        }
        if let Some(username) = &self.username {
            config.redis.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.redis.password = Some(password.clone());
        }
        if let Some(index) = self.index {
            config.redis.db = index;
        }
        if let Some(file) = &self.file {
            config.file = file.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}
