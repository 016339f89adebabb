//! 日志初始化
//!
//! 基于 tracing_subscriber：`RUST_LOG` 环境变量优先，未设置时使用配置中的级别。
//! 日志输出到 stderr，stdout 留给运行结果汇总。

use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

impl LogConfig {
    /// 获取日志级别对应的 Level，无法识别时为 INFO
    pub fn tracing_level(&self) -> Level {
        Level::from_str(self.level.to_lowercase().as_str()).unwrap_or(Level::INFO)
    }

    /// 构建过滤器，`RUST_LOG` 优先
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.tracing_level().as_str().to_lowercase()))
    }
}

/// 初始化全局 tracing subscriber，重复初始化返回错误
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .with_level(true);

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
