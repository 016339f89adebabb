//! 配置管理
//!
//! 配置文件按扩展名选择格式（yaml / toml / json5），加载前展开 `${VAR}`
//! 环境变量引用。命令行参数在加载后覆盖配置值。

use anyhow::{anyhow, Context, Result};
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::{ExportOptions, ImportOptions};
use crate::store::RedisStoreConfig;

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault, Validate)]
#[serde(default)]
pub struct LogConfig {
    /// 日志级别: trace / debug / info / warn / error
    #[default = "info"]
    #[garde(pattern("^(trace|debug|info|warn|error)$"))]
    pub level: String,

    /// 是否输出事件的 target（模块路径）
    #[default = false]
    #[garde(skip)]
    pub with_target: bool,
}

/// 工具整体配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct PorterConfig {
    /// Redis 连接配置
    pub redis: RedisStoreConfig,

    /// 数据文件路径
    #[default = "data.json"]
    pub file: String,

    /// 导出时的键通配符
    #[default = "*"]
    pub pattern: String,

    /// 导出文件是否格式化
    #[default = true]
    pub pretty: bool,

    /// 导入容器类型时是否替换已有值
    #[default = true]
    pub replace_existing: bool,

    /// 日志配置
    pub log: LogConfig,
}

impl PorterConfig {
    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(&path.as_ref().to_string_lossy());
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&expand_env_vars(&content)?, &path)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// 默认配置文件存在时加载，否则使用默认配置
    pub fn load_default() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// 默认配置路径 (~/.redis-porter/config.yaml)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".redis-porter").join("config.yaml"))
    }

    /// 按扩展名选择解析器，其他扩展名按 JSON5 解析
    fn parse(content: &str, path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(content)?,
            Some("toml") => toml::from_str(content)?,
            _ => json5::from_str(content)?,
        };
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        garde::Validate::validate(&self.log)?;
        if self.file.trim().is_empty() {
            return Err(anyhow!("data file path must not be empty"));
        }
        if self.pattern.is_empty() {
            return Err(anyhow!("key pattern must not be empty"));
        }
        Ok(())
    }

    /// 数据文件路径（展开 `~`）
    pub fn file_path(&self) -> PathBuf {
        expand_path(&self.file)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            pattern: self.pattern.clone(),
            pretty: self.pretty,
        }
    }

    pub fn import_options(&self, flush: bool) -> ImportOptions {
        ImportOptions {
            flush,
            replace_existing: self.replace_existing,
        }
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// 展开 `${VAR_NAME}` 形式的环境变量，未定义的变量保持原样
fn expand_env_vars(content: &str) -> Result<String> {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")?;
    let expanded = re.replace_all(content, |caps: &regex_lite::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}
