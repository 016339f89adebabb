use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncConnectionConfig;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::time::Duration;

use super::command::{Batch, WriteCommand};
use super::core::{Store, StoreError};

/// Redis 连接错误
#[derive(thiserror::Error, Debug)]
pub enum RedisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Redis 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct RedisStoreConfig {
    // ===== 连接配置 =====
    #[default = "localhost"]
    pub host: String,

    #[default = 6379]
    pub port: u16,

    // ===== 认证配置 =====
    /// Redis 6.0+ ACL 用户名
    pub username: Option<String>,

    /// 密码
    pub password: Option<String>,

    // ===== 数据库配置 =====
    /// 数据库编号（默认 0）
    #[default = 0]
    pub db: i64,

    /// 连接建立后通过 CLIENT SETNAME 设置的客户端名
    #[default = "redis-porter"]
    pub client_name: String,

    // ===== 超时配置 =====
    /// 连接超时（秒），0 表示不限制
    #[default = 5]
    pub connection_timeout: u64,

    /// 单条命令（含整个导入 pipeline）的响应超时（秒），0 表示不限制
    #[default = 60]
    pub command_timeout: u64,
}

impl RedisStoreConfig {
    /// host:port 形式的地址
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 构建连接 URL，用户名和密码经过 URL 编码
    pub fn connection_url(&self) -> String {
        match &self.password {
            Some(password) => {
                let username = self.username.as_deref().unwrap_or("default");
                format!(
                    "redis://{}:{}@{}/{}",
                    urlencoding::encode(username),
                    urlencoding::encode(password),
                    self.endpoint(),
                    self.db
                )
            }
            None => format!("redis://{}/{}", self.endpoint(), self.db),
        }
    }

    /// 异步连接参数，覆盖 redis crate 默认的 1s 连接 / 500ms 响应超时
    pub fn async_connection_config(&self) -> AsyncConnectionConfig {
        AsyncConnectionConfig::new()
            .set_connection_timeout(seconds(self.connection_timeout))
            .set_response_timeout(seconds(self.command_timeout))
    }
}

fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

/// 基于 redis crate 的存储实现
///
/// 持有一条多路复用连接，所有操作在同一连接上顺序执行。
///
/// # 示例
/// ```ignore
/// use redis_porter::store::{RedisStore, RedisStoreConfig};
///
/// let config = RedisStoreConfig {
///     host: "localhost".to_string(),
///     password: Some("secret".to_string()),
///     db: 2,
///     ..Default::default()
/// };
/// let mut store = RedisStore::connect(config).await?;
/// let size = store.dbsize().await?;
/// ```
pub struct RedisStore {
    con: MultiplexedConnection,
    config: RedisStoreConfig,
}

impl RedisStore {
    /// 建立连接并校验可用性
    pub async fn connect(config: RedisStoreConfig) -> Result<Self, RedisError> {
        // 1. 验证配置
        if config.host.is_empty() {
            return Err(RedisError::InvalidConfig("host must be set".to_string()));
        }
        if config.db < 0 {
            return Err(RedisError::InvalidConfig(format!(
                "database index must not be negative: {}",
                config.db
            )));
        }

        // 2. 创建客户端
        let client = redis::Client::open(config.connection_url())
            .map_err(|e| RedisError::InvalidConfig(format!("Invalid connection URL: {}", e)))?;

        // 3. 建立连接（超时由连接参数控制）
        let mut con = client
            .get_multiplexed_async_connection_with_config(&config.async_connection_config())
            .await
            .map_err(|e| {
                RedisError::ConnectionFailed(format!(
                    "cannot connect to {}: {}",
                    config.endpoint(),
                    e
                ))
            })?;

        // 4. 测试连接
        let _: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .map_err(|e| RedisError::ConnectionFailed(format!("PING failed: {}", e)))?;

        if !config.client_name.is_empty() {
            let _: () = redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(&config.client_name)
                .query_async(&mut con)
                .await
                .map_err(|e| RedisError::ConnectionFailed(format!("CLIENT SETNAME failed: {}", e)))?;
        }

        Ok(Self { con, config })
    }

    pub fn config(&self) -> &RedisStoreConfig {
        &self.config
    }

    /// 把批次中的命令追加到 pipeline，回复全部忽略
    fn build_pipeline(batch: &Batch) -> redis::Pipeline {
        let mut pipe = redis::pipe();
        for command in batch.commands() {
            match command {
                WriteCommand::Set { key, value } => {
                    pipe.cmd("SET").arg(key).arg(value);
                }
                WriteCommand::Del { key } => {
                    pipe.cmd("DEL").arg(key);
                }
                WriteCommand::RPush { key, values } => {
                    pipe.cmd("RPUSH").arg(key).arg(values);
                }
                WriteCommand::SAdd { key, members } => {
                    pipe.cmd("SADD").arg(key).arg(members);
                }
                WriteCommand::ZAdd { key, members } => {
                    pipe.cmd("ZADD").arg(key);
                    for (member, score) in members {
                        pipe.arg(*score).arg(member);
                    }
                }
                WriteCommand::HSet { key, fields } => {
                    pipe.cmd("HSET").arg(key);
                    for (field, value) in fields {
                        pipe.arg(field).arg(value);
                    }
                }
                WriteCommand::Expire { key, seconds } => {
                    pipe.cmd("EXPIRE").arg(key).arg(*seconds);
                }
            }
            pipe.ignore();
        }
        pipe
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError> {
        Ok(redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.con)
            .await?)
    }

    async fn key_type(&mut self, key: &str) -> Result<String, StoreError> {
        Ok(redis::cmd("TYPE").arg(key).query_async(&mut self.con).await?)
    }

    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError> {
        Ok(redis::cmd("TTL").arg(key).query_async(&mut self.con).await?)
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(redis::cmd("GET").arg(key).query_async(&mut self.con).await?)
    }

    async fn llen(&mut self, key: &str) -> Result<usize, StoreError> {
        Ok(redis::cmd("LLEN").arg(key).query_async(&mut self.con).await?)
    }

    async fn lrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StoreError> {
        Ok(redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query_async(&mut self.con)
            .await?)
    }

    async fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(redis::cmd("SMEMBERS")
            .arg(key)
            .query_async(&mut self.con)
            .await?)
    }

    async fn zrange_by_score_with_scores(
        &mut self,
        key: &str,
    ) -> Result<Vec<(String, f64)>, StoreError> {
        Ok(redis::cmd("ZRANGEBYSCORE")
            .arg(key)
            .arg("-inf")
            .arg("+inf")
            .arg("WITHSCORES")
            .query_async(&mut self.con)
            .await?)
    }

    async fn hgetall(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        Ok(redis::cmd("HGETALL")
            .arg(key)
            .query_async(&mut self.con)
            .await?)
    }

    async fn dbsize(&mut self) -> Result<u64, StoreError> {
        Ok(redis::cmd("DBSIZE").query_async(&mut self.con).await?)
    }

    async fn flushdb(&mut self) -> Result<(), StoreError> {
        let _: () = redis::cmd("FLUSHDB").query_async(&mut self.con).await?;
        Ok(())
    }

    async fn execute(&mut self, batch: Batch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let pipe = Self::build_pipeline(&batch);
        let _: () = pipe.query_async(&mut self.con).await?;
        Ok(())
    }
}
