use async_trait::async_trait;
use thiserror::Error;

use super::command::Batch;

/// 存储访问错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// 连接层失败（IO 错误、连接断开、超时）
    #[error("Connection failed: {0}")]
    Connection(String),
    /// 命令执行失败（如 WRONGTYPE）
    #[error("Command failed: {0}")]
    Command(String),
}

impl StoreError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_dropped() || err.is_timeout() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

/// 导出/导入所需的存储操作集合
///
/// 读操作按 Redis 命令语义定义；写操作统一通过 [`Batch`] 延迟提交，
/// 由 `execute` 一次性发送。
#[async_trait]
pub trait Store: Send {
    /// 按通配符枚举当前库中的键（KEYS）
    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// 查询键的类型标签（TYPE），不存在的键返回 "none"
    async fn key_type(&mut self, key: &str) -> Result<String, StoreError>;

    /// 剩余存活秒数（TTL）：-1 表示无过期，-2 表示键不存在
    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError>;

    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;

    async fn llen(&mut self, key: &str) -> Result<usize, StoreError>;

    /// 闭区间读取列表元素（LRANGE），支持负数下标
    async fn lrange(&mut self, key: &str, start: i64, stop: i64)
        -> Result<Vec<String>, StoreError>;

    async fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError>;

    /// 全分值区间读取有序集合成员及分值（ZRANGEBYSCORE -inf +inf WITHSCORES）
    async fn zrange_by_score_with_scores(
        &mut self,
        key: &str,
    ) -> Result<Vec<(String, f64)>, StoreError>;

    async fn hgetall(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError>;

    /// 当前库的键数量（DBSIZE）
    async fn dbsize(&mut self) -> Result<u64, StoreError>;

    /// 清空当前库（FLUSHDB）
    async fn flushdb(&mut self) -> Result<(), StoreError>;

    /// 一次性提交批量写命令，无回滚
    async fn execute(&mut self, batch: Batch) -> Result<(), StoreError>;
}
