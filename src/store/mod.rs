pub mod command;
pub mod core;
pub mod memory_store;
pub mod redis_store;

// 重新导出核心类型和 trait
pub use command::{Batch, WriteCommand};
pub use self::core::{Store, StoreError};
// 重新导出具体实现
pub use memory_store::{MemoryStore, MemoryValue};
pub use redis_store::{RedisError, RedisStore, RedisStoreConfig};
