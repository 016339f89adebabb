//! redis-porter - Redis 数据库导出/导入工具
//!
//! 把一个 Redis 逻辑库的键值（含 TTL）导出为 JSON 文档，或把 JSON 文档导入回库中。
//!
//! ## 模块
//!
//! - **store**: 存储抽象（Redis 实现与内存实现）
//! - **codec**: 按值类型在存储表示与 JSON 表示之间转换
//! - **dataset**: 导出文件的文档模型
//! - **pipeline**: 导出/导入流水线与运行报告
//! - **config**: 配置文件加载
//! - **logging**: 日志初始化
//!
//! ## 文件格式
//!
//! ```json
//! {
//!   "greeting": {"type": "string", "ttl": 120, "data": ["hello"]},
//!   "queue":    {"type": "list",   "ttl": -1,  "data": ["x", "y", "z"]},
//!   "scores":   {"type": "zset",   "ttl": -1,  "data": {"a": 1.5, "b": 2.0}}
//! }
//! ```

pub mod codec;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod pipeline;
pub mod store;

// 重新导出主要的公共 API
pub use codec::{lookup, CodecError, EncodeOptions, Payload, TypeTag, ValueCodec};

pub use config::{LogConfig, PorterConfig};

pub use dataset::{Dataset, Document, Entry};

pub use logging::init_logging;

pub use pipeline::{
    export_database, import_database, ExportOptions, ExportReport, ImportOptions, ImportReport,
    Outcome, PipelineError, RunReport,
};

pub use store::{Batch, MemoryStore, RedisStore, RedisStoreConfig, Store, StoreError, WriteCommand};
