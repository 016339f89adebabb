//! 值编解码模块
//!
//! 每种存储值形态对应一个无状态编解码器，负责三段转换：
//! 存储读取 -> [`Payload`] -> JSON 片段，以及反向的 JSON -> 写命令。
//! 类型标签到编解码器的映射由 [`registry`] 在编译期固定。

pub mod core;
pub mod hash_codec;
pub mod list_codec;
pub mod registry;
pub mod set_codec;
pub mod string_codec;
pub mod zset_codec;

// 重新导出核心类型和 trait
pub use self::core::{CodecError, EncodeOptions, Payload, ValueCodec};
pub use registry::{lookup, TypeTag};

// 重新导出具体的编解码器
pub use hash_codec::HashCodec;
pub use list_codec::ListCodec;
pub use set_codec::SetCodec;
pub use string_codec::StringCodec;
pub use zset_codec::ZSetCodec;
