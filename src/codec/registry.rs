use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::core::{CodecError, ValueCodec};
use super::{HashCodec, ListCodec, SetCodec, StringCodec, ZSetCodec};

/// 受支持的类型标签，与 Redis TYPE 命令的返回值一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    String,
    List,
    Set,
    ZSet,
    Hash,
}

impl TypeTag {
    /// 全部受支持的类型
    pub const ALL: [TypeTag; 5] = [
        TypeTag::String,
        TypeTag::List,
        TypeTag::Set,
        TypeTag::ZSet,
        TypeTag::Hash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::List => "list",
            TypeTag::Set => "set",
            TypeTag::ZSet => "zset",
            TypeTag::Hash => "hash",
        }
    }

    /// 该类型对应的编解码器
    pub fn codec(self) -> &'static dyn ValueCodec {
        match self {
            TypeTag::String => &StringCodec,
            TypeTag::List => &ListCodec,
            TypeTag::Set => &SetCodec,
            TypeTag::ZSet => &ZSetCodec,
            TypeTag::Hash => &HashCodec,
        }
    }
}

impl FromStr for TypeTag {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(TypeTag::String),
            "list" => Ok(TypeTag::List),
            "set" => Ok(TypeTag::Set),
            "zset" => Ok(TypeTag::ZSet),
            "hash" => Ok(TypeTag::Hash),
            _ => Err(CodecError::UnsupportedType(s.to_string())),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按类型名查找编解码器，未知类型返回 `CodecError::UnsupportedType`
pub fn lookup(type_name: &str) -> Result<&'static dyn ValueCodec, CodecError> {
    Ok(type_name.parse::<TypeTag>()?.codec())
}
