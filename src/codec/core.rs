use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::registry::TypeTag;
use crate::store::{Store, StoreError, WriteCommand};

/// 单个键/条目级别的编解码错误，流水线中只影响当前条目
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("type '{0}' is not supported")]
    UnsupportedType(String),
    #[error("invalid {tag} payload: {reason}")]
    InvalidPayload { tag: TypeTag, reason: String },
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
    #[error("{codec} codec cannot handle a {payload} payload")]
    PayloadMismatch { codec: TypeTag, payload: TypeTag },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CodecError {
    pub(crate) fn invalid(tag: TypeTag, reason: impl Into<String>) -> Self {
        CodecError::InvalidPayload {
            tag,
            reason: reason.into(),
        }
    }
}

/// 一个键的值，形态由类型标签唯一确定
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Scalar(Option<String>),
    List(Vec<String>),
    Set(BTreeSet<String>),
    ScoredSet(BTreeMap<String, f64>),
    FieldMap(BTreeMap<String, String>),
}

impl Payload {
    pub fn tag(&self) -> TypeTag {
        match self {
            Payload::Scalar(_) => TypeTag::String,
            Payload::List(_) => TypeTag::List,
            Payload::Set(_) => TypeTag::Set,
            Payload::ScoredSet(_) => TypeTag::ZSet,
            Payload::FieldMap(_) => TypeTag::Hash,
        }
    }

    /// 标量缺值或容器无成员
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Scalar(value) => value.is_none(),
            Payload::List(values) => values.is_empty(),
            Payload::Set(members) => members.is_empty(),
            Payload::ScoredSet(members) => members.is_empty(),
            Payload::FieldMap(fields) => fields.is_empty(),
        }
    }
}

/// 写回存储时的选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// 容器类型写入前先 DEL，避免与已有值合并
    pub replace_existing: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            replace_existing: true,
        }
    }
}

/// 值编解码器：存储值 <-> Payload <-> JSON 片段
///
/// 实现都是无状态的单元结构体，同一实例可用于任意多个键。
#[async_trait]
pub trait ValueCodec: Send + Sync {
    /// 该编解码器处理的类型标签
    fn tag(&self) -> TypeTag;

    /// 从存储读取 `key` 的值；键存在但无成员时返回空 Payload
    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError>;

    /// 把 Payload 转换为写回 `key` 的命令，空容器不产生命令
    fn encode(
        &self,
        key: &str,
        payload: Payload,
        options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError>;

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError>;

    fn from_json(&self, data: Value) -> Result<Payload, CodecError>;

    /// Payload 类型与编解码器不一致时的错误
    fn mismatch(&self, payload: &Payload) -> CodecError {
        CodecError::PayloadMismatch {
            codec: self.tag(),
            payload: payload.tag(),
        }
    }
}

/// 把 JSON 数组解析为字符串序列，`tag` 用于错误信息
pub(crate) fn string_array(tag: TypeTag, data: Value) -> Result<Vec<String>, CodecError> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s),
                other => Err(CodecError::invalid(
                    tag,
                    format!("element {} must be a string, got {}", i, json_kind(&other)),
                )),
            })
            .collect(),
        other => Err(CodecError::invalid(
            tag,
            format!("expected an array, got {}", json_kind(&other)),
        )),
    }
}

/// 容器类型写入前的 DEL 命令（可选）
pub(crate) fn replace_prefix(key: &str, options: &EncodeOptions) -> Vec<WriteCommand> {
    if options.replace_existing {
        vec![WriteCommand::Del {
            key: key.to_string(),
        }]
    } else {
        Vec::new()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
