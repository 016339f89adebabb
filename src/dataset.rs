//! 导出文件的数据模型
//!
//! 文件是一个 JSON 对象，成员名为键名，成员值为条目：
//!
//! ```json
//! { "user:1": { "type": "hash", "ttl": -1, "data": { "name": "Alice" } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{CodecError, Payload, TypeTag};
use crate::pipeline::PipelineError;

/// 一个键的导出记录
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub tag: TypeTag,
    /// 剩余秒数；非正数表示无过期
    pub ttl: i64,
    pub payload: Payload,
}

/// 文件中条目的外层结构，`data` 按 `type` 由编解码器解释
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    type_name: String,
    ttl: i64,
    data: Value,
}

impl Entry {
    pub fn new(tag: TypeTag, ttl: i64, payload: Payload) -> Self {
        Self { tag, ttl, payload }
    }

    /// 是否需要在导入时恢复过期时间
    pub fn has_expiry(&self) -> bool {
        self.ttl > 0
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let envelope = Envelope {
            type_name: self.tag.as_str().to_string(),
            ttl: self.ttl,
            data: self.tag.codec().to_json(&self.payload)?,
        };
        serde_json::to_value(envelope).map_err(|e| CodecError::InvalidEntry(e.to_string()))
    }

    /// 解析单个条目
    ///
    /// 外层结构错误返回 `InvalidEntry`，未知类型返回 `UnsupportedType`，
    /// 数据形态错误返回 `InvalidPayload`。
    pub fn from_json(value: Value) -> Result<Self, CodecError> {
        let envelope: Envelope =
            serde_json::from_value(value).map_err(|e| CodecError::InvalidEntry(e.to_string()))?;
        let tag: TypeTag = envelope.type_name.parse()?;
        let payload = tag.codec().from_json(envelope.data)?;
        Ok(Self {
            tag,
            ttl: envelope.ttl,
            payload,
        })
    }
}

/// 一次导出构建的完整数据集，保持枚举顺序
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    entries: Vec<(String, Entry)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) {
        self.entries.push((key.into(), entry));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::with_capacity(self.entries.len());
        for (key, entry) in &self.entries {
            object.insert(key.clone(), entry.to_json()?);
        }
        Ok(Value::Object(object))
    }

    /// 序列化为文件内容
    pub fn to_vec(&self, pretty: bool) -> Result<Vec<u8>, PipelineError> {
        let value = self
            .to_json()
            .map_err(|e| PipelineError::MalformedDocument(e.to_string()))?;
        let bytes = if pretty {
            serde_json::to_vec_pretty(&value)
        } else {
            serde_json::to_vec(&value)
        };
        bytes.map_err(PipelineError::Serialize)
    }
}

/// 从文件解析出的文档，条目保持文件顺序且尚未逐条校验
///
/// 顶层不是合法 JSON 对象时整体失败；单个条目的错误留到导入时逐条处理。
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self, PipelineError> {
        match serde_json::from_str::<Value>(text).map_err(PipelineError::Parse)? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(PipelineError::MalformedDocument(format!(
                "top-level value must be an object, got {}",
                crate::codec::core::json_kind(&other)
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 逐条解析，错误按条目返回
    pub fn entries(&self) -> impl Iterator<Item = (&str, Result<Entry, CodecError>)> {
        self.iter()
            .map(|(key, value)| (key, Entry::from_json(value.clone())))
    }
}
