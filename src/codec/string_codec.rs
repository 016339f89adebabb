use async_trait::async_trait;
use serde_json::Value;

use super::core::{json_kind, CodecError, EncodeOptions, Payload, ValueCodec};
use super::registry::TypeTag;
use crate::store::{Store, WriteCommand};

/// "string" 类型编解码器
///
/// JSON 形态为恰好一个元素的数组：`["value"]`，值缺失时为 `[null]`。
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

#[async_trait]
impl ValueCodec for StringCodec {
    fn tag(&self) -> TypeTag {
        TypeTag::String
    }

    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError> {
        Ok(Payload::Scalar(store.get(key).await?))
    }

    fn encode(
        &self,
        key: &str,
        payload: Payload,
        _options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError> {
        match payload {
            Payload::Scalar(Some(value)) => Ok(vec![WriteCommand::Set {
                key: key.to_string(),
                value,
            }]),
            Payload::Scalar(None) => Err(CodecError::invalid(
                TypeTag::String,
                "value is absent, nothing to write",
            )),
            other => Err(self.mismatch(&other)),
        }
    }

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError> {
        match payload {
            Payload::Scalar(value) => Ok(Value::Array(vec![value
                .clone()
                .map_or(Value::Null, Value::String)])),
            other => Err(self.mismatch(other)),
        }
    }

    fn from_json(&self, data: Value) -> Result<Payload, CodecError> {
        let mut items = match data {
            Value::Array(items) => items,
            other => {
                return Err(CodecError::invalid(
                    TypeTag::String,
                    format!("expected an array, got {}", json_kind(&other)),
                ))
            }
        };
        if items.len() != 1 {
            return Err(CodecError::invalid(
                TypeTag::String,
                format!("expected exactly one element, got {}", items.len()),
            ));
        }
        match items.remove(0) {
            Value::String(value) => Ok(Payload::Scalar(Some(value))),
            Value::Null => Ok(Payload::Scalar(None)),
            other => Err(CodecError::invalid(
                TypeTag::String,
                format!("element must be a string or null, got {}", json_kind(&other)),
            )),
        }
    }
}
