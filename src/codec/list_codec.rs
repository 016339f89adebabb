use async_trait::async_trait;
use serde_json::Value;

use super::core::{replace_prefix, string_array, CodecError, EncodeOptions, Payload, ValueCodec};
use super::registry::TypeTag;
use crate::store::{Store, WriteCommand};

/// "list" 类型编解码器
///
/// 读取时先取长度再取完整区间（头到尾），写回使用 RPUSH 尾部追加，
/// 因此导出再导入后元素顺序不变。
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

#[async_trait]
impl ValueCodec for ListCodec {
    fn tag(&self) -> TypeTag {
        TypeTag::List
    }

    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError> {
        let len = store.llen(key).await?;
        if len == 0 {
            return Ok(Payload::List(Vec::new()));
        }
        let values = store.lrange(key, 0, len as i64 - 1).await?;
        Ok(Payload::List(values))
    }

    fn encode(
        &self,
        key: &str,
        payload: Payload,
        options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError> {
        let values = match payload {
            Payload::List(values) => values,
            other => return Err(self.mismatch(&other)),
        };
        if values.is_empty() {
            return Ok(replace_prefix(key, options));
        }

        let mut commands = replace_prefix(key, options);
        commands.push(WriteCommand::RPush {
            key: key.to_string(),
            values,
        });
        Ok(commands)
    }

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError> {
        match payload {
            Payload::List(values) => Ok(Value::from(values.clone())),
            other => Err(self.mismatch(other)),
        }
    }

    fn from_json(&self, data: Value) -> Result<Payload, CodecError> {
        Ok(Payload::List(string_array(TypeTag::List, data)?))
    }
}
