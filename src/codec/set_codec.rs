use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;

use super::core::{replace_prefix, string_array, CodecError, EncodeOptions, Payload, ValueCodec};
use super::registry::TypeTag;
use crate::store::{Store, WriteCommand};

/// "set" 类型编解码器，JSON 为字符串数组，顺序无意义
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCodec;

#[async_trait]
impl ValueCodec for SetCodec {
    fn tag(&self) -> TypeTag {
        TypeTag::Set
    }

    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError> {
        let members = store.smembers(key).await?;
        Ok(Payload::Set(members.into_iter().collect()))
    }

    fn encode(
        &self,
        key: &str,
        payload: Payload,
        options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError> {
        let members = match payload {
            Payload::Set(members) => members,
            other => return Err(self.mismatch(&other)),
        };
        if members.is_empty() {
            return Ok(replace_prefix(key, options));
        }

        let mut commands = replace_prefix(key, options);
        commands.push(WriteCommand::SAdd {
            key: key.to_string(),
            members: members.into_iter().collect(),
        });
        Ok(commands)
    }

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError> {
        match payload {
            Payload::Set(members) => Ok(Value::Array(
                members.iter().cloned().map(Value::String).collect(),
            )),
            other => Err(self.mismatch(other)),
        }
    }

    fn from_json(&self, data: Value) -> Result<Payload, CodecError> {
        let members = string_array(TypeTag::Set, data)?;
        let count = members.len();
        let set: BTreeSet<String> = members.into_iter().collect();
        if set.len() != count {
            return Err(CodecError::invalid(
                TypeTag::Set,
                format!("{} duplicate member(s)", count - set.len()),
            ));
        }
        Ok(Payload::Set(set))
    }
}
