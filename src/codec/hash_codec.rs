use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::core::{json_kind, replace_prefix, CodecError, EncodeOptions, Payload, ValueCodec};
use super::registry::TypeTag;
use crate::store::{Store, WriteCommand};

/// "hash" 类型编解码器，JSON 为 `{field: value}` 对象
#[derive(Debug, Clone, Copy, Default)]
pub struct HashCodec;

#[async_trait]
impl ValueCodec for HashCodec {
    fn tag(&self) -> TypeTag {
        TypeTag::Hash
    }

    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError> {
        let fields = store.hgetall(key).await?;
        Ok(Payload::FieldMap(fields.into_iter().collect()))
    }

    fn encode(
        &self,
        key: &str,
        payload: Payload,
        options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError> {
        let fields = match payload {
            Payload::FieldMap(fields) => fields,
            other => return Err(self.mismatch(&other)),
        };
        if fields.is_empty() {
            return Ok(replace_prefix(key, options));
        }

        let mut commands = replace_prefix(key, options);
        commands.push(WriteCommand::HSet {
            key: key.to_string(),
            fields: fields.into_iter().collect(),
        });
        Ok(commands)
    }

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError> {
        match payload {
            Payload::FieldMap(fields) => Ok(Value::Object(
                fields
                    .iter()
                    .map(|(f, v)| (f.clone(), Value::String(v.clone())))
                    .collect::<Map<String, Value>>(),
            )),
            other => Err(self.mismatch(other)),
        }
    }

    fn from_json(&self, data: Value) -> Result<Payload, CodecError> {
        let object = match data {
            Value::Object(object) => object,
            other => {
                return Err(CodecError::invalid(
                    TypeTag::Hash,
                    format!("expected an object, got {}", json_kind(&other)),
                ))
            }
        };
        let mut fields = BTreeMap::new();
        for (field, value) in object {
            match value {
                Value::String(value) => {
                    fields.insert(field, value);
                }
                other => {
                    return Err(CodecError::invalid(
                        TypeTag::Hash,
                        format!(
                            "field '{}' must be a string, got {}",
                            field,
                            json_kind(&other)
                        ),
                    ))
                }
            }
        }
        Ok(Payload::FieldMap(fields))
    }
}
