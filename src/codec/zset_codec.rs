use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use super::core::{json_kind, replace_prefix, CodecError, EncodeOptions, Payload, ValueCodec};
use super::registry::TypeTag;
use crate::store::{Store, WriteCommand};

/// "zset" 类型编解码器
///
/// JSON 为 `{member: score}` 对象。JSON 数字无法表示无穷大，
/// 因此 ±inf 分值使用 Redis 的写法 `"+inf"` / `"-inf"` 字符串。
#[derive(Debug, Clone, Copy, Default)]
pub struct ZSetCodec;

fn score_to_json(member: &str, score: f64) -> Result<Value, CodecError> {
    if score == f64::INFINITY {
        return Ok(Value::String("+inf".to_string()));
    }
    if score == f64::NEG_INFINITY {
        return Ok(Value::String("-inf".to_string()));
    }
    Number::from_f64(score).map(Value::Number).ok_or_else(|| {
        CodecError::invalid(
            TypeTag::ZSet,
            format!("member '{}' has a non-finite score {}", member, score),
        )
    })
}

fn score_from_json(member: &str, value: &Value) -> Result<f64, CodecError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            CodecError::invalid(
                TypeTag::ZSet,
                format!("member '{}' score {} is out of range", member, n),
            )
        }),
        Value::String(s) => match s.as_str() {
            "+inf" | "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            _ => Err(CodecError::invalid(
                TypeTag::ZSet,
                format!("member '{}' score '{}' is not a number", member, s),
            )),
        },
        other => Err(CodecError::invalid(
            TypeTag::ZSet,
            format!(
                "member '{}' score must be a number, got {}",
                member,
                json_kind(other)
            ),
        )),
    }
}

#[async_trait]
impl ValueCodec for ZSetCodec {
    fn tag(&self) -> TypeTag {
        TypeTag::ZSet
    }

    async fn decode(&self, store: &mut dyn Store, key: &str) -> Result<Payload, CodecError> {
        let members = store.zrange_by_score_with_scores(key).await?;
        Ok(Payload::ScoredSet(members.into_iter().collect()))
    }

    fn encode(
        &self,
        key: &str,
        payload: Payload,
        options: &EncodeOptions,
    ) -> Result<Vec<WriteCommand>, CodecError> {
        let members = match payload {
            Payload::ScoredSet(members) => members,
            other => return Err(self.mismatch(&other)),
        };
        if members.is_empty() {
            return Ok(replace_prefix(key, options));
        }

        let mut commands = replace_prefix(key, options);
        commands.push(WriteCommand::ZAdd {
            key: key.to_string(),
            members: members.into_iter().collect(),
        });
        Ok(commands)
    }

    fn to_json(&self, payload: &Payload) -> Result<Value, CodecError> {
        let members = match payload {
            Payload::ScoredSet(members) => members,
            other => return Err(self.mismatch(other)),
        };
        let mut object = Map::with_capacity(members.len());
        for (member, score) in members {
            object.insert(member.clone(), score_to_json(member, *score)?);
        }
        Ok(Value::Object(object))
    }

    fn from_json(&self, data: Value) -> Result<Payload, CodecError> {
        let object = match data {
            Value::Object(object) => object,
            other => {
                return Err(CodecError::invalid(
                    TypeTag::ZSet,
                    format!("expected an object, got {}", json_kind(&other)),
                ))
            }
        };
        let mut members = BTreeMap::new();
        for (member, value) in object {
            let score = score_from_json(&member, &value)?;
            members.insert(member, score);
        }
        Ok(Payload::ScoredSet(members))
    }
}
