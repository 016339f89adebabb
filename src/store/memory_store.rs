use async_trait::async_trait;
use glob::Pattern;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use super::command::{Batch, WriteCommand};
use super::core::{Store, StoreError};

/// 内存中保存的值形态
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryValue {
    String(String),
    List(Vec<String>),
    Set(BTreeSet<String>),
    ZSet(BTreeMap<String, f64>),
    Hash(BTreeMap<String, String>),
    /// 不受支持的类型（如 stream），只记录类型名
    Other(String),
}

impl MemoryValue {
    /// TYPE 命令返回的类型名
    pub fn type_name(&self) -> &str {
        match self {
            MemoryValue::String(_) => "string",
            MemoryValue::List(_) => "list",
            MemoryValue::Set(_) => "set",
            MemoryValue::ZSet(_) => "zset",
            MemoryValue::Hash(_) => "hash",
            MemoryValue::Other(type_name) => type_name,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    value: MemoryValue,
    expires_at: Option<Instant>,
}

impl Slot {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |at| at <= now)
    }
}

/// 基于内存 BTreeMap 的存储实现
///
/// 语义与 Redis 单库一致：容器被清空后键随之消失，过期键在访问时惰性删除。
/// 键按字典序枚举。`set_unavailable(true)` 之后所有操作都返回
/// `StoreError::Connection`，用于模拟断线。
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, Slot>,
    unavailable: bool,
    writes_issued: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入一个值（不计入写次数），覆盖已有值并清除过期时间
    pub fn insert(&mut self, key: impl Into<String>, value: MemoryValue) {
        self.slots.insert(
            key.into(),
            Slot {
                value,
                expires_at: None,
            },
        );
    }

    /// 为已存在的键设置过期时间，键不存在时返回 false
    pub fn set_expiry(&mut self, key: &str, ttl: Duration) -> bool {
        self.purge_expired();
        match self.slots.get_mut(key) {
            Some(slot) => {
                slot.expires_at = Some(Instant::now() + ttl);
                true
            }
            None => false,
        }
    }

    /// 读取键当前的值
    pub fn value(&mut self, key: &str) -> Option<&MemoryValue> {
        self.purge_expired();
        self.slots.get(key).map(|slot| &slot.value)
    }

    pub fn len(&mut self) -> usize {
        self.purge_expired();
        self.slots.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// 已执行的写操作次数（execute 中的每条命令以及 flushdb）
    pub fn writes_issued(&self) -> usize {
        self.writes_issued
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Connection(
                "memory store is unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn purge_expired(&mut self) {
        let now = Instant::now();
        self.slots.retain(|_, slot| !slot.is_expired(now));
    }

    fn lookup(&mut self, key: &str) -> Result<Option<&MemoryValue>, StoreError> {
        self.check_available()?;
        self.purge_expired();
        Ok(self.slots.get(key).map(|slot| &slot.value))
    }

    fn wrong_type(key: &str, expected: &str, actual: &MemoryValue) -> StoreError {
        StoreError::Command(format!(
            "WRONGTYPE key '{}' holds {} but {} was expected",
            key,
            actual.type_name(),
            expected
        ))
    }

    /// 取出（必要时创建）指定类型的容器
    fn container<'a>(
        slots: &'a mut BTreeMap<String, Slot>,
        key: &str,
        empty: impl FnOnce() -> MemoryValue,
    ) -> &'a mut MemoryValue {
        &mut slots
            .entry(key.to_string())
            .or_insert_with(|| Slot {
                value: empty(),
                expires_at: None,
            })
            .value
    }

    fn apply(&mut self, command: WriteCommand) -> Result<(), StoreError> {
        match command {
            WriteCommand::Set { key, value } => {
                self.insert(key, MemoryValue::String(value));
            }
            WriteCommand::Del { key } => {
                self.slots.remove(&key);
            }
            WriteCommand::RPush { key, values } => {
                match Self::container(&mut self.slots, &key, || MemoryValue::List(Vec::new())) {
                    MemoryValue::List(list) => list.extend(values),
                    other => return Err(Self::wrong_type(&key, "list", other)),
                }
            }
            WriteCommand::SAdd { key, members } => {
                match Self::container(&mut self.slots, &key, || {
                    MemoryValue::Set(BTreeSet::new())
                }) {
                    MemoryValue::Set(set) => set.extend(members),
                    other => return Err(Self::wrong_type(&key, "set", other)),
                }
            }
            WriteCommand::ZAdd { key, members } => {
                match Self::container(&mut self.slots, &key, || {
                    MemoryValue::ZSet(BTreeMap::new())
                }) {
                    MemoryValue::ZSet(zset) => zset.extend(members),
                    other => return Err(Self::wrong_type(&key, "zset", other)),
                }
            }
            WriteCommand::HSet { key, fields } => {
                match Self::container(&mut self.slots, &key, || {
                    MemoryValue::Hash(BTreeMap::new())
                }) {
                    MemoryValue::Hash(hash) => hash.extend(fields),
                    other => return Err(Self::wrong_type(&key, "hash", other)),
                }
            }
            WriteCommand::Expire { key, seconds } => {
                if seconds <= 0 {
                    self.slots.remove(&key);
                } else {
                    self.set_expiry(&key, Duration::from_secs(seconds as u64));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        let pattern = key_pattern(pattern)?;
        self.purge_expired();
        Ok(self
            .slots
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect())
    }

    async fn key_type(&mut self, key: &str) -> Result<String, StoreError> {
        Ok(self
            .lookup(key)?
            .map_or_else(|| "none".to_string(), |value| value.type_name().to_string()))
    }

    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError> {
        self.check_available()?;
        self.purge_expired();
        Ok(match self.slots.get(key) {
            None => -2,
            Some(Slot {
                expires_at: None, ..
            }) => -1,
            Some(Slot {
                expires_at: Some(at),
                ..
            }) => {
                // 与 Redis 一致，按毫秒四舍五入到秒
                let remaining = at.saturating_duration_since(Instant::now());
                ((remaining.as_millis() + 500) / 1000) as i64
            }
        })
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        match self.lookup(key)? {
            None => Ok(None),
            Some(MemoryValue::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(Self::wrong_type(key, "string", other)),
        }
    }

    async fn llen(&mut self, key: &str) -> Result<usize, StoreError> {
        match self.lookup(key)? {
            None => Ok(0),
            Some(MemoryValue::List(list)) => Ok(list.len()),
            Some(other) => Err(Self::wrong_type(key, "list", other)),
        }
    }

    async fn lrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StoreError> {
        let list = match self.lookup(key)? {
            None => return Ok(Vec::new()),
            Some(MemoryValue::List(list)) => list,
            Some(other) => return Err(Self::wrong_type(key, "list", other)),
        };

        let len = list.len() as i64;
        let normalize = |index: i64| if index < 0 { len + index } else { index };
        let start = normalize(start).max(0);
        let stop = normalize(stop).min(len - 1);
        if start > stop {
            return Ok(Vec::new());
        }
        Ok(list[start as usize..=stop as usize].to_vec())
    }

    async fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.lookup(key)? {
            None => Ok(Vec::new()),
            Some(MemoryValue::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(other) => Err(Self::wrong_type(key, "set", other)),
        }
    }

    async fn zrange_by_score_with_scores(
        &mut self,
        key: &str,
    ) -> Result<Vec<(String, f64)>, StoreError> {
        let zset = match self.lookup(key)? {
            None => return Ok(Vec::new()),
            Some(MemoryValue::ZSet(zset)) => zset,
            Some(other) => return Err(Self::wrong_type(key, "zset", other)),
        };

        let mut members: Vec<(String, f64)> =
            zset.iter().map(|(m, s)| (m.clone(), *s)).collect();
        members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(members)
    }

    async fn hgetall(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        match self.lookup(key)? {
            None => Ok(Vec::new()),
            Some(MemoryValue::Hash(hash)) => {
                Ok(hash.iter().map(|(f, v)| (f.clone(), v.clone())).collect())
            }
            Some(other) => Err(Self::wrong_type(key, "hash", other)),
        }
    }

    async fn dbsize(&mut self) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self.len() as u64)
    }

    async fn flushdb(&mut self) -> Result<(), StoreError> {
        self.check_available()?;
        self.slots.clear();
        self.writes_issued += 1;
        Ok(())
    }

    async fn execute(&mut self, batch: Batch) -> Result<(), StoreError> {
        self.check_available()?;
        // 已过期的键视为不存在，写入时重新创建
        self.purge_expired();
        // 与 pipeline 一致：前面的命令已生效，出错即停止，不回滚
        for command in batch.into_commands() {
            self.apply(command)?;
            self.writes_issued += 1;
        }
        Ok(())
    }
}

/// 把 Redis KEYS 通配符转换为 glob 模式：`\\x` 转义为字面量，`[^...]` 转为 `[!...]`
fn key_pattern(pattern: &str) -> Result<Pattern, StoreError> {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => translated.push_str(&Pattern::escape(&escaped.to_string())),
                None => translated.push(c),
            },
            _ => translated.push(c),
        }
    }
    Pattern::new(&translated.replace("[^", "[!"))
        .map_err(|e| StoreError::Command(format!("invalid key pattern '{}': {}", pattern, e)))
}
