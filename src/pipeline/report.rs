use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::codec::CodecError;

/// 单个键/条目的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    /// 类型不受支持，跳过
    Skipped(String),
    /// 编解码或读取失败
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }

    /// 不受支持的类型记为跳过，其余错误记为失败
    pub fn from_error(err: &CodecError) -> Self {
        match err {
            CodecError::UnsupportedType(_) => Outcome::Skipped(err.to_string()),
            _ => Outcome::Failed(err.to_string()),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded => None,
            Outcome::Skipped(reason) | Outcome::Failed(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome {
    pub key: String,
    pub outcome: Outcome,
}

/// 一次运行的汇总，跳过和失败都计入 failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<KeyOutcome>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: impl Into<String>, outcome: Outcome) {
        self.outcomes.push(KeyOutcome {
            key: key.into(),
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Skipped(_)))
            .count()
    }

    /// 所有未成功的条目
    pub fn failures(&self) -> impl Iterator<Item = &KeyOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_success())
    }

    pub fn outcome(&self, key: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.key == key)
            .map(|o| &o.outcome)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "finished in {}ms (success: {}, failed: {}, total: {})",
            self.elapsed.as_millis(),
            self.succeeded(),
            self.failed(),
            self.total()
        )
    }
}

/// 导出结果；库为空时不写文件，`written` 为 None
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub run: RunReport,
    pub written: Option<PathBuf>,
}

/// 导入结果；`flushed` 为导入前清空的键数量（未清空时为 None）
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub run: RunReport,
    pub flushed: Option<u64>,
    /// 实际提交的写命令数量
    pub commands: usize,
}
