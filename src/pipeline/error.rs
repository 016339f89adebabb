use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// 使整次运行中止的致命错误
///
/// 单个键的失败不会出现在这里，而是记录在运行报告中。
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to enumerate keys: {0}")]
    Enumeration(#[source] StoreError),

    #[error("store connection failed: {0}")]
    Connection(#[source] StoreError),

    #[error("file '{}' I/O failed: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse data file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("malformed data file: {0}")]
    MalformedDocument(String),

    #[error("failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::FileIo {
            path: path.into(),
            source,
        }
    }
}
