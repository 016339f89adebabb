use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error::PipelineError;
use super::report::{ImportReport, Outcome, RunReport};
use crate::codec::{CodecError, EncodeOptions};
use crate::dataset::{Document, Entry};
use crate::store::{Batch, Store, WriteCommand};

/// 导入选项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ImportOptions {
    /// 导入前清空当前库（不可逆）
    #[default = false]
    pub flush: bool,

    /// 容器类型写入前先删除已有值
    #[default = true]
    pub replace_existing: bool,
}

impl ImportOptions {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            replace_existing: self.replace_existing,
        }
    }
}

/// 把单个条目转换为写命令，TTL 为正且值非空时追加 EXPIRE
///
/// 非正 TTL 表示不过期，不会生成 EXPIRE。
fn stage_entry(
    key: &str,
    entry: Result<Entry, CodecError>,
    options: &EncodeOptions,
) -> Result<Vec<WriteCommand>, CodecError> {
    let entry = entry?;
    let ttl = entry.ttl;
    let has_value = !entry.payload.is_empty();
    let mut commands = entry.tag.codec().encode(key, entry.payload, options)?;
    if ttl > 0 && has_value {
        commands.push(WriteCommand::Expire {
            key: key.to_string(),
            seconds: ttl,
        });
    }
    Ok(commands)
}

/// 把文档中的所有条目暂存进一个批次
///
/// 条目级错误只记录在报告中，不影响其它条目的暂存。
pub fn stage_document(document: &Document, options: &EncodeOptions) -> (Batch, RunReport) {
    let mut batch = Batch::new();
    let mut report = RunReport::new();
    for (key, entry) in document.entries() {
        let type_name = entry
            .as_ref()
            .map(|e| e.tag.as_str())
            .unwrap_or("unknown")
            .to_string();
        match stage_entry(key, entry, options) {
            Ok(commands) => {
                info!("Imported key '{}' ({})", key, type_name);
                batch.extend(commands);
                report.record(key, Outcome::Succeeded);
            }
            Err(err) => {
                warn!("Cannot import '{}': {}", key, err);
                report.record(key, Outcome::from_error(&err));
            }
        }
    }
    (batch, report)
}

/// 清空当前库，返回清空前的键数量
pub async fn flush_database(store: &mut dyn Store) -> Result<u64, PipelineError> {
    let size = store.dbsize().await.map_err(PipelineError::Connection)?;
    store.flushdb().await.map_err(PipelineError::Connection)?;
    if size > 0 {
        info!("Flushed {} key(s)", size);
    }
    Ok(size)
}

/// 从 `path` 导入数据到当前库
///
/// 文件先完整解析，解析失败时不会执行任何写操作（包括 flush）。
/// 所有写命令通过一个批次一次性提交，提交失败时已生效的写入不会回滚。
pub async fn import_database(
    store: &mut dyn Store,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportReport, PipelineError> {
    let started = Instant::now();
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::file_io(path, e))?;
    let document = Document::parse(&text)?;

    let flushed = if options.flush {
        Some(flush_database(store).await?)
    } else {
        None
    };

    let (batch, mut run) = stage_document(&document, &options.encode_options());
    let commands = batch.len();
    debug!("executing {} staged command(s)", commands);
    store
        .execute(batch)
        .await
        .map_err(PipelineError::Connection)?;

    run.elapsed = started.elapsed();
    info!("Import {}", run);
    Ok(ImportReport {
        run,
        flushed,
        commands,
    })
}
