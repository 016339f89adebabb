use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error::PipelineError;
use super::report::{ExportReport, Outcome, RunReport};
use crate::codec::{lookup, CodecError};
use crate::dataset::{Dataset, Entry};
use crate::store::Store;

/// 导出选项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ExportOptions {
    /// 键枚举的通配符
    #[default = "*"]
    pub pattern: String,

    /// 是否格式化输出，便于人工阅读
    #[default = true]
    pub pretty: bool,
}

/// 读取单个键：类型 -> 编解码器 -> 值 -> TTL
async fn export_key(store: &mut dyn Store, key: &str) -> Result<Entry, CodecError> {
    let type_name = store.key_type(key).await?;
    let codec = lookup(&type_name)?;
    let payload = codec.decode(store, key).await?;
    let ttl = store.ttl(key).await?;
    Ok(Entry::new(codec.tag(), ttl, payload))
}

/// 把匹配的键读入内存数据集
///
/// 只有键枚举失败是致命的；单个键失败记录在报告中，继续处理后续键。
pub async fn collect_dataset(
    store: &mut dyn Store,
    pattern: &str,
) -> Result<(Dataset, RunReport), PipelineError> {
    let started = Instant::now();
    let keys = store
        .keys(pattern)
        .await
        .map_err(PipelineError::Enumeration)?;
    debug!("found {} key(s) matching '{}'", keys.len(), pattern);

    let mut dataset = Dataset::new();
    let mut report = RunReport::new();
    for key in keys {
        match export_key(store, &key).await {
            Ok(entry) => {
                info!("Exported key '{}' ({})", key, entry.tag);
                dataset.insert(key.clone(), entry);
                report.record(key, Outcome::Succeeded);
            }
            Err(err) => {
                warn!("Cannot export '{}': {}", key, err);
                report.record(key, Outcome::from_error(&err));
            }
        }
    }
    report.elapsed = started.elapsed();
    Ok((dataset, report))
}

/// 导出当前库到 `path`
///
/// 库中没有匹配的键时不创建文件。文件一次性写入，写入失败为致命错误。
pub async fn export_database(
    store: &mut dyn Store,
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport, PipelineError> {
    let started = Instant::now();
    let (dataset, mut run) = collect_dataset(store, &options.pattern).await?;

    if run.total() == 0 {
        info!("No keys were found in the database, nothing to export");
        return Ok(ExportReport { run, written: None });
    }
    info!("Found {} key(s)", run.total());

    let bytes = dataset.to_vec(options.pretty)?;
    std::fs::write(path, bytes).map_err(|e| PipelineError::file_io(path, e))?;

    run.elapsed = started.elapsed();
    info!("Export {}", run);
    Ok(ExportReport {
        run,
        written: Some(path.to_path_buf()),
    })
}
