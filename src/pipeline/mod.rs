//! 导出/导入流水线
//!
//! 两条流水线都按"单键失败不影响整体"的方式运行：
//! 单个键的错误记录在 [`RunReport`] 中，只有键枚举、文件读写解析、
//! 批量提交这类整体性失败才以 [`PipelineError`] 返回。

pub mod error;
pub mod export;
pub mod import;
pub mod report;

pub use error::PipelineError;
pub use export::{collect_dataset, export_database, ExportOptions};
pub use import::{flush_database, import_database, stage_document, ImportOptions};
pub use report::{ExportReport, ImportReport, KeyOutcome, Outcome, RunReport};
