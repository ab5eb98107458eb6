// ==========================================
// 钢筋发货价差系统 - 展示适配层
// ==========================================
// 职责: 价差表 → 人工决策视图 / 发货依据文件
// 红线: 只做投影与取整,不改变引擎结果
// ==========================================

pub mod csv_export;
pub mod error;

pub use csv_export::{best_only, export_file_name, CsvExporter, ExportRow};
pub use error::{ExportError, ExportResult};
