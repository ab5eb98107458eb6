// ==========================================
// 钢筋发货价差系统 - 导入层
// ==========================================
// 职责: 外部文件 → 引擎输入表
// 支持: Excel, CSV, JSON(加价规则)
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod table_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, FieldMapper};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawTable, UniversalFileParser};
pub use table_loader::{InputFiles, TableLoader};
