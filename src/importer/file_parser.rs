// ==========================================
// 钢筋发货价差系统 - 文件解析器实现
// ==========================================
// 职责: 文件读取 → 表头 + 原始行记录
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 原始行记录（列名 → 去空白后的文本值）
pub type RawRecord = HashMap<String, String>;

// ==========================================
// RawTable - 解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// 判断是否为空白行
pub fn is_blank(record: &RawRecord) -> bool {
    record.values().all(|v| v.is_empty())
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 行记录
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - keep_blank_rows: 是否保留空白行（可发规格表用空行分隔钢厂）
    fn parse_to_raw_table(&self, file_path: &Path, keep_blank_rows: bool)
        -> ImportResult<RawTable>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从文本解析（BOM 与空行在此统一处理）
    pub fn parse_str(&self, content: &str, keep_blank_rows: bool) -> ImportResult<RawTable> {
        let content = content.trim_start_matches('\u{feff}');

        // csv 读取器会吞掉真正的空行, 这里先替换为单个逗号以保留分隔信息
        let normalized: String = content
            .lines()
            .map(|line| if line.trim().is_empty() { "," } else { line })
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(normalized.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = RawRecord::new();

            for (col_idx, header) in headers.iter().enumerate() {
                let value = record.get(col_idx).unwrap_or("").trim().to_string();
                row_map.insert(header.clone(), value);
            }

            if is_blank(&row_map) && !keep_blank_rows {
                continue;
            }

            records.push(row_map);
        }

        Ok(RawTable { headers, records })
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(
        &self,
        file_path: &Path,
        keep_blank_rows: bool,
    ) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let content = fs::read_to_string(file_path)?;
        self.parse_str(&content, keep_blank_rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(
        &self,
        file_path: &Path,
        keep_blank_rows: bool,
    ) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        // 检查扩展名
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell.to_string()))
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRecord::new();

            for (col_idx, header) in headers.iter().enumerate() {
                let value = data_row
                    .get(col_idx)
                    .map(|cell| cell.to_string().trim().to_string())
                    .unwrap_or_default();
                row_map.insert(header.clone(), value);
            }

            if is_blank(&row_map) && !keep_blank_rows {
                continue;
            }

            records.push(row_map);
        }

        Ok(RawTable { headers, records })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(
        &self,
        file_path: P,
        keep_blank_rows: bool,
    ) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path, keep_blank_rows),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path, keep_blank_rows),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
