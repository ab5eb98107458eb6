// ==========================================
// 钢筋发货价差系统 - 发货依据导出
// ==========================================
// 职责: 价差表行 → 展示行（取整 + 本地化）→ CSV
// 格式: UTF-8 BOM（便于 Excel 直接打开）
// ==========================================

use crate::domain::candidate::Candidate;
use crate::engine::ranker::Ranker;
use crate::export::error::{ExportError, ExportResult};
use crate::i18n;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 导出列（顺序即 CSV 列顺序）
const HEADER_KEYS: [&str; 12] = [
    "export.building",
    "export.spec",
    "export.length",
    "export.mill",
    "export.net_price",
    "export.arrival_price",
    "export.differential",
    "export.unit_weight",
    "export.planned_tonnage",
    "export.shipped_pieces",
    "export.shipped_tonnage",
    "export.profit",
];

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 仅保留最优价差记录（占位行始终保留）
pub fn best_only(rows: &[Candidate]) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = rows
        .iter()
        .filter(|r| r.is_degenerate() || r.is_best)
        .cloned()
        .collect();
    Ranker::new().sort(&mut kept);
    kept
}

/// 发货依据文件名: {YYYYMMDD}_发货依据.csv
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}_发货依据.csv", date.format("%Y%m%d"))
}

// ==========================================
// ExportRow - 展示行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub building: String,
    pub spec: String,
    pub length: String,
    pub mill: String,
    pub net_price: f64,
    pub arrival_price: f64,
    pub differential: f64,
    pub unit_weight: f64,     // 3 位小数
    pub planned_tonnage: f64, // 2 位小数
    pub shipped_pieces: u64,
    pub shipped_tonnage: f64, // 2 位小数
    pub profit: f64,          // 2 位小数
}

impl ExportRow {
    /// 投影一行；占位行的钢厂列显示原因
    pub fn from_candidate(row: &Candidate, locale: &str) -> Self {
        let mill = match row.degenerate {
            Some(reason) => i18n::t_in(reason.i18n_key(), locale),
            None => row.mill.clone(),
        };

        Self {
            building: row.demand_group.clone(),
            spec: row.spec.clone(),
            length: row.length.clone(),
            mill,
            net_price: row.net_price,
            arrival_price: row.arrival_price,
            differential: row.differential,
            unit_weight: round_to(row.unit_weight, 3),
            planned_tonnage: round_to(row.planned_tonnage, 2),
            shipped_pieces: row.shipped_pieces,
            shipped_tonnage: round_to(row.shipped_tonnage, 2),
            profit: round_to(row.profit, 2),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.building.clone(),
            self.spec.clone(),
            self.length.clone(),
            self.mill.clone(),
            self.net_price.to_string(),
            self.arrival_price.to_string(),
            self.differential.to_string(),
            self.unit_weight.to_string(),
            self.planned_tonnage.to_string(),
            self.shipped_pieces.to_string(),
            self.shipped_tonnage.to_string(),
            self.profit.to_string(),
        ]
    }
}

// ==========================================
// CsvExporter - 发货依据 CSV 导出器
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvExporter {
    locale: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            locale: i18n::DEFAULT_LOCALE.to_string(),
        }
    }
}

impl CsvExporter {
    pub fn new(locale: &str) -> ExportResult<Self> {
        if !i18n::is_supported(locale) {
            return Err(ExportError::UnsupportedLocale(locale.to_string()));
        }
        Ok(Self {
            locale: locale.to_string(),
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 本地化表头
    pub fn headers(&self) -> Vec<String> {
        HEADER_KEYS
            .iter()
            .map(|key| i18n::t_in(key, &self.locale))
            .collect()
    }

    pub fn project(&self, rows: &[Candidate]) -> Vec<ExportRow> {
        rows.iter()
            .map(|r| ExportRow::from_candidate(r, &self.locale))
            .collect()
    }

    /// 写出 CSV（BOM + 表头 + 数据行）
    ///
    /// # 返回
    /// 写出的数据行数
    pub fn write<W: Write>(&self, rows: &[Candidate], mut writer: W) -> ExportResult<usize> {
        writer.write_all(UTF8_BOM)?;

        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(self.headers())?;
        for row in self.project(rows) {
            wtr.write_record(row.to_row())?;
        }
        wtr.flush()?;

        Ok(rows.len())
    }

    /// 写出到目录, 文件名按日期生成
    ///
    /// # 返回
    /// 生成的文件路径
    pub fn export_to_dir(
        &self,
        rows: &[Candidate],
        dir: &Path,
        date: NaiveDate,
    ) -> ExportResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(date));
        let file = File::create(&path)?;
        let written = self.write(rows, file)?;

        info!(path = %path.display(), rows = written, locale = %self.locale, "发货依据已导出");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::spec_sort_key;
    use crate::domain::types::DegenerateReason;

    fn row(group: &str, spec: &str, mill: &str, differential: f64, is_best: bool) -> Candidate {
        Candidate {
            demand_group: group.to_string(),
            spec: spec.to_string(),
            spec_sort_key: spec_sort_key(spec),
            length: "9m".to_string(),
            mill: mill.to_string(),
            net_price: 3660.0,
            arrival_price: 3660.0 - differential,
            differential,
            unit_weight: 2.66666,
            planned_tonnage: 10.0,
            shipped_pieces: 4,
            shipped_tonnage: 10.66664,
            profit: differential * 10.0,
            is_best,
            degenerate: None,
        }
    }

    fn written(exporter: &CsvExporter, rows: &[Candidate]) -> String {
        let mut buf = Vec::new();
        exporter.write(rows, &mut buf).unwrap();
        assert!(buf.starts_with(UTF8_BOM));
        String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap()
    }

    #[test]
    fn test_best_only_keeps_ties_and_degenerate_rows() {
        let rows = vec![
            row("1#", "HRB400E12", "中新", 60.0, true),
            row("1#", "HRB400E12", "徐钢", 60.0, true),
            row("1#", "HRB400E12", "沙钢", 20.0, false),
            Candidate::degenerate("1#", "HRB400E40", 3.0, DegenerateReason::NoStock),
        ];
        let kept = best_only(&rows);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.mill != "沙钢"));
        assert!(kept[2].is_degenerate());
    }

    #[test]
    fn test_export_row_rounding() {
        let r = ExportRow::from_candidate(&row("1#", "HRB400E12", "中新", 33.333, true), "zh-CN");
        assert_eq!(r.unit_weight, 2.667);
        assert_eq!(r.shipped_tonnage, 10.67);
        assert_eq!(r.profit, 333.33);
        assert_eq!(r.mill, "中新");
    }

    #[test]
    fn test_degenerate_label_in_mill_column() {
        let d = Candidate::degenerate("2#", "HRB400E8", 5.0, DegenerateReason::NoValidDifferential);
        assert_eq!(ExportRow::from_candidate(&d, "zh-CN").mill, "无有效价差");
        assert_eq!(ExportRow::from_candidate(&d, "en").mill, "No valid differential");
    }

    #[test]
    fn test_write_csv_with_localized_header() {
        let rows = vec![row("1#", "HRB400E12", "中新", 60.0, true)];

        let zh = written(&CsvExporter::default(), &rows);
        let mut lines = zh.lines();
        assert_eq!(
            lines.next().unwrap(),
            "楼号,规格,长度,钢厂,网价,到货价,价差,件重,计划吨位,发货件数,发货吨位,利润"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1#,HRB400E12,9m,中新,3660,3600,60,2.667,10,4,10.67,600"
        );

        let en = written(&CsvExporter::new("en").unwrap(), &rows);
        assert!(en.starts_with("Building,Spec,Length,Mill"));
    }

    #[test]
    fn test_unsupported_locale() {
        assert!(matches!(
            CsvExporter::new("fr"),
            Err(ExportError::UnsupportedLocale(_))
        ));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(export_file_name(date), "20240105_发货依据.csv");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let path = CsvExporter::default()
            .export_to_dir(&[row("1#", "HRB400E12", "中新", 60.0, true)], &out, date)
            .unwrap();
        assert_eq!(path, out.join("20240301_发货依据.csv"));
        assert!(fs::read(&path).unwrap().starts_with(UTF8_BOM));
    }
}
