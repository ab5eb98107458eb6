// ==========================================
// 钢筋发货价差系统 - 字段映射器实现
// ==========================================
// 职责: 源列名(含别名) → 标准字段 + 类型转换
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, RawTable};

/// 标准列名
pub mod columns {
    pub const MILL: &str = "钢厂";
    pub const MILL_BRAND: &str = "钢厂品牌";
    pub const SPEC: &str = "规格型号";
    pub const LENGTH: &str = "长度";
    pub const PIECE_WEIGHT: &str = "重量（件）";
    pub const STEEL_TYPE: &str = "钢筋类型";
    pub const BASE_NET: &str = "网价基价";
    pub const BASE_ARRIVAL: &str = "到货价基价";
    pub const AVAILABLE: &str = "是否可发";
    pub const BUILDING: &str = "楼号";
    pub const REQUIRED_TONNAGE: &str = "所需吨位";
}

pub struct FieldMapper;

impl FieldMapper {
    /// 列名别名（第一个为标准名）
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            columns::MILL => &["钢厂", "钢厂品牌"],
            columns::MILL_BRAND => &["钢厂品牌", "钢厂"],
            columns::SPEC => &["规格型号", "规格"],
            columns::PIECE_WEIGHT => &["重量（件）", "重量(件)", "件重"],
            columns::REQUIRED_TONNAGE => &["所需吨位", "计划吨位"],
            columns::LENGTH => &["长度"],
            columns::STEEL_TYPE => &["钢筋类型"],
            columns::BASE_NET => &["网价基价"],
            columns::BASE_ARRIVAL => &["到货价基价"],
            columns::AVAILABLE => &["是否可发"],
            columns::BUILDING => &["楼号"],
            _ => &[],
        }
    }

    /// 表头是否包含该字段（含别名）
    pub fn has_column(&self, table: &RawTable, key: &str) -> bool {
        table.has_column(key) || Self::aliases(key).iter().any(|a| table.has_column(a))
    }

    /// 校验必要列
    pub fn require_columns(
        &self,
        table: &RawTable,
        table_name: &str,
        required: &[&str],
    ) -> ImportResult<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|key| !self.has_column(table, key))
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                table: table_name.to_string(),
                columns: missing,
            })
        }
    }

    /// 提取字符串字段，空值返回 None
    pub fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        std::iter::once(key)
            .chain(Self::aliases(key).iter().copied())
            .filter_map(|alias| row.get(alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// 解析浮点数，空值返回 None
    ///
    /// NaN / inf 视同空值
    pub fn parse_f64(
        &self,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        let Some(value) = self.get_string(row, key) else {
            return Ok(None);
        };
        let parsed = value
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })?;
        Ok(Some(parsed).filter(|v| v.is_finite()))
    }

    /// 解析可发标记（1/Y/是/TRUE 为可发）
    pub fn parse_flag(&self, row: &RawRecord, key: &str) -> bool {
        match self.get_string(row, key) {
            None => false,
            Some(v) => {
                let upper = v.to_uppercase();
                match upper.as_str() {
                    "1" | "Y" | "是" | "TRUE" => true,
                    other => other.parse::<f64>().map(|n| n == 1.0).unwrap_or(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_get_string_with_alias() {
        let mapper = FieldMapper;
        let row = record(&[("钢厂品牌", "中新"), ("规格", " HRB400E12 ")]);
        assert_eq!(mapper.get_string(&row, columns::MILL), Some("中新".to_string()));
        assert_eq!(
            mapper.get_string(&row, columns::SPEC),
            Some("HRB400E12".to_string())
        );
        assert_eq!(mapper.get_string(&row, columns::LENGTH), None);
    }

    #[test]
    fn test_parse_f64() {
        let mapper = FieldMapper;
        let row = record(&[("网价基价", "3,650.5"), ("到货价基价", "abc")]);
        assert_eq!(mapper.parse_f64(&row, columns::BASE_NET, 2).unwrap(), Some(3650.5));
        let err = mapper.parse_f64(&row, columns::BASE_ARRIVAL, 7).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 7, .. }));
        assert_eq!(mapper.parse_f64(&row, columns::REQUIRED_TONNAGE, 2).unwrap(), None);
    }

    #[test]
    fn test_parse_f64_non_finite_is_missing() {
        let mapper = FieldMapper;
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            let row = record(&[("所需吨位", raw)]);
            assert_eq!(
                mapper.parse_f64(&row, columns::REQUIRED_TONNAGE, 2).unwrap(),
                None,
                "raw={}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_flag() {
        let mapper = FieldMapper;
        for (raw, expected) in [("1", true), ("1.0", true), ("是", true), ("0", false), ("", false)] {
            let row = record(&[("是否可发", raw)]);
            assert_eq!(mapper.parse_flag(&row, columns::AVAILABLE), expected, "raw={}", raw);
        }
    }

    #[test]
    fn test_require_columns_lists_missing() {
        let mapper = FieldMapper;
        let table = RawTable {
            headers: vec!["楼号".to_string(), "规格".to_string()],
            records: vec![],
        };
        let err = mapper
            .require_columns(
                &table,
                "发货计划",
                &[columns::BUILDING, columns::SPEC, columns::REQUIRED_TONNAGE],
            )
            .unwrap_err();
        match err {
            ImportError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["所需吨位".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
