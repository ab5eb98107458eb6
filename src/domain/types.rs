// ==========================================
// 钢筋发货价差系统 - 领域类型定义
// ==========================================
// 职责: 钢筋类型 / 价格类型 / 退化原因等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 钢筋类型 (Steel Type)
// ==========================================
// 盘螺按规格判定,其余均为螺纹钢
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SteelType {
    #[serde(rename = "螺纹钢")]
    Rebar, // 螺纹钢（直条）
    #[serde(rename = "盘螺")]
    Coil, // 盘螺
}

impl SteelType {
    /// 数据文件中使用的中文标签
    pub fn label(&self) -> &'static str {
        match self {
            SteelType::Rebar => "螺纹钢",
            SteelType::Coil => "盘螺",
        }
    }

    /// 从中文标签解析，未知标签返回 None
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "螺纹钢" => Some(SteelType::Rebar),
            "盘螺" => Some(SteelType::Coil),
            _ => None,
        }
    }
}

impl fmt::Display for SteelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 价格类型 (Price Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceKind {
    #[serde(rename = "网价")]
    Net, // 网价
    #[serde(rename = "到货价")]
    Arrival, // 到货价
}

impl PriceKind {
    pub fn label(&self) -> &'static str {
        match self {
            PriceKind::Net => "网价",
            PriceKind::Arrival => "到货价",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "网价" => Some(PriceKind::Net),
            "到货价" => Some(PriceKind::Arrival),
            _ => None,
        }
    }
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 退化原因 (Degenerate Reason)
// ==========================================
// 业务结果而非错误: 始终以占位行呈现给用户
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegenerateReason {
    NoStock,             // 无库存: 没有任何钢厂可发该规格
    NoValidDifferential, // 无有效价差: 有库存但价差全部 <= 0 或缺件重/基价
}

impl DegenerateReason {
    /// 国际化键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DegenerateReason::NoStock => "degenerate.no_stock",
            DegenerateReason::NoValidDifferential => "degenerate.no_valid_differential",
        }
    }
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoStock => write!(f, "无库存"),
            DegenerateReason::NoValidDifferential => write!(f, "无有效价差"),
        }
    }
}
