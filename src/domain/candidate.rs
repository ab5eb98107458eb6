// ==========================================
// 钢筋发货价差系统 - 候选发货记录
// ==========================================
// 职责: 引擎输出行 + 汇总统计
// ==========================================

use crate::domain::types::DegenerateReason;
use serde::{Deserialize, Serialize};

// ==========================================
// Candidate - 候选发货记录（价差表的一行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    // ===== 需求 =====
    pub demand_group: String, // 楼号
    pub spec: String,         // 规格
    pub spec_sort_key: u64,   // 规格排序键

    // ===== 货源 =====
    pub length: String, // 长度（盘螺为空）
    pub mill: String,   // 钢厂（占位行为空）

    // ===== 价格（元/吨）=====
    pub net_price: f64,
    pub arrival_price: f64,
    pub differential: f64, // 价差 = 网价 - 到货价

    // ===== 数量 =====
    pub unit_weight: f64,     // 件重（吨/件）
    pub planned_tonnage: f64, // 计划吨位
    pub shipped_pieces: u64,  // 发货件数
    pub shipped_tonnage: f64, // 发货吨位

    pub profit: f64, // 价差 × 计划吨位

    // ===== 标记 =====
    pub is_best: bool,
    pub degenerate: Option<DegenerateReason>,
}

impl Candidate {
    /// 构造占位行（无库存 / 无有效价差）
    ///
    /// 计划吨位保留需求值，其余数值字段全部为 0
    pub fn degenerate(
        demand_group: &str,
        spec: &str,
        planned_tonnage: f64,
        reason: DegenerateReason,
    ) -> Self {
        Self {
            demand_group: demand_group.to_string(),
            spec: spec.to_string(),
            spec_sort_key: spec_sort_key(spec),
            length: String::new(),
            mill: String::new(),
            net_price: 0.0,
            arrival_price: 0.0,
            differential: 0.0,
            unit_weight: 0.0,
            planned_tonnage,
            shipped_pieces: 0,
            shipped_tonnage: 0.0,
            profit: 0.0,
            is_best: false,
            degenerate: Some(reason),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }

    /// 排序用价差（占位行按 0 处理）
    pub fn ranking_differential(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.differential
        }
    }

    /// 计入汇总的行: 最优且非占位
    pub fn counts_toward_summary(&self) -> bool {
        self.is_best && !self.is_degenerate()
    }
}

/// 规格排序键: 拼接规格中全部数字，无数字时为 0
///
/// 例如 HRB400E12 → 40012
pub fn spec_sort_key(spec: &str) -> u64 {
    spec.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d))
        })
}

// ==========================================
// ShipmentSummary - 汇总统计（仅含最优价差记录）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    pub planned_tonnage: f64,
    pub shipped_pieces: u64,
    pub shipped_tonnage: f64,
    pub profit: f64,
    pub best_rows: usize,
    pub degenerate_rows: usize,
}

impl ShipmentSummary {
    pub fn from_rows(rows: &[Candidate]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            if row.is_degenerate() {
                summary.degenerate_rows += 1;
            }
            if !row.counts_toward_summary() {
                continue;
            }
            summary.best_rows += 1;
            summary.planned_tonnage += row.planned_tonnage;
            summary.shipped_pieces = summary.shipped_pieces.saturating_add(row.shipped_pieces);
            summary.shipped_tonnage += row.shipped_tonnage;
            summary.profit += row.profit;
        }
        summary
    }
}
