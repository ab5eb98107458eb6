// ==========================================
// 钢筋发货价差系统 - 价差排序与最优标记
// ==========================================
// 职责: 同楼号同规格内标记最高价差行, 全局排序, 汇总统计
// 排序键:
// 1) 楼号升序
// 2) 规格排序键升序（规格数字）
// 3) 规格文本升序（排序键相同时保持分组连续）
// 4) 价差降序（占位行按 0）
// ==========================================

use crate::domain::candidate::{Candidate, ShipmentSummary};
use std::cmp::Ordering;
use std::collections::HashMap;

// ==========================================
// Ranker - 价差排序器
// ==========================================
pub struct Ranker {
    // 无状态引擎,不需要注入依赖
}

impl Ranker {
    pub fn new() -> Self {
        Self {}
    }

    /// 标记最优行并排序
    pub fn rank(&self, mut rows: Vec<Candidate>) -> Vec<Candidate> {
        self.mark_best(&mut rows);
        self.sort(&mut rows);
        rows
    }

    /// 标记每组价差最高的行
    ///
    /// 第一遍按 (楼号, 规格) 求非占位行的最大价差,
    /// 第二遍标记价差等于最大值的全部行（并列全部标记）
    pub fn mark_best(&self, rows: &mut [Candidate]) {
        let mut group_max: HashMap<(&str, &str), f64> = HashMap::new();
        for row in rows.iter().filter(|r| !r.is_degenerate()) {
            group_max
                .entry((row.demand_group.as_str(), row.spec.as_str()))
                .and_modify(|max| {
                    if row.differential > *max {
                        *max = row.differential;
                    }
                })
                .or_insert(row.differential);
        }

        // 借用结束前先把最大值取出
        let flags: Vec<bool> = rows
            .iter()
            .map(|row| {
                !row.is_degenerate()
                    && group_max
                        .get(&(row.demand_group.as_str(), row.spec.as_str()))
                        .map_or(false, |max| row.differential == *max)
            })
            .collect();

        for (row, is_best) in rows.iter_mut().zip(flags) {
            row.is_best = is_best;
        }
    }

    /// 全局稳定排序
    pub fn sort(&self, rows: &mut [Candidate]) {
        rows.sort_by(compare);
    }

    /// 汇总统计（仅最优且非占位行）
    pub fn summarize(&self, rows: &[Candidate]) -> ShipmentSummary {
        ShipmentSummary::from_rows(rows)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// 价差表行比较
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    a.demand_group
        .cmp(&b.demand_group)
        .then_with(|| a.spec_sort_key.cmp(&b.spec_sort_key))
        .then_with(|| a.spec.cmp(&b.spec))
        .then_with(|| {
            b.ranking_differential()
                .total_cmp(&a.ranking_differential())
        })
}
