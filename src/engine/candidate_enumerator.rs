// ==========================================
// 钢筋发货价差系统 - 候选货源枚举
// ==========================================
// 职责: 每条发货需求 × 可发钢厂 × 可发长度 → 候选记录
// 输入: 引擎输入表 + 配置
// 输出: 未排序的候选记录（含占位行）
// 红线: 单个候选失败只丢弃该候选,不中断整体计算
// ==========================================

use crate::config::EngineConfig;
use crate::domain::candidate::{spec_sort_key, Candidate};
use crate::domain::shipment::{DemandLine, EngineInputs};
use crate::domain::types::DegenerateReason;
use crate::engine::price_resolver::{PriceQuery, PriceResolver};
use crate::engine::quantity_planner::QuantityPlanner;
use tracing::debug;

// ==========================================
// CandidateEnumerator - 候选货源枚举器
// ==========================================
pub struct CandidateEnumerator<'a> {
    inputs: &'a EngineInputs,
    config: &'a EngineConfig,
    resolver: PriceResolver<'a>,
    planner: QuantityPlanner,
}

impl<'a> CandidateEnumerator<'a> {
    pub fn new(inputs: &'a EngineInputs, config: &'a EngineConfig) -> Self {
        Self {
            inputs,
            config,
            resolver: PriceResolver::new(&inputs.price_rules, config.active_surcharges()),
            planner: QuantityPlanner::new(config.tonnage_tolerance),
        }
    }

    /// 枚举全部发货需求的候选记录
    pub fn enumerate(&self) -> Vec<Candidate> {
        self.inputs
            .plan
            .demand_lines()
            .flat_map(|line| self.enumerate_line(&line))
            .collect()
    }

    /// 枚举单条发货需求的候选记录
    ///
    /// 规则:
    /// 1) 无任何钢厂可发该规格 → 一行"无库存"
    /// 2) 钢厂缺少可用基价 → 跳过该钢厂
    /// 3) 价差 <= 0 → 跳过该长度
    /// 4) 件重缺失或 <= 0 → 跳过该长度
    /// 5) 全部被跳过 → 一行"无有效价差"
    pub fn enumerate_line(&self, line: &DemandLine) -> Vec<Candidate> {
        let spec = line.spec.as_str();

        if !self.inputs.availability.is_stocked(spec) {
            debug!(
                demand_group = %line.demand_group,
                spec,
                "无库存"
            );
            return vec![Candidate::degenerate(
                &line.demand_group,
                spec,
                line.tonnage,
                DegenerateReason::NoStock,
            )];
        }

        let coil = self.config.is_coil(spec);
        let steel_type = self.config.steel_type_of(spec);
        let mut rows = Vec::new();

        for (mill, lengths) in self.inputs.availability.mills_offering(spec) {
            let Some(base) = self.inputs.base_prices.usable(mill, steel_type) else {
                debug!(mill, steel_type = %steel_type, "缺少可用基价, 跳过钢厂");
                continue;
            };

            for length in lengths {
                let price = self.resolver.resolve(&PriceQuery {
                    mill,
                    steel_type,
                    spec,
                    length,
                    base,
                });
                if price.differential <= 0.0 {
                    debug!(mill, spec, length = %length, differential = price.differential, "价差非正, 跳过");
                    continue;
                }

                let unit_weight = match self.inputs.weights.unit_weight(mill, spec, length, coil) {
                    Some(w) if w > 0.0 => w,
                    _ => {
                        debug!(mill, spec, length = %length, "件重缺失, 跳过");
                        continue;
                    }
                };

                let quantity = self.planner.plan(line.tonnage, unit_weight);

                rows.push(Candidate {
                    demand_group: line.demand_group.clone(),
                    spec: spec.to_string(),
                    spec_sort_key: spec_sort_key(spec),
                    length: length.clone(),
                    mill: mill.to_string(),
                    net_price: price.net_price,
                    arrival_price: price.arrival_price,
                    differential: price.differential,
                    unit_weight,
                    planned_tonnage: line.tonnage,
                    shipped_pieces: quantity.pieces,
                    shipped_tonnage: quantity.tonnage,
                    // 利润按计划吨位计
                    profit: price.differential * line.tonnage,
                    is_best: false,
                    degenerate: None,
                });
            }
        }

        if rows.is_empty() {
            debug!(
                demand_group = %line.demand_group,
                spec,
                "无有效价差"
            );
            rows.push(Candidate::degenerate(
                &line.demand_group,
                spec,
                line.tonnage,
                DegenerateReason::NoValidDifferential,
            ));
        }

        rows
    }
}
