// ==========================================
// 钢筋发货价差系统 - 发货需求与可发资源
// ==========================================
// 职责: 可发规格表 / 发货计划 / 引擎输入聚合
// ==========================================

use crate::domain::pricing::{BasePriceTable, PriceRuleSet, WeightTable};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// AvailabilityTable - 每日可发规格
// ==========================================
// 结构: 钢厂 → 规格 → 可发长度集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityTable {
    offers: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl AvailabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个可发长度（盘螺长度为空字符串）
    pub fn insert(&mut self, mill: &str, spec: &str, length: &str) {
        self.offers
            .entry(mill.to_string())
            .or_default()
            .entry(spec.to_string())
            .or_default()
            .insert(length.to_string());
    }

    /// 登记规格但不附带任何长度
    pub fn insert_spec(&mut self, mill: &str, spec: &str) {
        self.offers
            .entry(mill.to_string())
            .or_default()
            .entry(spec.to_string())
            .or_default();
    }

    /// 可发该规格的钢厂及其长度集合（按钢厂名升序）
    pub fn mills_offering<'a>(
        &'a self,
        spec: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a BTreeSet<String>)> + 'a {
        self.offers
            .iter()
            .filter_map(move |(mill, specs)| specs.get(spec).map(|lengths| (mill.as_str(), lengths)))
    }

    /// 是否至少有一家钢厂登记了该规格
    pub fn is_stocked(&self, spec: &str) -> bool {
        self.offers.values().any(|specs| specs.contains_key(spec))
    }

    pub fn mill_count(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

// ==========================================
// DemandLine - 单条发货需求
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct DemandLine {
    pub demand_group: String, // 楼号
    pub spec: String,         // 规格型号
    pub tonnage: f64,         // 所需吨位
}

// ==========================================
// ShipmentPlan - 发货计划
// ==========================================
// 结构: 楼号 → 规格 → 所需吨位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentPlan {
    lines: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ShipmentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入需求吨位，返回被覆盖的旧值
    pub fn insert(&mut self, demand_group: &str, spec: &str, tonnage: f64) -> Option<f64> {
        self.lines
            .entry(demand_group.to_string())
            .or_default()
            .insert(spec.to_string(), tonnage)
    }

    pub fn tonnage(&self, demand_group: &str, spec: &str) -> Option<f64> {
        self.lines.get(demand_group)?.get(spec).copied()
    }

    /// 按楼号、规格升序展开的需求行
    pub fn demand_lines(&self) -> impl Iterator<Item = DemandLine> + '_ {
        self.lines.iter().flat_map(|(group, specs)| {
            specs.iter().map(move |(spec, tonnage)| DemandLine {
                demand_group: group.clone(),
                spec: spec.clone(),
                tonnage: *tonnage,
            })
        })
    }

    pub fn line_count(&self) -> usize {
        self.lines.values().map(|specs| specs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

// ==========================================
// EngineInputs - 单次计算的全部输入
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct EngineInputs {
    pub price_rules: PriceRuleSet,
    pub weights: WeightTable,
    pub base_prices: BasePriceTable,
    pub availability: AvailabilityTable,
    pub plan: ShipmentPlan,
}
