// ==========================================
// 钢筋发货价差系统 - 价格参考数据
// ==========================================
// 职责: 加价规则 / 条件加价 / 每日基价 / 件重表
// 红线: 查表缺失一律按默认值处理,不报错
// ==========================================

use crate::domain::types::{PriceKind, SteelType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 盘螺件重查表使用的长度键（忽略实际长度）
pub const COIL_LENGTH_KEY: &str = "";

// ==========================================
// PriceAdjustments - 单一价格类型下的规格加价
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceAdjustments {
    pub base_spec: Option<String>,          // 基准规格（仅说明用途）
    pub additions: BTreeMap<String, f64>, // 规格 → 加价（元/吨）
}

impl PriceAdjustments {
    /// 规格加价，未配置的规格视为 0
    pub fn addition_or_zero(&self, spec: &str) -> f64 {
        self.additions.get(spec).copied().unwrap_or(0.0)
    }
}

// ==========================================
// PriceRuleSet - 加价规则集
// ==========================================
// 结构: 钢厂 → 钢筋类型 → 价格类型 → 规格加价
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceRuleSet {
    rules: BTreeMap<String, BTreeMap<SteelType, BTreeMap<PriceKind, PriceAdjustments>>>,
}

impl PriceRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 覆盖写入某钢厂/钢筋类型/价格类型的整组加价
    pub fn insert(
        &mut self,
        mill: &str,
        steel_type: SteelType,
        kind: PriceKind,
        adjustments: PriceAdjustments,
    ) {
        self.rules
            .entry(mill.to_string())
            .or_default()
            .entry(steel_type)
            .or_default()
            .insert(kind, adjustments);
    }

    /// 写入单个规格加价（不存在的层级自动创建）
    pub fn set_addition(
        &mut self,
        mill: &str,
        steel_type: SteelType,
        kind: PriceKind,
        spec: &str,
        amount: f64,
    ) {
        self.rules
            .entry(mill.to_string())
            .or_default()
            .entry(steel_type)
            .or_default()
            .entry(kind)
            .or_default()
            .additions
            .insert(spec.to_string(), amount);
    }

    pub fn adjustments(
        &self,
        mill: &str,
        steel_type: SteelType,
        kind: PriceKind,
    ) -> Option<&PriceAdjustments> {
        self.rules.get(mill)?.get(&steel_type)?.get(&kind)
    }

    /// 网价与到货价加价均已配置时返回二者
    pub fn net_and_arrival(
        &self,
        mill: &str,
        steel_type: SteelType,
    ) -> Option<(&PriceAdjustments, &PriceAdjustments)> {
        Some((
            self.adjustments(mill, steel_type, PriceKind::Net)?,
            self.adjustments(mill, steel_type, PriceKind::Arrival)?,
        ))
    }

    pub fn mill_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ==========================================
// SurchargeRule - 条件加价规则
// ==========================================
// 仅作用于网价; 多条规则同时命中时金额累加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    #[serde(default)]
    pub name: String,
    pub mills: BTreeSet<String>,
    pub length: String,
    pub specs: BTreeSet<String>,
    pub amount: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SurchargeRule {
    /// 判断规则是否命中（已禁用的规则永不命中）
    pub fn matches(&self, mill: &str, length: &str, spec: &str) -> bool {
        self.enabled
            && self.length == length
            && self.mills.contains(mill)
            && self.specs.contains(spec)
    }

    /// 徐钢/河南闽源/中新 12m 螺纹钢加价 30 元/吨
    pub fn twelve_meter_default() -> Self {
        Self {
            name: "12m定尺加价".to_string(),
            mills: ["徐钢", "河南闽源", "中新"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            length: "12m".to_string(),
            specs: [12, 14, 16, 18, 20, 22, 25]
                .iter()
                .map(|d| format!("HRB400E{}", d))
                .collect(),
            amount: 30.0,
            enabled: true,
        }
    }
}

// ==========================================
// BasePrice / BasePriceTable - 每日基价
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePrice {
    pub net: f64,     // 网价基价
    pub arrival: f64, // 到货价基价
}

impl BasePrice {
    pub fn new(net: f64, arrival: f64) -> Self {
        Self { net, arrival }
    }

    /// 两个基价均为正数才可用
    pub fn is_usable(&self) -> bool {
        self.net > 0.0 && self.arrival > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasePriceTable {
    prices: BTreeMap<String, BTreeMap<SteelType, BasePrice>>,
}

impl BasePriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mill: &str, steel_type: SteelType, price: BasePrice) {
        self.prices
            .entry(mill.to_string())
            .or_default()
            .insert(steel_type, price);
    }

    /// 可用基价（缺失或非正数返回 None）
    pub fn usable(&self, mill: &str, steel_type: SteelType) -> Option<BasePrice> {
        self.prices
            .get(mill)?
            .get(&steel_type)
            .copied()
            .filter(BasePrice::is_usable)
    }

    pub fn len(&self) -> usize {
        self.prices.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ==========================================
// WeightTable - 钢厂件重表
// ==========================================
// 结构: 钢厂 → 规格 → 长度 → 件重（吨/件）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mill: &str, spec: &str, length: &str, weight: f64) {
        self.weights
            .entry(mill.to_string())
            .or_default()
            .entry(spec.to_string())
            .or_default()
            .insert(length.to_string(), weight);
    }

    pub fn get(&self, mill: &str, spec: &str, length: &str) -> Option<f64> {
        self.weights.get(mill)?.get(spec)?.get(length).copied()
    }

    /// 件重查表: 盘螺忽略长度,统一使用空长度键
    pub fn unit_weight(&self, mill: &str, spec: &str, length: &str, coil: bool) -> Option<f64> {
        let key = if coil { COIL_LENGTH_KEY } else { length };
        self.get(mill, spec, key)
    }

    pub fn len(&self) -> usize {
        self.weights
            .values()
            .flat_map(|specs| specs.values())
            .map(|lengths| lengths.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
