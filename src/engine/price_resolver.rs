// ==========================================
// 钢筋发货价差系统 - 价格规则解析器
// ==========================================
// 职责: 基价 + 规格加价 + 条件加价 → 网价/到货价/价差
// 红线: 查表缺失不报错,回落到基价且价差为 0
// ==========================================

use crate::domain::pricing::{BasePrice, PriceRuleSet, SurchargeRule};
use crate::domain::types::SteelType;
use serde::Serialize;
use tracing::trace;

/// 单个货源的价格查询参数
#[derive(Debug, Clone, Copy)]
pub struct PriceQuery<'q> {
    pub mill: &'q str,
    pub steel_type: SteelType,
    pub spec: &'q str,
    pub length: &'q str,
    pub base: BasePrice,
}

/// 价格解析结果（元/吨）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPrice {
    pub differential: f64,
    pub net_price: f64,
    pub arrival_price: f64,
}

impl ResolvedPrice {
    /// 无规则回落: 基价原样返回，价差记 0
    fn fallback(base: BasePrice) -> Self {
        Self {
            differential: 0.0,
            net_price: base.net,
            arrival_price: base.arrival,
        }
    }
}

// ==========================================
// PriceResolver - 价格规则解析器
// ==========================================
pub struct PriceResolver<'a> {
    rules: &'a PriceRuleSet,
    surcharges: &'a [SurchargeRule],
}

impl<'a> PriceResolver<'a> {
    /// # 参数
    /// - `rules`: 规格加价规则集
    /// - `surcharges`: 当前生效的条件加价规则（总开关关闭时传空切片）
    pub fn new(rules: &'a PriceRuleSet, surcharges: &'a [SurchargeRule]) -> Self {
        Self { rules, surcharges }
    }

    /// 计算调整后的网价、到货价及价差
    ///
    /// 规则:
    /// 1) 该钢厂/钢筋类型缺少网价或到货价规则 → 回落（价差 0）
    /// 2) 网价 = 网价基价 + 网价规格加价
    /// 3) 到货价 = 到货价基价 + 到货价规格加价
    /// 4) 每条命中的条件加价累加到网价
    pub fn resolve(&self, query: &PriceQuery<'_>) -> ResolvedPrice {
        let Some((net_adj, arrival_adj)) = self.rules.net_and_arrival(query.mill, query.steel_type)
        else {
            trace!(
                mill = query.mill,
                steel_type = %query.steel_type,
                "无加价规则, 回落到基价"
            );
            return ResolvedPrice::fallback(query.base);
        };

        let surcharge = self.surcharge_for(query.mill, query.length, query.spec);
        let net_price = query.base.net + net_adj.addition_or_zero(query.spec) + surcharge;
        let arrival_price = query.base.arrival + arrival_adj.addition_or_zero(query.spec);

        ResolvedPrice {
            differential: net_price - arrival_price,
            net_price,
            arrival_price,
        }
    }

    /// 命中的条件加价合计
    pub fn surcharge_for(&self, mill: &str, length: &str, spec: &str) -> f64 {
        self.surcharges
            .iter()
            .filter(|rule| rule.matches(mill, length, spec))
            .map(|rule| rule.amount)
            .sum()
    }
}
