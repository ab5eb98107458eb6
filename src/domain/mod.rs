// ==========================================
// 钢筋发货价差系统 - 领域模型层
// ==========================================
// 职责: 定义参考数据表、发货需求、候选记录与类型
// 红线: 不含文件解析逻辑,不含引擎逻辑
// ==========================================

pub mod candidate;
pub mod pricing;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use candidate::{spec_sort_key, Candidate, ShipmentSummary};
pub use pricing::{
    BasePrice, BasePriceTable, PriceAdjustments, PriceRuleSet, SurchargeRule, WeightTable,
    COIL_LENGTH_KEY,
};
pub use shipment::{AvailabilityTable, DemandLine, EngineInputs, ShipmentPlan};
pub use types::{DegenerateReason, PriceKind, SteelType};
