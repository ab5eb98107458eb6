// ==========================================
// 钢筋发货价差系统 - 核心库
// ==========================================
// 职责: 按钢厂/规格/长度比较网价与到货价, 生成发货依据
// 系统定位: 决策支持系统 (人工最终决定发货)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 价差计算规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎配置
pub mod config;

// 展示适配层 - 发货依据导出
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DegenerateReason, PriceKind, SteelType};

// 领域实体
pub use domain::{
    AvailabilityTable, BasePrice, BasePriceTable, Candidate, DemandLine, EngineInputs,
    PriceAdjustments, PriceRuleSet, ShipmentPlan, ShipmentSummary, SurchargeRule, WeightTable,
};

// 引擎
pub use engine::{
    CandidateEnumerator, PriceResolver, QuantityPlanner, Ranker, ShipmentReport,
    ShipmentSpreadEngine,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// 导入 / 导出
pub use export::{best_only, CsvExporter};
pub use importer::{InputFiles, TableLoader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "钢筋发货价差系统";
