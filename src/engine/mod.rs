// ==========================================
// 钢筋发货价差系统 - 引擎层
// ==========================================
// 职责: 价格解析、件数计算、候选枚举、排序标记
// 红线: 引擎不读文件,所有跳过的候选都记录原因
// ==========================================

pub mod candidate_enumerator;
pub mod orchestrator;
pub mod price_resolver;
pub mod quantity_planner;
pub mod ranker;

// 重导出核心引擎
pub use candidate_enumerator::CandidateEnumerator;
pub use orchestrator::{ShipmentReport, ShipmentSpreadEngine};
pub use price_resolver::{PriceQuery, PriceResolver, ResolvedPrice};
pub use quantity_planner::{QuantityPlanner, ShipmentQuantity};
pub use ranker::Ranker;
