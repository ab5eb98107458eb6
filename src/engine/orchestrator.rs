// ==========================================
// 钢筋发货价差系统 - 引擎编排器
// ==========================================
// 用途: 协调候选枚举与价差排序的执行顺序
// 约束: 每次计算完全重算,不跨次共享任何可变状态
// ==========================================

use crate::config::{ConfigResult, EngineConfig};
use crate::domain::candidate::{Candidate, ShipmentSummary};
use crate::domain::shipment::EngineInputs;
use crate::engine::candidate_enumerator::CandidateEnumerator;
use crate::engine::ranker::Ranker;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// ShipmentReport - 价差表计算结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: EngineConfig,
    pub rows: Vec<Candidate>,
    pub summary: ShipmentSummary,
}

impl ShipmentReport {
    /// 占位行（无库存 / 无有效价差）
    pub fn degenerate_rows(&self) -> impl Iterator<Item = &Candidate> {
        self.rows.iter().filter(|r| r.is_degenerate())
    }

    /// 每组最优行
    pub fn best_rows(&self) -> impl Iterator<Item = &Candidate> {
        self.rows.iter().filter(|r| r.counts_toward_summary())
    }
}

// ==========================================
// ShipmentSpreadEngine - 价差表引擎
// ==========================================
pub struct ShipmentSpreadEngine {
    config: EngineConfig,
    ranker: Ranker,
}

impl ShipmentSpreadEngine {
    /// 创建引擎（配置先校验）
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ranker: Ranker::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 执行完整计算流程
    ///
    /// # 参数
    /// - inputs: 加价规则 / 件重 / 基价 / 可发规格 / 发货计划
    ///
    /// # 返回
    /// 已排序、已标记最优行的价差表及汇总
    pub fn run(&self, inputs: &EngineInputs) -> ShipmentReport {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            demand_lines = inputs.plan.line_count(),
            mills = inputs.availability.mill_count(),
            tonnage_tolerance = self.config.tonnage_tolerance,
            surcharge_enabled = self.config.surcharge_enabled,
            "开始生成发货价差表"
        );

        // ==========================================
        // 步骤1: 候选货源枚举
        // ==========================================
        debug!("步骤1: 枚举候选货源");
        let candidates = CandidateEnumerator::new(inputs, &self.config).enumerate();

        // ==========================================
        // 步骤2: 排序 + 最优标记
        // ==========================================
        debug!(candidates = candidates.len(), "步骤2: 排序并标记最优价差");
        let rows = self.ranker.rank(candidates);

        // ==========================================
        // 步骤3: 汇总
        // ==========================================
        let summary = self.ranker.summarize(&rows);

        if summary.degenerate_rows > 0 {
            warn!(
                %run_id,
                degenerate_rows = summary.degenerate_rows,
                "存在无库存或无有效价差的规格"
            );
        }

        info!(
            %run_id,
            rows = rows.len(),
            best_rows = summary.best_rows,
            planned_tonnage = summary.planned_tonnage,
            shipped_pieces = summary.shipped_pieces,
            profit = summary.profit,
            "发货价差表生成完成"
        );

        ShipmentReport {
            run_id,
            generated_at: Utc::now(),
            config: self.config.clone(),
            rows,
            summary,
        }
    }
}
