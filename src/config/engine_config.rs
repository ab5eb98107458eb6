// ==========================================
// 钢筋发货价差系统 - 引擎配置
// ==========================================
// 职责: 吨位偏差 / 条件加价开关与规则 / 盘螺规格集合
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::pricing::SurchargeRule;
use crate::domain::types::SteelType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 吨位偏差下限（吨）
pub const TOLERANCE_MIN: f64 = 0.5;
/// 吨位偏差上限（吨）
pub const TOLERANCE_MAX: f64 = 2.0;
/// 默认吨位偏差（吨）
pub const DEFAULT_TOLERANCE: f64 = 1.0;

// ==========================================
// EngineConfig - 单次计算使用的配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 实际发货吨位与计划吨位的最大允许偏差（吨）
    #[serde(default = "default_tolerance")]
    pub tonnage_tolerance: f64,

    /// 条件加价总开关
    #[serde(default = "default_true")]
    pub surcharge_enabled: bool,

    /// 条件加价规则（按顺序逐条判定，命中金额累加）
    #[serde(default = "default_surcharge_rules")]
    pub surcharge_rules: Vec<SurchargeRule>,

    /// 盘螺规格集合（件重查表忽略长度）
    #[serde(default = "default_coil_specs")]
    pub coil_specs: BTreeSet<String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_true() -> bool {
    true
}

fn default_surcharge_rules() -> Vec<SurchargeRule> {
    vec![SurchargeRule::twelve_meter_default()]
}

fn default_coil_specs() -> BTreeSet<String> {
    ["HRB400E6", "HRB400E8", "HRB400E10"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tonnage_tolerance: default_tolerance(),
            surcharge_enabled: default_true(),
            surcharge_rules: default_surcharge_rules(),
            coil_specs: default_coil_specs(),
        }
    }
}

impl EngineConfig {
    /// 校验配置取值
    pub fn validate(&self) -> ConfigResult<()> {
        let t = self.tonnage_tolerance;
        if !t.is_finite() || !(TOLERANCE_MIN..=TOLERANCE_MAX).contains(&t) {
            return Err(ConfigError::ToleranceOutOfRange {
                value: t,
                min: TOLERANCE_MIN,
                max: TOLERANCE_MAX,
            });
        }

        for rule in &self.surcharge_rules {
            if !rule.amount.is_finite() || rule.amount < 0.0 {
                return Err(ConfigError::InvalidSurchargeAmount {
                    name: rule.name.clone(),
                    amount: rule.amount,
                });
            }
        }

        Ok(())
    }

    pub fn is_coil(&self, spec: &str) -> bool {
        self.coil_specs.contains(spec)
    }

    /// 由规格推导钢筋类型
    pub fn steel_type_of(&self, spec: &str) -> SteelType {
        if self.is_coil(spec) {
            SteelType::Coil
        } else {
            SteelType::Rebar
        }
    }

    /// 当前生效的条件加价规则（总开关关闭时为空）
    pub fn active_surcharges(&self) -> &[SurchargeRule] {
        if self.surcharge_enabled {
            &self.surcharge_rules
        } else {
            &[]
        }
    }
}
