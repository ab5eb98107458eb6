// ==========================================
// 钢筋发货价差系统 - 发货件数计算
// ==========================================
// 职责: 计划吨位 + 件重 → 整件数与实际发货吨位
// 约束: 短缺超过允许偏差时多发一件,否则按向下取整发货
// ==========================================

use serde::Serialize;

/// 发货数量
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShipmentQuantity {
    pub pieces: u64,
    pub tonnage: f64,
}

impl ShipmentQuantity {
    /// 不可计算（吨位或件重非正）
    pub const NONE: ShipmentQuantity = ShipmentQuantity {
        pieces: 0,
        tonnage: 0.0,
    };

    fn of(pieces: u64, unit_weight: f64) -> Self {
        Self {
            pieces,
            tonnage: pieces as f64 * unit_weight,
        }
    }
}

// ==========================================
// QuantityPlanner - 发货件数计算
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct QuantityPlanner {
    tolerance: f64,
}

impl QuantityPlanner {
    /// # 参数
    /// - `tolerance`: 允许的最大吨位偏差（吨）
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// 计算发货件数
    ///
    /// 规则:
    /// 1) 吨位或件重 <= 0 → (0, 0)
    /// 2) 向下取整件数为 0 → 至少发 1 件（此时偏差可能超过容差）
    /// 3) 短缺吨位 > 容差 → 多发 1 件
    /// 4) 否则按向下取整件数发货
    pub fn plan(&self, tonnage: f64, unit_weight: f64) -> ShipmentQuantity {
        if !(tonnage > 0.0) || !(unit_weight > 0.0) {
            return ShipmentQuantity::NONE;
        }

        // 浮点转整数在超出 u64 范围时饱和
        let base_pieces = (tonnage / unit_weight).floor() as u64;
        if base_pieces == 0 {
            return ShipmentQuantity::of(1, unit_weight);
        }

        let shortfall = tonnage - base_pieces as f64 * unit_weight;
        if shortfall > self.tolerance {
            ShipmentQuantity::of(base_pieces.saturating_add(1), unit_weight)
        } else {
            ShipmentQuantity::of(base_pieces, unit_weight)
        }
    }
}
