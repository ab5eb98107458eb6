// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use rebar_spread::domain::pricing::BasePrice;
use rebar_spread::domain::shipment::EngineInputs;
use rebar_spread::domain::types::{PriceKind, SteelType};
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// EngineInputs 构建器
// ==========================================

#[derive(Default)]
pub struct InputsBuilder {
    inputs: EngineInputs,
}

impl InputsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_price(mut self, mill: &str, steel_type: SteelType, net: f64, arrival: f64) -> Self {
        self.inputs
            .base_prices
            .insert(mill, steel_type, BasePrice::new(net, arrival));
        self
    }

    /// 网价/到货价加价同时写入
    pub fn additions(
        mut self,
        mill: &str,
        steel_type: SteelType,
        spec: &str,
        net: f64,
        arrival: f64,
    ) -> Self {
        self.inputs
            .price_rules
            .set_addition(mill, steel_type, PriceKind::Net, spec, net);
        self.inputs
            .price_rules
            .set_addition(mill, steel_type, PriceKind::Arrival, spec, arrival);
        self
    }

    pub fn weight(mut self, mill: &str, spec: &str, length: &str, weight: f64) -> Self {
        self.inputs.weights.insert(mill, spec, length, weight);
        self
    }

    pub fn available(mut self, mill: &str, spec: &str, length: &str) -> Self {
        self.inputs.availability.insert(mill, spec, length);
        self
    }

    pub fn demand(mut self, group: &str, spec: &str, tonnage: f64) -> Self {
        self.inputs.plan.insert(group, spec, tonnage);
        self
    }

    pub fn build(self) -> EngineInputs {
        self.inputs
    }
}

/// 三家钢厂的标准场景
///
/// - 1# HRB400E12: 中新 9m 与徐钢 9m 价差同为 90, 徐钢 12m 叠加条件加价后为 120
/// - 1# HRB400E8: 仅中新盘螺可发
/// - 2# HRB400E40: 无库存
/// - 沙钢 HRB400E12 价差为 0, 始终被剔除
pub fn standard_inputs() -> EngineInputs {
    InputsBuilder::new()
        .base_price("中新", SteelType::Rebar, 3600.0, 3550.0)
        .base_price("徐钢", SteelType::Rebar, 3580.0, 3550.0)
        .base_price("沙钢", SteelType::Rebar, 3600.0, 3600.0)
        .base_price("中新", SteelType::Coil, 3800.0, 3700.0)
        .additions("中新", SteelType::Rebar, "HRB400E12", 60.0, 20.0)
        .additions("徐钢", SteelType::Rebar, "HRB400E12", 60.0, 0.0)
        .additions("沙钢", SteelType::Rebar, "HRB400E12", 0.0, 0.0)
        .additions("中新", SteelType::Coil, "HRB400E8", 0.0, 0.0)
        .available("中新", "HRB400E12", "9m")
        .available("徐钢", "HRB400E12", "9m")
        .available("徐钢", "HRB400E12", "12m")
        .available("沙钢", "HRB400E12", "9m")
        .available("中新", "HRB400E8", "")
        .weight("中新", "HRB400E12", "9m", 2.0)
        .weight("徐钢", "HRB400E12", "9m", 2.0)
        .weight("徐钢", "HRB400E12", "12m", 2.667)
        .weight("沙钢", "HRB400E12", "9m", 2.0)
        .weight("中新", "HRB400E8", "", 2.1)
        .demand("1#", "HRB400E12", 10.4)
        .demand("1#", "HRB400E8", 5.0)
        .demand("2#", "HRB400E40", 3.0)
        .demand("2#", "HRB400E12", 4.0)
        .build()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ==========================================
// 输入文件构建
// ==========================================

pub const PRICING_RULES_JSON: &str = r#"{
  "中新": {
    "网价": {
      "螺纹钢": {"base_spec": "HRB400E20", "additions": {"HRB400E12": 60}},
      "盘螺": {"base_spec": "HRB400E8", "additions": {}}
    },
    "到货价": {
      "螺纹钢": {"base_spec": "HRB400E20", "additions": {"HRB400E12": 20}},
      "盘螺": {"base_spec": "HRB400E8", "additions": {}}
    }
  },
  "徐钢": {
    "网价": {"螺纹钢": {"base_spec": "HRB400E20", "additions": {"HRB400E12": 60}}},
    "到货价": {"螺纹钢": {"base_spec": "HRB400E20", "additions": {}}}
  }
}"#;

pub const WEIGHTS_CSV: &str = "钢厂品牌,规格型号,长度,重量（件）
中新,HRB400E12,9m,2.0
中新,HRB400E8,,2.1
徐钢,HRB400E12,9m,2.0
徐钢,HRB400E12,12m,2.667
";

pub const BASE_PRICES_CSV: &str = "钢厂,钢筋类型,网价基价,到货价基价
中新,螺纹钢,3600,3550
中新,盘螺,3800,3700
徐钢,螺纹钢,3580,3550
沙钢,螺纹钢,0,3500
";

pub const AVAILABILITY_CSV: &str = "钢厂,规格型号,长度,是否可发
中新,HRB400E12,9m,1
,HRB400E8,,1
,HRB400E14,9m,0

徐钢,HRB400E12,9m,1
,HRB400E12,12m,1
";

pub const SHIPMENT_PLAN_CSV: &str = "楼号,规格型号,所需吨位
1#,HRB400E12,10.4
1#,HRB400E8,5
2#,HRB400E40,3
2#,HRB400E14,0
";

/// 一次计算所需的全部输入文件
pub struct FixtureFiles {
    pub pricing_rules: PathBuf,
    pub weights: PathBuf,
    pub base_prices: PathBuf,
    pub availability: PathBuf,
    pub shipment_plan: PathBuf,
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn write_fixture_files(dir: &Path) -> FixtureFiles {
    FixtureFiles {
        pricing_rules: write(dir, "pricing_rules.json", PRICING_RULES_JSON),
        weights: write(dir, "钢厂件重数据.csv", WEIGHTS_CSV),
        base_prices: write(dir, "基价.csv", BASE_PRICES_CSV),
        availability: write(dir, "可发规格.csv", AVAILABILITY_CSV),
        shipment_plan: write(dir, "发货计划.csv", SHIPMENT_PLAN_CSV),
    }
}
