// ==========================================
// 钢筋发货价差系统 - 输入表加载器
// ==========================================
// 职责: 原始记录 → 引擎输入表
// 覆盖: 加价规则(JSON) / 件重 / 每日基价 / 每日可发规格 / 发货计划
// 红线: 缺少必要列直接报错; 无效行按规则过滤并记录日志
// ==========================================

use crate::domain::pricing::{
    BasePrice, BasePriceTable, PriceAdjustments, PriceRuleSet, WeightTable,
};
use crate::domain::shipment::{AvailabilityTable, EngineInputs, ShipmentPlan};
use crate::domain::types::{PriceKind, SteelType};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{columns, FieldMapper};
use crate::importer::file_parser::{is_blank, RawTable, UniversalFileParser};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// 加价规则文件中的单个条目
#[derive(Debug, Deserialize)]
struct RuleFileEntry {
    #[serde(default)]
    base_spec: Option<String>,
    #[serde(default)]
    additions: BTreeMap<String, f64>,
}

/// 钢厂 → 价格类型 → 钢筋类型 → 条目
type RuleFile = BTreeMap<String, BTreeMap<String, BTreeMap<String, RuleFileEntry>>>;

/// 数据行号（表头占第 1 行）
fn row_number(index: usize) -> usize {
    index + 2
}

// ==========================================
// TableLoader - 输入表加载器
// ==========================================
pub struct TableLoader {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }

    // ==========================================
    // 加价规则
    // ==========================================

    /// 从 JSON 文件加载加价规则
    pub fn load_pricing_rules<P: AsRef<Path>>(&self, path: P) -> ImportResult<PriceRuleSet> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(path)?;
        self.pricing_rules_from_str(&raw)
    }

    /// 解析加价规则 JSON
    ///
    /// 格式: {钢厂: {"网价"|"到货价": {钢筋类型: {"base_spec": .., "additions": {规格: 加价}}}}}
    pub fn pricing_rules_from_str(&self, raw: &str) -> ImportResult<PriceRuleSet> {
        let file: RuleFile = serde_json::from_str(raw.trim_start_matches('\u{feff}'))?;
        let mut rules = PriceRuleSet::new();

        for (mill, by_kind) in file {
            for (kind_label, by_type) in by_kind {
                let Some(kind) = PriceKind::from_label(&kind_label) else {
                    warn!(mill = %mill, price_kind = %kind_label, "未知价格类型, 已忽略");
                    continue;
                };
                for (type_label, entry) in by_type {
                    let Some(steel_type) = SteelType::from_label(&type_label) else {
                        warn!(mill = %mill, steel_type = %type_label, "未知钢筋类型, 已忽略");
                        continue;
                    };
                    rules.insert(
                        &mill,
                        steel_type,
                        kind,
                        PriceAdjustments {
                            base_spec: entry.base_spec,
                            additions: entry.additions,
                        },
                    );
                }
            }
        }

        info!(mills = rules.mill_count(), "加价规则加载完成");
        Ok(rules)
    }

    // ==========================================
    // 件重
    // ==========================================

    pub fn load_weights<P: AsRef<Path>>(&self, path: P) -> ImportResult<WeightTable> {
        let table = self.parser.parse(path, false)?;
        self.weights_from_table(&table)
    }

    /// 列: 钢厂品牌, 规格型号, 长度(可空), 重量（件）
    pub fn weights_from_table(&self, table: &RawTable) -> ImportResult<WeightTable> {
        self.mapper.require_columns(
            table,
            "件重数据",
            &[columns::MILL_BRAND, columns::SPEC, columns::PIECE_WEIGHT],
        )?;

        let mut weights = WeightTable::new();
        for (idx, row) in table.records.iter().enumerate() {
            let (Some(mill), Some(spec)) = (
                self.mapper.get_string(row, columns::MILL_BRAND),
                self.mapper.get_string(row, columns::SPEC),
            ) else {
                continue;
            };
            let weight = match self
                .mapper
                .parse_f64(row, columns::PIECE_WEIGHT, row_number(idx))?
            {
                Some(w) if w > 0.0 => w,
                _ => {
                    debug!(row = row_number(idx), "件重为空或非正, 跳过");
                    continue;
                }
            };
            let length = self
                .mapper
                .get_string(row, columns::LENGTH)
                .unwrap_or_default();
            weights.insert(&mill, &spec, &length, weight);
        }

        info!(entries = weights.len(), "件重数据加载完成");
        Ok(weights)
    }

    // ==========================================
    // 每日基价
    // ==========================================

    pub fn load_base_prices<P: AsRef<Path>>(&self, path: P) -> ImportResult<BasePriceTable> {
        let table = self.parser.parse(path, false)?;
        self.base_prices_from_table(&table)
    }

    /// 列: 钢厂, 钢筋类型, 网价基价, 到货价基价
    ///
    /// 基价非正或钢筋类型未知的行被过滤
    pub fn base_prices_from_table(&self, table: &RawTable) -> ImportResult<BasePriceTable> {
        self.mapper.require_columns(
            table,
            "基价",
            &[
                columns::MILL,
                columns::STEEL_TYPE,
                columns::BASE_NET,
                columns::BASE_ARRIVAL,
            ],
        )?;

        let mut prices = BasePriceTable::new();
        let mut dropped = 0usize;
        for (idx, row) in table.records.iter().enumerate() {
            let line = row_number(idx);
            let net = self.mapper.parse_f64(row, columns::BASE_NET, line)?;
            let arrival = self.mapper.parse_f64(row, columns::BASE_ARRIVAL, line)?;
            let mill = self.mapper.get_string(row, columns::MILL);
            let steel_type = self
                .mapper
                .get_string(row, columns::STEEL_TYPE)
                .and_then(|s| SteelType::from_label(&s));

            match (mill, steel_type, net, arrival) {
                (Some(mill), Some(steel_type), Some(net), Some(arrival))
                    if net > 0.0 && arrival > 0.0 =>
                {
                    prices.insert(&mill, steel_type, BasePrice::new(net, arrival));
                }
                _ => {
                    dropped += 1;
                    debug!(row = line, "基价行无效, 跳过");
                }
            }
        }

        info!(entries = prices.len(), dropped, "每日基价加载完成");
        Ok(prices)
    }

    // ==========================================
    // 每日可发规格
    // ==========================================

    pub fn load_availability<P: AsRef<Path>>(&self, path: P) -> ImportResult<AvailabilityTable> {
        let table = self.parser.parse(path, true)?;
        self.availability_from_table(&table)
    }

    /// 列: 钢厂, 规格型号, 长度(可选列), 是否可发
    ///
    /// 规则:
    /// 1) 空行分隔不同钢厂, 块内钢厂名向下填充
    /// 2) 仅保留"是否可发"为 1 的行
    /// 3) 长度为空记为空字符串（盘螺）
    pub fn availability_from_table(&self, table: &RawTable) -> ImportResult<AvailabilityTable> {
        self.mapper.require_columns(
            table,
            "可发规格",
            &[columns::MILL, columns::SPEC, columns::AVAILABLE],
        )?;

        let mut availability = AvailabilityTable::new();
        let mut current_mill: Option<String> = None;

        for (idx, row) in table.records.iter().enumerate() {
            if is_blank(row) {
                // 空行: 新的钢厂分组开始
                current_mill = None;
                continue;
            }

            if let Some(mill) = self.mapper.get_string(row, columns::MILL) {
                current_mill = Some(mill);
            }
            let Some(mill) = current_mill.as_deref() else {
                debug!(row = row_number(idx), "钢厂未知, 跳过");
                continue;
            };

            if !self.mapper.parse_flag(row, columns::AVAILABLE) {
                continue;
            }
            let Some(spec) = self.mapper.get_string(row, columns::SPEC) else {
                continue;
            };
            let length = self
                .mapper
                .get_string(row, columns::LENGTH)
                .unwrap_or_default();
            availability.insert(mill, &spec, &length);
        }

        info!(mills = availability.mill_count(), "每日可发规格加载完成");
        Ok(availability)
    }

    // ==========================================
    // 发货计划
    // ==========================================

    pub fn load_shipment_plan<P: AsRef<Path>>(&self, path: P) -> ImportResult<ShipmentPlan> {
        let table = self.parser.parse(path, false)?;
        self.shipment_plan_from_table(&table)
    }

    /// 列: 楼号, 规格型号, 所需吨位
    ///
    /// 缺值或吨位 <= 0 的行被过滤; 重复的 (楼号, 规格) 以后出现者为准
    pub fn shipment_plan_from_table(&self, table: &RawTable) -> ImportResult<ShipmentPlan> {
        self.mapper.require_columns(
            table,
            "发货计划",
            &[columns::BUILDING, columns::SPEC, columns::REQUIRED_TONNAGE],
        )?;

        let mut plan = ShipmentPlan::new();
        for (idx, row) in table.records.iter().enumerate() {
            let line = row_number(idx);
            let tonnage = self
                .mapper
                .parse_f64(row, columns::REQUIRED_TONNAGE, line)?;
            let (Some(building), Some(spec), Some(tonnage)) = (
                self.mapper.get_string(row, columns::BUILDING),
                self.mapper.get_string(row, columns::SPEC),
                tonnage,
            ) else {
                debug!(row = line, "发货计划行缺值, 跳过");
                continue;
            };
            if !(tonnage > 0.0) {
                continue;
            }
            if let Some(previous) = plan.insert(&building, &spec, tonnage) {
                warn!(
                    row = line,
                    building = %building,
                    spec = %spec,
                    previous,
                    tonnage,
                    "发货计划重复, 以后出现的吨位为准"
                );
            }
        }

        info!(lines = plan.line_count(), "发货计划加载完成");
        Ok(plan)
    }
}

// ==========================================
// InputFiles - 一次计算所需的全部文件
// ==========================================
#[derive(Debug, Clone)]
pub struct InputFiles<'a> {
    pub pricing_rules: &'a Path,
    pub weights: &'a Path,
    pub base_prices: &'a Path,
    pub availability: &'a Path,
    pub shipment_plan: &'a Path,
}

impl TableLoader {
    /// 一次性加载全部输入表
    pub fn load_all(&self, files: &InputFiles<'_>) -> ImportResult<EngineInputs> {
        Ok(EngineInputs {
            price_rules: self.load_pricing_rules(files.pricing_rules)?,
            weights: self.load_weights(files.weights)?,
            base_prices: self.load_base_prices(files.base_prices)?,
            availability: self.load_availability(files.availability)?,
            plan: self.load_shipment_plan(files.shipment_plan)?,
        })
    }
}
