// ==========================================
// 导入 → 计算 → 导出 集成测试
// ==========================================
// 职责: 从磁盘文件走完整流程并检查发货依据文件
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use chrono::NaiveDate;
use rebar_spread::config::EngineConfig;
use rebar_spread::domain::types::SteelType;
use rebar_spread::engine::ShipmentSpreadEngine;
use rebar_spread::export::{best_only, CsvExporter};
use rebar_spread::importer::{ImportError, InputFiles, TableLoader};
use std::fs;
use tempfile::TempDir;
use test_data_builder::{write_fixture_files, FixtureFiles};

fn input_files(files: &FixtureFiles) -> InputFiles<'_> {
    InputFiles {
        pricing_rules: &files.pricing_rules,
        weights: &files.weights,
        base_prices: &files.base_prices,
        availability: &files.availability,
        shipment_plan: &files.shipment_plan,
    }
}

#[test]
fn test_load_all_inputs_from_files() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path());

    let inputs = TableLoader::new().load_all(&input_files(&files)).unwrap();

    assert_eq!(inputs.price_rules.mill_count(), 2);
    assert_eq!(inputs.weights.len(), 4);
    assert_eq!(inputs.base_prices.len(), 3);
    assert!(inputs.base_prices.usable("沙钢", SteelType::Rebar).is_none());
    assert!(inputs.availability.is_stocked("HRB400E8"));
    assert!(!inputs.availability.is_stocked("HRB400E14"));
    assert_eq!(inputs.plan.line_count(), 3);
    assert_eq!(inputs.plan.tonnage("2#", "HRB400E14"), None);
}

#[test]
fn test_file_to_export_flow() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path());
    let inputs = TableLoader::new().load_all(&input_files(&files)).unwrap();

    let report = ShipmentSpreadEngine::new(EngineConfig::default())
        .unwrap()
        .run(&inputs);
    let rows = best_only(&report.rows);

    let out_dir = dir.path().join("out");
    let date = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
    let path = CsvExporter::default()
        .export_to_dir(&rows, &out_dir, date)
        .unwrap();
    assert!(path.ends_with("20240618_发货依据.csv"));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(
        lines,
        vec![
            "楼号,规格,长度,钢厂,网价,到货价,价差,件重,计划吨位,发货件数,发货吨位,利润",
            "1#,HRB400E8,,中新,3800,3700,100,2.1,5,2,4.2,500",
            "1#,HRB400E12,12m,徐钢,3670,3550,120,2.667,10.4,4,10.67,1248",
            "2#,HRB400E40,,无库存,0,0,0,0,3,0,0,0",
        ]
    );
}

#[test]
fn test_english_export_header_and_labels() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path());
    let inputs = TableLoader::new().load_all(&input_files(&files)).unwrap();
    let report = ShipmentSpreadEngine::new(EngineConfig::default())
        .unwrap()
        .run(&inputs);

    let mut buf = Vec::new();
    CsvExporter::new("en")
        .unwrap()
        .write(&best_only(&report.rows), &mut buf)
        .unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("Building,Spec,Length,Mill"));
    assert!(text.contains("No stock"));
}

#[test]
fn test_missing_column_reported() {
    let dir = TempDir::new().unwrap();
    let mut files = write_fixture_files(dir.path());
    files.shipment_plan = dir.path().join("bad_plan.csv");
    fs::write(&files.shipment_plan, "楼号,规格型号\n1#,HRB400E12\n").unwrap();

    let err = TableLoader::new()
        .load_all(&input_files(&files))
        .unwrap_err();
    match err {
        ImportError::MissingColumns { table, columns } => {
            assert_eq!(table, "发货计划");
            assert_eq!(columns, vec!["所需吨位".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_rules_file() {
    let dir = TempDir::new().unwrap();
    let mut files = write_fixture_files(dir.path());
    files.pricing_rules = dir.path().join("absent.json");

    let err = TableLoader::new()
        .load_all(&input_files(&files))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_non_finite_tonnage_rows_keep_summary_finite() {
    let dir = TempDir::new().unwrap();
    let mut files = write_fixture_files(dir.path());
    files.shipment_plan = dir.path().join("plan_nan.csv");
    fs::write(
        &files.shipment_plan,
        "楼号,规格型号,所需吨位\n1#,HRB400E12,NaN\n2#,HRB400E12,10\n3#,HRB400E12,inf\n",
    )
    .unwrap();

    let inputs = TableLoader::new().load_all(&input_files(&files)).unwrap();
    assert_eq!(inputs.plan.line_count(), 1);

    let report = ShipmentSpreadEngine::new(EngineConfig::default())
        .unwrap()
        .run(&inputs);
    assert!(report.summary.planned_tonnage.is_finite());
    assert!(report.summary.profit.is_finite());
    assert_eq!(report.summary.best_rows, 1);
    assert_eq!(report.summary.planned_tonnage, 10.0);
}
