// ==========================================
// 钢筋发货价差系统 - 命令行入口
// ==========================================
// 用法:
//   rebar-spread <基价文件> <可发规格文件> <发货计划文件>
//       [--rules FILE] [--weights FILE] [--config FILE] [--out DIR]
//       [--tolerance T] [--no-surcharge] [--best-only] [--locale zh-CN|en] [--json]
// ==========================================

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rebar_spread::config::ConfigManager;
use rebar_spread::export::{best_only, CsvExporter};
use rebar_spread::i18n;
use rebar_spread::importer::{InputFiles, TableLoader};
use rebar_spread::{logging, ShipmentSpreadEngine};
use std::path::PathBuf;

// ==========================================
// CliArgs - 命令行参数
// ==========================================
#[derive(Debug, Parser)]
#[command(name = "rebar-spread", version, about = "钢筋发货价差系统 - 生成发货依据")]
struct CliArgs {
    /// 每日基价文件 (csv/xlsx)
    base_prices: PathBuf,

    /// 每日可发规格文件 (csv/xlsx)
    availability: PathBuf,

    /// 发货计划文件 (csv/xlsx)
    shipment_plan: PathBuf,

    /// 加价规则 JSON
    #[arg(long, default_value = "pricing_rules.json")]
    rules: PathBuf,

    /// 钢厂件重数据
    #[arg(long, default_value = "钢厂件重数据.csv")]
    weights: PathBuf,

    /// 引擎配置 JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// 发货依据输出目录
    #[arg(long = "out", default_value = ".")]
    out_dir: PathBuf,

    /// 吨位允许偏差（覆盖配置）
    #[arg(long)]
    tolerance: Option<f64>,

    /// 关闭条件加价
    #[arg(long)]
    no_surcharge: bool,

    /// 仅导出最优价差记录
    #[arg(long)]
    best_only: bool,

    /// 导出语言
    #[arg(long, default_value = i18n::DEFAULT_LOCALE, value_parser = ["zh-CN", "en"])]
    locale: String,

    /// 以 JSON 输出完整计算结果
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    logging::init();

    let args = CliArgs::parse();
    let exporter = CsvExporter::new(&args.locale)?;
    i18n::set_locale(exporter.locale());

    tracing::info!("{} v{}", rebar_spread::APP_NAME, rebar_spread::VERSION);

    // ==========================================
    // 配置: 文件 → 环境变量 → 命令行
    // ==========================================
    let manager = match &args.config {
        Some(path) => ConfigManager::with_file(path),
        None => ConfigManager::new(),
    };
    let mut config = manager.load().context("加载引擎配置失败")?;
    if let Some(tolerance) = args.tolerance {
        config.tonnage_tolerance = tolerance;
    }
    if args.no_surcharge {
        config.surcharge_enabled = false;
    }
    let engine = ShipmentSpreadEngine::new(config).context("引擎配置无效")?;

    // ==========================================
    // 导入
    // ==========================================
    let files = InputFiles {
        pricing_rules: &args.rules,
        weights: &args.weights,
        base_prices: &args.base_prices,
        availability: &args.availability,
        shipment_plan: &args.shipment_plan,
    };
    let inputs = TableLoader::new()
        .load_all(&files)
        .context("读取输入文件失败")?;

    // ==========================================
    // 计算 + 导出
    // ==========================================
    let report = engine.run(&inputs);
    let rows = if args.best_only {
        best_only(&report.rows)
    } else {
        report.rows.clone()
    };

    let path = exporter
        .export_to_dir(&rows, &args.out_dir, Local::now().date_naive())
        .context("导出发货依据失败")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("序列化计算结果失败")?;
        println!("{}", json);
        return Ok(());
    }

    let summary = &report.summary;
    println!("{}", i18n::t("summary.title"));
    println!("  {}: {:.2}", i18n::t("summary.planned_tonnage"), summary.planned_tonnage);
    println!("  {}: {}", i18n::t("summary.shipped_pieces"), summary.shipped_pieces);
    println!("  {}: {:.2}", i18n::t("summary.shipped_tonnage"), summary.shipped_tonnage);
    println!("  {}: {:.2}", i18n::t("summary.profit"), summary.profit);
    println!("  {}: {}", i18n::t("summary.best_rows"), summary.best_rows);
    println!("  {}: {}", i18n::t("summary.degenerate_rows"), summary.degenerate_rows);
    println!(
        "{}",
        i18n::t_with_args("summary.written", &[("path", &path.display().to_string())])
    );

    Ok(())
}
