use std::path::{Path, PathBuf};

use abc_calc::{monitoring, AbcResult};
use abc_core::{AbcConfig, Thresholds, ZeroTotalPolicy};
use abc_session::InventorySession;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::fmt::{number, percent};

#[derive(Parser)]
#[command(name = "inventory-abc", version, about = "Inventory ABC analysis over material movement exports")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-material ABC classification plus category roll-up
    Abc(AnalysisArgs),
    /// Category roll-up only
    Summary(AnalysisArgs),
    /// Descriptive inventory aggregates
    Monitor {
        /// Export file (.csv, .xlsx, .xls, .ods)
        file: PathBuf,
        /// Number of entries in the ranking lists
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Args)]
pub struct AnalysisArgs {
    /// Export file (.csv, .xlsx, .xls, .ods)
    pub file: PathBuf,
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Threshold preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
    /// A/B cumulative percentage boundary
    #[arg(long)]
    pub ab: Option<Decimal>,
    /// B/C cumulative percentage boundary
    #[arg(long)]
    pub bc: Option<Decimal>,
    /// Behaviour when the total value is zero
    #[arg(long, value_enum)]
    pub zero_total: Option<ZeroTotalArg>,
    /// List categories without materials as zero rows
    #[arg(long)]
    pub report_empty: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Preset {
    #[value(name = "70-90")]
    P70_90,
    #[value(name = "80-95")]
    P80_95,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ZeroTotalArg {
    AllC,
    Fail,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl AnalysisArgs {
    /// 配置檔 → 預設組合 → 個別門檻，後者覆蓋前者
    pub fn build_config(&self) -> Result<AbcConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                AbcConfig::from_json_str(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => AbcConfig::default(),
        };

        if let Some(preset) = self.preset {
            config.thresholds = match preset {
                Preset::P70_90 => Thresholds::preset_70_90(),
                Preset::P80_95 => Thresholds::preset_80_95(),
            };
        }
        if let Some(ab) = self.ab {
            config.thresholds.boundary_ab = ab;
        }
        if let Some(bc) = self.bc {
            config.thresholds.boundary_bc = bc;
        }
        if let Some(policy) = self.zero_total {
            config.zero_total_policy = match policy {
                ZeroTotalArg::AllC => ZeroTotalPolicy::AllC,
                ZeroTotalArg::Fail => ZeroTotalPolicy::Fail,
            };
        }
        if self.report_empty {
            config.report_empty_categories = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn load_session(file: &Path) -> Result<InventorySession> {
    let table = abc_io::load_path(file).with_context(|| format!("loading {}", file.display()))?;
    let mut session = InventorySession::new();
    session.upload_named(&table, Some(file.display().to_string()))?;
    Ok(session)
}

fn run_analysis(args: &AnalysisArgs) -> Result<AbcResult> {
    let config = args.build_config()?;
    tracing::debug!("分析配置: {:?}", config);
    let session = load_session(&args.file)?;
    let result = session.analyze(&config)?;

    for warning in &result.warnings {
        match &warning.material_id {
            Some(id) => eprintln!("warning [{}]: {}", id, warning.message),
            None => eprintln!("warning: {}", warning.message),
        }
    }
    Ok(result)
}

pub fn abc(args: &AnalysisArgs) -> Result<()> {
    let result = run_analysis(args)?;

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Rank",
        "Material",
        "Material Description",
        "Quantity",
        "Value",
        "Cumulative Sum",
        "Cumulative %",
        "Category",
    ]);
    for item in &result.items {
        let ranked = &item.ranked;
        table.add_row(vec![
            Cell::new(ranked.rank),
            Cell::new(&ranked.summary.material_id),
            Cell::new(ranked.summary.description.as_deref().unwrap_or("")),
            right(number(ranked.summary.total_quantity, 0)),
            right(number(ranked.summary.total_value, 2)),
            right(number(ranked.cumulative_value, 2)),
            right(percent(ranked.cumulative_percentage)),
            Cell::new(item.category),
        ]);
    }

    println!("ABC Analysis\n{table}\n");
    print_summary(&result);
    Ok(())
}

pub fn summary(args: &AnalysisArgs) -> Result<()> {
    let result = run_analysis(args)?;

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result.categories)?);
        return Ok(());
    }

    print_summary(&result);
    Ok(())
}

fn print_summary(result: &AbcResult) {
    let mut table = Table::new();
    table.set_header(vec![
        "Category",
        "Items",
        "Total Quantity",
        "Total Value",
        "% of Value",
        "% of Items",
        "% of Quantity",
    ]);
    for category in &result.categories {
        table.add_row(vec![
            Cell::new(category.category),
            right(category.item_count.to_string()),
            right(number(category.total_quantity, 0)),
            right(number(category.total_value, 2)),
            right(percent(category.percentage_of_total_value)),
            right(percent(category.percentage_of_item_count)),
            right(percent(category.percentage_of_quantity)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        right(result.material_count.to_string()),
        right(number(result.grand_total_quantity, 0)),
        right(number(result.grand_total_value, 2)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);

    println!("ABC Summary\n{table}");
}

#[derive(Serialize)]
struct MonitorReport {
    overview: abc_calc::InventoryOverview,
    quantity_by_valuation_type: Vec<(String, Decimal)>,
    top_materials_by_value: Vec<monitoring::MaterialValue>,
    quantity_by_posting_date: Vec<(chrono::NaiveDate, Decimal)>,
    most_moved_materials: Vec<monitoring::MaterialMovement>,
}

pub fn monitor(file: &Path, top: usize, format: OutputFormat) -> Result<()> {
    let session = load_session(file)?;
    let dataset = session
        .snapshot()
        .context("no dataset after upload")?;
    let rows = &dataset.rows;

    let report = MonitorReport {
        overview: session.overview()?,
        quantity_by_valuation_type: monitoring::quantity_by_valuation_type(rows)?,
        top_materials_by_value: monitoring::top_materials_by_value(rows, top)?,
        quantity_by_posting_date: monitoring::quantity_by_posting_date(rows)?,
        most_moved_materials: monitoring::most_moved_materials(rows, top)?,
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Total outflow: {} items\nTotal value:   {}\nRows: {}  Materials: {}\n",
        number(report.overview.total_quantity, 0),
        number(report.overview.total_value, 2),
        report.overview.row_count,
        report.overview.material_count
    );

    if !report.quantity_by_valuation_type.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Valuation Type", "Total Quantity"]);
        for (valuation_type, qty) in &report.quantity_by_valuation_type {
            table.add_row(vec![Cell::new(valuation_type), right(number(*qty, 0))]);
        }
        println!("Quantity by Valuation Type\n{table}\n");
    }

    let mut table = Table::new();
    table.set_header(vec!["Material Description", "Total Amount in LC"]);
    for item in &report.top_materials_by_value {
        table.add_row(vec![
            Cell::new(&item.description),
            right(number(item.total_value, 2)),
        ]);
    }
    println!("Top {} Materials by Value\n{table}\n", top);

    if !report.quantity_by_posting_date.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Posting Date", "Quantity"]);
        for (date, qty) in &report.quantity_by_posting_date {
            table.add_row(vec![Cell::new(date), right(number(*qty, 0))]);
        }
        println!("Stock Changes by Date\n{table}\n");
    }

    let mut table = Table::new();
    table.set_header(vec!["Material", "Material Description", "Quantity"]);
    for item in &report.most_moved_materials {
        table.add_row(vec![
            Cell::new(&item.material_id),
            Cell::new(item.description.as_deref().unwrap_or("")),
            right(number(item.moved_quantity, 0)),
        ]);
    }
    println!("Most Moved Items\n{table}");

    Ok(())
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}
