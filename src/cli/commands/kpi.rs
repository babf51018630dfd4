//! `rca kpi` command - KPI derivation
//!
//! `list` shows the dataset KPIs with their derived values; `calc` runs the
//! same derivation on readings given on the command line.

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::chart::gauge;
use crate::cli::commands::list::KPI_COLUMNS;
use crate::cli::commands::utils::Session;
use crate::cli::helpers::print_structured;
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::kpi::{Direction, PercentChange};
use crate::entities::kpi::{format_value, Kpi, Trend};

#[derive(Subcommand, Debug)]
pub enum KpiCommands {
    /// List KPIs with percent change, direction, target status and progress
    List,

    /// Derive percent change and target status for ad-hoc readings
    Calc(CalcArgs),
}

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// KPI name; picks the direction when no flag is given
    #[arg(long)]
    pub name: String,

    /// Reading before countermeasures
    #[arg(long, allow_negative_numbers = true)]
    pub before: f64,

    /// Reading after countermeasures
    #[arg(long, allow_negative_numbers = true)]
    pub after: f64,

    /// Target value
    #[arg(long, allow_negative_numbers = true)]
    pub target: f64,

    /// Unit label
    #[arg(long, default_value = "")]
    pub unit: String,

    /// Treat a decrease as improvement
    #[arg(long, conflicts_with = "higher_is_better")]
    pub lower_is_better: bool,

    /// Treat an increase as improvement
    #[arg(long)]
    pub higher_is_better: bool,
}

impl CalcArgs {
    fn flag(&self) -> Option<bool> {
        match (self.lower_is_better, self.higher_is_better) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn to_kpi(&self) -> Kpi {
        Kpi {
            name: self.name.clone(),
            before: self.before,
            after: self.after,
            target: self.target,
            unit: self.unit.clone(),
            trend: Trend::Stable,
            lower_is_better: self.flag(),
        }
    }
}

/// Machine-readable result of `kpi calc`
#[derive(Debug, Serialize)]
struct Calculation {
    name: String,
    before: f64,
    after: f64,
    target: f64,
    change_direction: Direction,
    target_direction: Direction,
    percent_change: Option<PercentChange>,
    target_met: bool,
    progress: f64,
}

const KPI_LIST_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "KPI", 24),
    ColumnDef::new("before", "BEFORE", 10),
    ColumnDef::new("after", "AFTER", 10),
    ColumnDef::new("target", "TARGET", 10),
    ColumnDef::new("change", "CHANGE", 10),
    ColumnDef::new("direction", "DIRECTION", 18),
    ColumnDef::new("status", "STATUS", 13),
    ColumnDef::new("progress", "BAR %", 7),
];

pub fn run(cmd: KpiCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        KpiCommands::List => run_list(global),
        KpiCommands::Calc(args) => run_calc(args, global),
    }
}

/// Table rows for KPIs; each row carries every KPI column
pub(crate) fn kpi_rows(kpis: &[Kpi]) -> Vec<TableRow> {
    kpis.iter()
        .map(|kpi| {
            let d = kpi.derived();
            TableRow::new(d.name.clone())
                .cell("name", CellValue::Text(d.name.clone()))
                .cell("before", CellValue::Text(format_value(d.before, &d.unit)))
                .cell("after", CellValue::Text(format_value(d.after, &d.unit)))
                .cell("target", CellValue::Text(format_value(d.target, &d.unit)))
                .cell("change", CellValue::Change(d.change))
                .cell("direction", CellValue::Type(d.direction.to_string()))
                .cell("status", CellValue::TargetMet(d.target_met))
                .cell("progress", CellValue::Float(d.progress, 0))
                .cell("trend", CellValue::Trend(d.trend))
        })
        .collect()
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let format = session.format(global);
    let kpis = &session.dataset.kpis;

    if format.is_structured() {
        let derived: Vec<_> = kpis.iter().map(|k| k.derived()).collect();
        return print_structured(&derived, format);
    }

    let format = if format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        format
    };
    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(KPI_LIST_COLUMNS, "KPI")
        .with_config(config)
        .output(kpi_rows(kpis), format);

    if !global.quiet && format == OutputFormat::Tsv {
        println!();
        println!("{}", style(&session.dataset.narrative.kpi_summary).dim());
    }
    Ok(())
}

fn run_calc(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let kpi = args.to_kpi();
    let derived = kpi.derived();
    tracing::debug!(
        name = %kpi.name,
        flag = ?kpi.lower_is_better,
        change_direction = %kpi.change_direction(),
        target_direction = %kpi.target_direction(),
        "kpi calc"
    );

    if global.format.is_structured() {
        let calc = Calculation {
            name: kpi.name.clone(),
            before: kpi.before,
            after: kpi.after,
            target: kpi.target,
            change_direction: kpi.change_direction(),
            target_direction: kpi.target_direction(),
            percent_change: derived.change,
            target_met: derived.target_met,
            progress: derived.progress,
        };
        return print_structured(&calc, global.format);
    }

    println!("{}", style(&kpi.name).bold());
    match derived.change {
        Some(change) => {
            let verdict = if change.improving {
                style("improving").green()
            } else {
                style("not improving").red()
            };
            println!(
                "  Change:    {} ({}, {})",
                change,
                verdict,
                kpi.change_direction()
            );
        }
        None => println!(
            "  Change:    n/a {}",
            style("(no percent change from a zero baseline)").dim()
        ),
    }

    let status = if derived.target_met {
        style("Target Met").green().bold()
    } else {
        style("In Progress").yellow()
    };
    let comparison = match derived.direction {
        Direction::LowerIsBetter => "<=",
        Direction::HigherIsBetter => ">=",
    };
    println!(
        "  Target:    {} (after {} {} target {}, {})",
        status,
        format_value(kpi.after, &kpi.unit),
        comparison,
        format_value(kpi.target, &kpi.unit),
        derived.direction
    );
    println!("  Progress:  {}", gauge(derived.progress, 20));
    Ok(())
}
