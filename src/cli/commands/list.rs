//! `rca list` command - tabular listings of the dataset records

use clap::ValueEnum;
use miette::Result;

use crate::cli::commands::kpi::kpi_rows;
use crate::cli::commands::utils::Session;
use crate::cli::helpers::print_structured;
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Dataset;
use crate::entities::change::{Category, Impact};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// 5M1E change log
    Changes,
    /// Root cause hypotheses, in ranked order
    Hypotheses,
    /// Countermeasures
    Actions,
    /// KPIs with derived values
    Kpis,
    /// Child parts of the traced unit
    Parts,
    /// Agent Activity Monitor entries
    Agents,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Record kind to list
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Only changes in this 5M1E category
    #[arg(long, short = 'c')]
    pub category: Option<Category>,

    /// Only changes with this impact
    #[arg(long, value_parser = parse_impact)]
    pub impact: Option<Impact>,

    /// Limit the number of rows
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Wrap long text columns at this width (tsv only)
    #[arg(long, short = 'w')]
    pub wrap: Option<usize>,
}

fn parse_impact(s: &str) -> Result<Impact, String> {
    match s.to_lowercase().as_str() {
        "high" => Ok(Impact::High),
        "medium" => Ok(Impact::Medium),
        "low" => Ok(Impact::Low),
        _ => Err(format!("Invalid impact: {}. Use high, medium, or low", s)),
    }
}

const CHANGE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("date", "DATE", 12),
    ColumnDef::new("category", "CATEGORY", 13),
    ColumnDef::new("impact", "IMPACT", 8),
    ColumnDef::new("changed_by", "CHANGED BY", 20),
    ColumnDef::new("description", "DESCRIPTION", 50),
];

const HYPOTHESIS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("rank", "#", 3),
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("confidence", "CONF", 6),
    ColumnDef::new("related", "RELATED", 18),
    ColumnDef::new("description", "DESCRIPTION", 60),
];

const ACTION_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("status", "STATUS", 13),
    ColumnDef::new("deadline", "DEADLINE", 12),
    ColumnDef::new("responsible", "RESPONSIBLE", 20),
    ColumnDef::new("action", "ACTION", 50),
];

pub(crate) const KPI_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "KPI", 24),
    ColumnDef::new("before", "BEFORE", 10),
    ColumnDef::new("after", "AFTER", 10),
    ColumnDef::new("target", "TARGET", 10),
    ColumnDef::new("change", "CHANGE", 10),
    ColumnDef::new("status", "STATUS", 13),
    ColumnDef::new("trend", "TREND", 12),
];

const PART_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("part_number", "PART NUMBER", 16),
    ColumnDef::new("supplier", "SUPPLIER", 16),
    ColumnDef::new("lot", "LOT", 16),
];

const AGENT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 14),
    ColumnDef::new("name", "NAME", 22),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("progress", "PROGRESS", 9),
    ColumnDef::new("task", "CURRENT TASK", 40),
];

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let ds = &session.dataset;
    let format = session.format(global);
    let limit = args.limit.unwrap_or(usize::MAX);

    if (args.category.is_some() || args.impact.is_some()) && args.kind != ListKind::Changes {
        tracing::warn!(kind = ?args.kind, "--category and --impact only filter changes");
    }

    if format.is_structured() {
        return match args.kind {
            ListKind::Changes => {
                let changes: Vec<_> = filtered_changes(ds, &args).take(limit).collect();
                print_structured(&changes, format)
            }
            ListKind::Hypotheses => print_structured(&take(&ds.hypotheses, limit), format),
            ListKind::Actions => print_structured(&take(&ds.countermeasures, limit), format),
            ListKind::Kpis => {
                let derived: Vec<_> = ds.kpis.iter().take(limit).map(|k| k.derived()).collect();
                print_structured(&derived, format)
            }
            ListKind::Parts => {
                print_structured(&take(&ds.traceability.child_parts, limit), format)
            }
            ListKind::Agents => print_structured(&take(&ds.agents, limit), format),
        };
    }

    let (columns, record_name, rows): (&[ColumnDef], &'static str, Vec<TableRow>) = match args.kind
    {
        ListKind::Changes => (
            CHANGE_COLUMNS,
            "change",
            filtered_changes(ds, &args)
                .map(|c| {
                    TableRow::new(c.id.clone())
                        .cell("id", CellValue::Id(c.id.clone()))
                        .cell("date", CellValue::Date(c.date))
                        .cell("category", CellValue::Type(c.category.to_string()))
                        .cell("impact", CellValue::Impact(c.impact))
                        .cell("changed_by", CellValue::Text(c.changed_by.clone()))
                        .cell("description", CellValue::Text(c.description.clone()))
                })
                .collect(),
        ),
        ListKind::Hypotheses => (
            HYPOTHESIS_COLUMNS,
            "hypothesis",
            ds.hypotheses
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    TableRow::new(h.id.clone())
                        .cell("rank", CellValue::Number(i as i64 + 1))
                        .cell("id", CellValue::Id(h.id.clone()))
                        .cell("confidence", CellValue::Confidence(h.confidence))
                        .cell("related", CellValue::Tags(h.related_changes.clone()))
                        .cell("description", CellValue::Text(h.description.clone()))
                })
                .collect(),
        ),
        ListKind::Actions => (
            ACTION_COLUMNS,
            "countermeasure",
            ds.countermeasures
                .iter()
                .map(|a| {
                    TableRow::new(a.id.clone())
                        .cell("id", CellValue::Id(a.id.clone()))
                        .cell("status", CellValue::ActionStatus(a.status))
                        .cell("deadline", CellValue::Date(a.deadline))
                        .cell("responsible", CellValue::Text(a.responsible.clone()))
                        .cell("action", CellValue::Text(a.action.clone()))
                })
                .collect(),
        ),
        ListKind::Kpis => (KPI_COLUMNS, "KPI", kpi_rows(&ds.kpis)),
        ListKind::Parts => (
            PART_COLUMNS,
            "part",
            ds.traceability
                .child_parts
                .iter()
                .map(|p| {
                    TableRow::new(p.part_number.clone())
                        .cell("part_number", CellValue::Id(p.part_number.clone()))
                        .cell("supplier", CellValue::Text(p.supplier.clone()))
                        .cell("lot", CellValue::Text(p.lot.clone()))
                })
                .collect(),
        ),
        ListKind::Agents => (
            AGENT_COLUMNS,
            "agent",
            ds.agents
                .iter()
                .map(|a| {
                    let progress = if a.shows_progress() {
                        CellValue::Number(i64::from(a.progress))
                    } else {
                        CellValue::Empty
                    };
                    TableRow::new(a.id.clone())
                        .cell("id", CellValue::Id(a.id.clone()))
                        .cell("name", CellValue::Text(a.name.clone()))
                        .cell("status", CellValue::AgentStatus(a.status))
                        .cell("progress", progress)
                        .cell("task", CellValue::Text(a.current_task.clone()))
                })
                .collect(),
        ),
    };

    let config = match args.wrap {
        Some(width) => TableConfig::with_wrap(width),
        None if global.quiet => TableConfig::for_pipe(),
        None => TableConfig::default(),
    };
    let format = if format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        format
    };
    TableFormatter::new(columns, record_name)
        .with_config(config)
        .output(rows.into_iter().take(limit), format);
    Ok(())
}

fn take<T>(records: &[T], limit: usize) -> &[T] {
    &records[..records.len().min(limit)]
}

fn filtered_changes<'a>(
    ds: &'a Dataset,
    args: &'a ListArgs,
) -> impl Iterator<Item = &'a crate::entities::change::ChangeLogEntry> + 'a {
    ds.changes
        .iter()
        .filter(move |c| args.category.map_or(true, |cat| c.category == cat))
        .filter(move |c| args.impact.map_or(true, |imp| c.impact == imp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: ListKind) -> ListArgs {
        ListArgs {
            kind,
            category: None,
            impact: None,
            limit: None,
            wrap: None,
        }
    }

    #[test]
    fn test_filter_by_category() {
        let ds = Dataset::sample().unwrap();
        let mut a = args(ListKind::Changes);
        a.category = Some(Category::Material);
        let ids: Vec<_> = filtered_changes(&ds, &a).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CHG-001"]);
    }

    #[test]
    fn test_filter_by_impact() {
        let ds = Dataset::sample().unwrap();
        let mut a = args(ListKind::Changes);
        a.impact = Some(Impact::High);
        assert_eq!(filtered_changes(&ds, &a).count(), 2);
        assert_eq!(filtered_changes(&ds, &args(ListKind::Changes)).count(), 5);
    }

    #[test]
    fn test_parse_impact() {
        assert_eq!(parse_impact("HIGH"), Ok(Impact::High));
        assert!(parse_impact("severe").is_err());
    }

    #[test]
    fn test_take_clamps() {
        assert_eq!(take(&[1, 2, 3], 2), &[1, 2]);
        assert_eq!(take(&[1, 2, 3], 10), &[1, 2, 3]);
    }
}
