//! Table formatting utilities for CLI list commands
//!
//! One formatter serves every record kind: commands describe their columns
//! with [`ColumnDef`], build [`TableRow`]s of typed [`CellValue`]s, and the
//! formatter handles TSV (aligned, coloured), CSV and Markdown output.
//!
//! # Text Wrapping
//!
//! - Use `TableConfig::with_wrap(width)` to enable word-wrapped multi-line rows
//! - CSV output remains single-line for pipability

use chrono::NaiveDate;
use console::style;

use crate::cli::helpers::{escape_csv, truncate_str, wrap_text};
use crate::cli::OutputFormat;
use crate::core::kpi::PercentChange;
use crate::entities::agent::AgentStatus;
use crate::entities::change::Impact;
use crate::entities::countermeasure::ActionStatus;
use crate::entities::hypothesis::ConfidenceBand;
use crate::entities::kpi::Trend;
use crate::entities::series::CorrelationBand;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum width for text columns before wrapping (None = truncate instead)
    pub wrap_width: Option<usize>,
    /// Show summary line after table (e.g., "5 change(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            show_summary: true,
        }
    }
}

impl TableConfig {
    /// Create config with text wrapping enabled at the specified width
    pub fn with_wrap(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
            show_summary: true,
        }
    }

    /// Create config optimized for piping (no wrapping, no summary)
    pub fn for_pipe() -> Self {
        Self {
            wrap_width: None,
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (cyan)
    Id(String),
    /// Plain text, optionally truncated
    Text(String),
    /// Category or kind label
    Type(String),
    /// Change impact (high=red, medium=yellow, low=dim)
    Impact(Impact),
    /// Hypothesis confidence in percent (>80 red, >60 yellow)
    Confidence(u8),
    /// Correlation coefficient (>0.7 red, >0.5 yellow, else blue)
    Correlation(f64),
    /// Countermeasure status (completed=green, in progress=yellow)
    ActionStatus(ActionStatus),
    /// Agent status
    AgentStatus(AgentStatus),
    /// KPI percent change (green when improving, red otherwise)
    Change(Option<PercentChange>),
    /// KPI target badge
    TargetMet(bool),
    /// Asserted KPI trend
    Trend(Trend),
    /// Calendar date
    Date(NaiveDate),
    /// Numeric value
    Number(i64),
    /// Float value with precision
    Float(f64, usize),
    /// Tags/labels as comma-separated
    Tags(Vec<String>),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) | CellValue::Type(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Impact(impact) => {
                let s = impact.to_string();
                let styled = match impact {
                    Impact::High => style(s).red().bold(),
                    Impact::Medium => style(s).yellow(),
                    Impact::Low => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Confidence(c) => {
                let s = format!("{}%", c);
                let styled = match ConfidenceBand::of(*c) {
                    ConfidenceBand::High => style(s).red().bold(),
                    ConfidenceBand::Medium => style(s).yellow(),
                    ConfidenceBand::Low => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Correlation(r) => {
                let s = format!("{:.2}", r);
                let styled = match CorrelationBand::of(*r) {
                    CorrelationBand::High => style(s).red(),
                    CorrelationBand::Medium => style(s).yellow(),
                    CorrelationBand::Low => style(s).blue(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::ActionStatus(status) => {
                let s = status.badge();
                let styled = match status {
                    ActionStatus::Completed => style(s).green(),
                    ActionStatus::InProgress => style(s).yellow(),
                    ActionStatus::Pending => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::AgentStatus(status) => {
                let s = status.to_string();
                let styled = match status {
                    AgentStatus::Completed => style(s).green(),
                    AgentStatus::Working => style(s).yellow(),
                    AgentStatus::Idle => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Change(change) => {
                let styled = match change {
                    Some(c) if c.improving => style(c.to_string()).green(),
                    Some(c) => style(c.to_string()).red(),
                    None => style("n/a".to_string()).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::TargetMet(met) => {
                let styled = if *met {
                    style("Target Met").green()
                } else {
                    style("In Progress").yellow()
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Trend(trend) => {
                let s = format!("{} {}", trend.symbol(), trend);
                let styled = match trend {
                    Trend::Improving => style(s).green(),
                    Trend::Stable => style(s).dim(),
                    Trend::Degrading => style(s).red(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Date(d) => format!("{:<width$}", d.format("%Y-%m-%d"), width = width),
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Float(f, precision) => {
                format!("{:>width$.prec$}", f, width = width, prec = precision)
            }
            CellValue::Tags(tags) => {
                let joined = tags.join(", ");
                format!(
                    "{:<width$}",
                    truncate_str(&joined, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Change(change) => change
                .map(|c| format!("{:.1}", c.delta.signum() * c.magnitude))
                .unwrap_or_default(),
            CellValue::TargetMet(met) => met.to_string(),
            CellValue::Confidence(c) => c.to_string(),
            CellValue::Empty => String::new(),
            other => escape_csv(&other.raw()),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Impact(Impact::High) => "**High**".to_string(),
            CellValue::Empty => "-".to_string(),
            other => other.raw(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) | CellValue::Type(s) => s.clone(),
            CellValue::Impact(impact) => impact.to_string(),
            CellValue::Confidence(c) => format!("{}%", c),
            CellValue::Correlation(r) => format!("{:.2}", r),
            CellValue::ActionStatus(status) => status.badge(),
            CellValue::AgentStatus(status) => status.to_string(),
            CellValue::Change(change) => change
                .map(|c| c.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            CellValue::TargetMet(met) => {
                if *met {
                    "Target Met".to_string()
                } else {
                    "In Progress".to_string()
                }
            }
            CellValue::Trend(trend) => trend.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Empty => String::new(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Trend(trend) => trend.to_string().len() + 2,
            CellValue::Date(_) => 10, // "YYYY-MM-DD"
            CellValue::Empty => 1,
            other => other.raw().chars().count(),
        }
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    record_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], record_name: &'static str) -> Self {
        Self {
            columns,
            record_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Render rows in the specified format
    ///
    /// JSON and YAML are not table formats; callers serialize the records
    /// themselves and anything else falls back to TSV.
    pub fn render<I>(&self, rows: I, format: OutputFormat) -> String
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Csv => self.render_csv(&rows),
            OutputFormat::Md => self.render_md(&rows),
            _ => self.render_tsv(&rows),
        }
    }

    /// Print rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        print!("{}", self.render(rows, format));
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                // +2 for the truncation buffer, capped at the declared width
                let natural_width = col.header.len().max(max_content.saturating_add(2));
                natural_width.min(col.width)
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            match self.config.wrap_width {
                Some(wrap_width) => self.render_tsv_row_wrapped(&mut out, row, &widths, wrap_width),
                None => self.render_tsv_row_truncated(&mut out, row, &widths),
            }
        }

        // Summary (unless disabled for piping)
        if self.config.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s) found.\n",
                style(rows.len()).cyan(),
                self.record_name
            ));
        }
        out
    }

    fn render_tsv_row_truncated(&self, out: &mut String, row: &TableRow, widths: &[usize]) {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(col, w)| match row.get(col.key) {
                Some(value) => value.format_tsv(*w),
                None => format!("{:<width$}", "-", width = *w),
            })
            .collect();
        out.push_str(parts.join(" ").trim_end());
        out.push('\n');
    }

    fn render_tsv_row_wrapped(
        &self,
        out: &mut String,
        row: &TableRow,
        widths: &[usize],
        wrap_width: usize,
    ) {
        // Only Text and Tags cells wrap; everything else stays on the first line
        let wrapped_cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|col| match row.get(col.key) {
                Some(value @ (CellValue::Text(_) | CellValue::Tags(_))) => {
                    wrap_text(&value.raw(), wrap_width)
                }
                Some(value) => vec![value.raw()],
                None => vec!["-".to_string()],
            })
            .collect();

        let max_lines = wrapped_cells.iter().map(|c| c.len()).max().unwrap_or(1);

        for line_idx in 0..max_lines {
            let parts: Vec<String> = wrapped_cells
                .iter()
                .enumerate()
                .map(|(col_idx, lines)| {
                    let width = widths.get(col_idx).copied().unwrap_or(10);
                    let content = lines.get(line_idx).map(|s| s.as_str()).unwrap_or("");
                    format!("{:<width$}", content, width = width)
                })
                .collect();
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }

        // Add blank line between multi-line rows for readability
        if max_lines > 1 {
            out.push('\n');
        }
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        out.push_str(&headers.join(","));
        out.push('\n');

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            out.push_str(&values.join(","));
            out.push('\n');
        }
        out
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", headers.join(" | ")));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        out.push_str(&format!("|{}|\n", separators.join("|")));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            out.push_str(&format!("| {} |\n", values.join(" | ")));
        }
        out
    }
}
