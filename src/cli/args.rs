//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, kpi::KpiCommands, list::ListArgs,
    report::ReportArgs, show::ShowArgs, walk::WalkArgs,
};

#[derive(Parser)]
#[command(name = "rca")]
#[command(author, version, about = "RCA Workbench")]
#[command(long_about = "A guided root cause analysis walkthrough for manufacturing quality complaints: intake, traceability, 5M1E changes, hypotheses, countermeasures and KPI tracking.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging to stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file layered over the global one
    #[arg(long, global = true, env = "RCA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the six analysis stages
    Walk(WalkArgs),

    /// Render a single stage
    Show(ShowArgs),

    /// List records behind the stages
    List(ListArgs),

    /// KPI derivation (percent change, target status)
    #[command(subcommand)]
    Kpi(KpiCommands),

    /// Export the analysis report
    Report(ReportArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (rendered view or aligned table)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Resolve `auto` against a configured default
    pub fn or_default(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|s| OutputFormat::from_str(s, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }

    /// Whether the format is a data dump rather than a rendered view
    pub fn is_structured(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_or_default() {
        assert_eq!(OutputFormat::Auto.or_default(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::Csv.or_default(Some("json")), OutputFormat::Csv);
        assert_eq!(OutputFormat::Auto.or_default(Some("bogus")), OutputFormat::Auto);
        assert_eq!(OutputFormat::Auto.or_default(None), OutputFormat::Auto);
    }
}
