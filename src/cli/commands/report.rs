//! `rca report` command - export the analysis report
//!
//! Markdown by default (rendered from the embedded template); `--format json`
//! or `--format yaml` emit the same content as data.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::commands::utils::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::report::{Report, ReportGenerator};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Name printed as the report author (overrides config)
    #[arg(long)]
    pub prepared_by: Option<String>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let prepared_by = args
        .prepared_by
        .clone()
        .unwrap_or_else(|| session.config.prepared_by());
    let report = Report::new(&session.dataset, prepared_by);

    let content = match session.format(global) {
        OutputFormat::Json => {
            let mut json = report.to_json().into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(&report).into_diagnostic()?,
        _ => {
            let generator = ReportGenerator::new().into_diagnostic()?;
            generator.render_markdown(&report).into_diagnostic()?
        }
    };

    tracing::info!(
        complaint = %session.dataset.complaint.id,
        bytes = content.len(),
        "report rendered"
    );
    write_output(&content, args.output, global.quiet)
}

fn write_output(content: &str, output_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        let file = File::create(&path).into_diagnostic()?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).into_diagnostic()?;
        writer.flush().into_diagnostic()?;
        if !quiet {
            println!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    } else {
        print!("{}", content);
    }
    Ok(())
}
