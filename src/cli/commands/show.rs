//! `rca show` command - render a single walkthrough screen

use miette::Result;
use serde_json::{json, Value};

use crate::cli::commands::utils::Session;
use crate::cli::helpers::print_structured;
use crate::cli::views::{progress_indicator, render_stage};
use crate::cli::GlobalOpts;
use crate::core::report::AnalysisSummary;
use crate::core::workflow::{Stage, StepId, WorkflowController};
use crate::core::Dataset;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Stage to render (welcome, intake, traceability, changes, hypothesis, actions, kpi, complete)
    pub stage: Stage,

    /// Omit the progress indicator
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let format = session.format(global);

    if format.is_structured() {
        return print_structured(&stage_data(args.stage, &session.dataset), format);
    }

    if !(args.no_progress || global.quiet) {
        let controller = controller_at(args.stage);
        println!("{}", progress_indicator(&controller.progress()));
    }
    print!(
        "{}",
        render_stage(args.stage, &session.dataset, &session.opts)
    );
    Ok(())
}

/// A controller driven forward until it shows `stage`
pub(crate) fn controller_at(stage: Stage) -> WorkflowController {
    let mut controller = WorkflowController::new();
    if stage == Stage::Welcome {
        return controller;
    }
    controller.start();
    for _ in 0..Stage::ALL.len() {
        if controller.stage() == stage {
            break;
        }
        controller.advance();
    }
    controller
}

/// The records behind one screen
pub(crate) fn stage_data(stage: Stage, ds: &Dataset) -> Value {
    match stage {
        Stage::Welcome => json!({ "agents": ds.agents }),
        Stage::Step(StepId::Intake) => json!({ "complaint": ds.complaint }),
        Stage::Step(StepId::Traceability) => json!({
            "traceability": ds.traceability,
            "leak_trend": ds.leak_trend,
            "insight": ds.narrative.traceability_insight,
        }),
        Stage::Step(StepId::Changes) => json!({
            "changes": ds.changes,
            "correlations": ds.correlations,
        }),
        Stage::Step(StepId::Hypothesis) => json!({ "hypotheses": ds.hypotheses }),
        Stage::Step(StepId::Actions) => json!({ "countermeasures": ds.countermeasures }),
        Stage::Step(StepId::Kpi) => json!({
            "kpis": ds.kpis.iter().map(|k| k.derived()).collect::<Vec<_>>(),
            "summary": ds.narrative.kpi_summary,
        }),
        Stage::Complete => json!({
            "summary": AnalysisSummary::from_dataset(ds),
            "key_findings": ds.narrative.key_findings,
        }),
    }
}
