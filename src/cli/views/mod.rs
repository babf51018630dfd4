//! Terminal rendering of the walkthrough screens
//!
//! Every view is a pure function from records to a `String`; commands decide
//! where the text goes. Tables inside views are built with `tabled` and stay
//! uncoloured; badges and charts carry the colour.

mod panels;
mod stages;

pub use panels::{agent_panel, progress_indicator};
pub use stages::{
    actions, changes, complete, hypotheses, intake_echo, intake_form, kpis, traceability, welcome,
};

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::core::config::{Config, DEFAULT_CHART_WIDTH, DEFAULT_WRAP_WIDTH};
use crate::core::fixtures::Dataset;
use crate::core::workflow::{Stage, StepId};
use crate::entities::complaint::ComplaintForm;

/// Layout knobs shared by all views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub chart_width: usize,
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_width: DEFAULT_CHART_WIDTH,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chart_width: config.chart_width(),
            wrap_width: config.wrap_width(),
        }
    }
}

/// Render the body of one screen
///
/// The intake screen shows the form pre-filled from the dataset's complaint.
pub fn render_stage(stage: Stage, ds: &Dataset, opts: &RenderOptions) -> String {
    match stage {
        Stage::Welcome => welcome(ds, opts),
        Stage::Step(StepId::Intake) => intake_form(&ComplaintForm::prefilled(&ds.complaint)),
        Stage::Step(StepId::Traceability) => traceability(ds, opts),
        Stage::Step(StepId::Changes) => changes(ds, opts),
        Stage::Step(StepId::Hypothesis) => hypotheses(ds, opts),
        Stage::Step(StepId::Actions) => actions(ds, opts),
        Stage::Step(StepId::Kpi) => kpis(ds, opts),
        Stage::Complete => complete(ds),
    }
}

/// Section heading with an optional subtitle
pub(crate) fn heading(title: &str, subtitle: Option<&str>) -> String {
    let mut out = format!("{}\n", style(title).bold().underlined());
    if let Some(sub) = subtitle {
        out.push_str(&format!("{}\n", style(sub).dim()));
    }
    out.push('\n');
    out
}

/// Two-column field/value table
pub(crate) fn field_table<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, value) in rows {
        builder.push_record([field, value]);
    }
    format!("{}\n", builder.build().with(Style::rounded()))
}
