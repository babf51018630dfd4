//! One view per walkthrough screen

use console::style;
use tabled::{builder::Builder, settings::Style};

use super::{field_table, heading, RenderOptions};
use crate::cli::chart::{correlation_chart, gauge, trend_chart};
use crate::cli::helpers::wrap_text;
use crate::core::fixtures::Dataset;
use crate::core::report::AnalysisSummary;
use crate::core::workflow::{StepId, STEPS};
use crate::entities::change::Impact;
use crate::entities::complaint::ComplaintForm;
use crate::entities::countermeasure::ActionStatus;
use crate::entities::hypothesis::ConfidenceBand;
use crate::entities::kpi::format_value;
use crate::entities::series::LEAK_THRESHOLD;

fn step_heading(step: StepId, subtitle: &str) -> String {
    heading(
        &format!("Step {} of {} · {}", step.index() + 1, STEPS.len(), step.title()),
        Some(subtitle),
    )
}

fn wrapped(text: &str, width: usize, indent: &str) -> String {
    wrap_text(text, width)
        .into_iter()
        .map(|line| format!("{}{}\n", indent, line))
        .collect()
}

fn step_blurb(step: StepId) -> &'static str {
    match step {
        StepId::Intake => "Enter complaint: product details and defect description",
        StepId::Traceability => "Trace production: machine, lot and test results",
        StepId::Changes => "Scan 5M1E changes around the incident",
        StepId::Hypothesis => "Rank root cause hypotheses with evidence",
        StepId::Actions => "Plan countermeasures with owners and deadlines",
        StepId::Kpi => "Track KPIs before and after the countermeasures",
    }
}

pub fn welcome(ds: &Dataset, opts: &RenderOptions) -> String {
    let mut out = heading(
        "Welcome to the RCA Workbench",
        Some("Root cause analysis for manufacturing quality complaints"),
    );
    out.push_str(&wrapped(
        "A guided walkthrough from a customer complaint to verified countermeasures: \
         production traceability, 5M1E change analysis, ranked hypotheses and KPI tracking.",
        opts.wrap_width,
        "",
    ));
    out.push('\n');

    out.push_str(&format!("{}\n", style("How it works").bold()));
    for step in STEPS {
        out.push_str(&format!(
            "  {}. {:<18} {}\n",
            step.index() + 1,
            step.title(),
            style(step_blurb(step)).dim()
        ));
    }
    out.push('\n');
    out.push_str(&super::agent_panel(&ds.agents));
    out
}

pub fn intake_form(form: &ComplaintForm) -> String {
    let mut out = step_heading(StepId::Intake, "Customer complaint details (pre-filled sample)");
    out.push_str(&field_table(form.pairs()));
    out
}

/// Confirmation shown after the form is submitted
pub fn intake_echo(form: &ComplaintForm) -> String {
    let mut out = format!("{} Complaint submitted\n", style("✓").green());
    out.push_str(&field_table(form.pairs()));
    out.push_str(&format!(
        "{}\n",
        style("Tracing production records for the reported unit...").dim()
    ));
    out
}

pub fn traceability(ds: &Dataset, opts: &RenderOptions) -> String {
    let t = &ds.traceability;
    let mut out = step_heading(StepId::Traceability, "Production history of the affected unit");

    let date = t.production_date.format("%Y-%m-%d").to_string();
    out.push_str(&field_table([
        ("Production Line", t.production_line.as_str()),
        ("Machine", t.machine.as_str()),
        ("Lot", t.lot.as_str()),
        ("Production Date", date.as_str()),
        ("Shift", t.shift.as_str()),
        ("Operator", t.operator.as_str()),
        ("Test Result", t.test_result.as_str()),
    ]));
    let verdict = if t.is_ng() {
        style(format!(" {} ", t.test_verdict())).white().on_red().bold()
    } else {
        style(format!(" {} ", t.test_verdict())).black().on_green()
    };
    out.push_str(&format!("Leak test verdict: {}\n\n", verdict));

    if !t.child_parts.is_empty() {
        out.push_str(&format!("{}\n", style("Child Parts").bold()));
        let mut builder = Builder::default();
        builder.push_record(["Part Number", "Supplier", "Lot"]);
        for part in &t.child_parts {
            builder.push_record([part.part_number.as_str(), part.supplier.as_str(), part.lot.as_str()]);
        }
        out.push_str(&format!("{}\n\n", builder.build().with(Style::rounded())));
    }

    out.push_str(&format!("{}\n", style("Helium Leak Rate Trend (% NG)").bold()));
    out.push_str(&trend_chart(&ds.leak_trend, LEAK_THRESHOLD, opts.chart_width));
    out.push('\n');

    out.push_str(&format!("{}\n", style("Insight").bold()));
    out.push_str(&wrapped(&ds.narrative.traceability_insight, opts.wrap_width, "  "));
    out
}

pub fn changes(ds: &Dataset, opts: &RenderOptions) -> String {
    let mut out = step_heading(StepId::Changes, "Process changes logged around the incident");

    let mut builder = Builder::default();
    builder.push_record(["ID", "Date", "Category", "Impact", "Changed By", "Description"]);
    let desc_width = (opts.wrap_width / 2).max(20);
    for c in &ds.changes {
        builder.push_record([
            c.id.clone(),
            c.date.format("%Y-%m-%d").to_string(),
            c.category.to_string(),
            c.impact.to_string(),
            c.changed_by.clone(),
            wrap_text(&c.description, desc_width).join("\n"),
        ]);
    }
    out.push_str(&format!("{}\n", builder.build().with(Style::rounded())));

    let high = ds.changes.iter().filter(|c| c.impact == Impact::High).count();
    out.push_str(&format!(
        "{} high-impact change(s) of {}\n\n",
        style(high).red().bold(),
        ds.changes.len()
    ));

    out.push_str(&format!("{}\n", style("Change vs. Defect Correlation").bold()));
    out.push_str(&correlation_chart(&ds.correlations, opts.chart_width));
    out
}

pub fn hypotheses(ds: &Dataset, opts: &RenderOptions) -> String {
    let mut out = step_heading(StepId::Hypothesis, "Root cause hypotheses, in ranked order");

    for (rank, h) in ds.hypotheses.iter().enumerate() {
        let badge = format!("{}% confidence", h.confidence);
        let badge = match h.confidence_band() {
            ConfidenceBand::High => style(badge).red().bold(),
            ConfidenceBand::Medium => style(badge).yellow(),
            ConfidenceBand::Low => style(badge).dim(),
        };
        out.push_str(&format!(
            "{} {}  {}\n",
            style(format!("#{}", rank + 1)).bold(),
            style(&h.id).cyan(),
            badge
        ));
        out.push_str(&wrapped(&h.description, opts.wrap_width, "   "));

        if !h.evidence.is_empty() {
            out.push_str(&format!("   {}\n", style("Evidence").underlined()));
            for e in &h.evidence {
                out.push_str(&format!("   • {}\n", e));
            }
        }

        for id in &h.related_changes {
            let resolved = match ds.change(id) {
                Some(c) => format!("{} ({})", id, c.category),
                None => format!("{} {}", id, style("(not in change log)").dim()),
            };
            out.push_str(&format!("   {} {}\n", style("Related:").dim(), resolved));
        }
        out.push('\n');
    }
    out
}

pub fn actions(ds: &Dataset, opts: &RenderOptions) -> String {
    let mut out = step_heading(StepId::Actions, "Countermeasure action plan");

    let mut builder = Builder::default();
    builder.push_record(["ID", "Action", "Responsible", "Deadline", "Status", "Verification"]);
    let text_width = (opts.wrap_width / 3).max(20);
    for a in &ds.countermeasures {
        builder.push_record([
            a.id.clone(),
            wrap_text(&a.action, text_width).join("\n"),
            a.responsible.clone(),
            a.deadline.format("%Y-%m-%d").to_string(),
            a.status.badge(),
            wrap_text(&a.verification, text_width).join("\n"),
        ]);
    }
    out.push_str(&format!("{}\n", builder.build().with(Style::rounded())));

    let count = |status: ActionStatus| {
        ds.countermeasures
            .iter()
            .filter(|a| a.status == status)
            .count()
    };
    out.push_str(&format!(
        "{} completed, {} in progress, {} pending\n",
        style(count(ActionStatus::Completed)).green(),
        style(count(ActionStatus::InProgress)).yellow(),
        style(count(ActionStatus::Pending)).dim()
    ));
    out
}

pub fn kpis(ds: &Dataset, opts: &RenderOptions) -> String {
    let mut out = step_heading(StepId::Kpi, "Key performance indicators after countermeasures");

    for kpi in &ds.kpis {
        let d = kpi.derived();
        let change = match d.change {
            Some(c) if c.improving => style(c.to_string()).green(),
            Some(c) => style(c.to_string()).red(),
            None => style("n/a".to_string()).dim(),
        };
        let status = if d.target_met {
            style("Target Met").green().bold()
        } else {
            style("In Progress").yellow()
        };
        out.push_str(&format!(
            "{}  {} {}\n",
            style(&d.name).bold(),
            d.trend.symbol(),
            style(d.trend).dim()
        ));
        out.push_str(&format!(
            "   {} → {}  {}  target {} ({})  {}\n",
            format_value(d.before, &d.unit),
            format_value(d.after, &d.unit),
            change,
            format_value(d.target, &d.unit),
            d.direction,
            status
        ));
        out.push_str(&format!("   {}\n\n", gauge(d.progress, opts.chart_width / 2)));
    }

    out.push_str(&format!("{}\n", style("Summary").bold()));
    out.push_str(&wrapped(&ds.narrative.kpi_summary, opts.wrap_width, "  "));
    out
}

pub fn complete(ds: &Dataset) -> String {
    let summary = AnalysisSummary::from_dataset(ds);
    let mut out = heading(
        "Analysis Complete!",
        Some("Root cause identified with countermeasures and KPI tracking in place."),
    );

    let mut builder = Builder::default();
    builder.push_record(["Confidence", "Defect Reduction", "Countermeasures"]);
    builder.push_record([
        summary.confidence_label(),
        summary.defect_reduction_label(),
        summary.countermeasures.to_string(),
    ]);
    out.push_str(&format!("{}\n", builder.build().with(Style::rounded())));
    out.push_str(&format!(
        "{} of {} KPIs at target\n\n",
        summary.targets_met, summary.kpi_count
    ));

    out.push_str(&format!("{}\n", style("Key Findings").bold()));
    for finding in &ds.narrative.key_findings {
        out.push_str(&format!("  {} {}\n", style("✓").green(), finding));
    }
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        style("Export with `rca report`; run `rca walk` again for a new analysis.").dim()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    fn sample() -> Dataset {
        Dataset::sample().unwrap()
    }

    fn plain(s: String) -> String {
        strip_ansi_codes(&s).to_string()
    }

    #[test]
    fn test_welcome_lists_steps_and_agents() {
        let out = plain(welcome(&sample(), &RenderOptions::default()));
        assert!(out.contains("1. Complaint Intake"));
        assert!(out.contains("6. KPI Tracking"));
        assert!(out.contains("Agent Activity Monitor"));
        assert!(out.contains("0 of 8 agents active"));
    }

    #[test]
    fn test_intake_form_is_prefilled() {
        let ds = sample();
        let out = plain(intake_form(&ComplaintForm::prefilled(&ds.complaint)));
        assert!(out.contains("Step 1 of 6 · Complaint Intake"));
        assert!(out.contains("SFA2 HVAC Unit"));
        assert!(out.contains("Report Date"));
    }

    #[test]
    fn test_intake_echo_shows_submitted_values() {
        let form = ComplaintForm {
            serial_number: "XYZ-1".to_string(),
            ..Default::default()
        };
        let out = plain(intake_echo(&form));
        assert!(out.contains("Complaint submitted"));
        assert!(out.contains("XYZ-1"));
    }

    #[test]
    fn test_traceability_view() {
        let out = plain(traceability(&sample(), &RenderOptions::default()));
        assert!(out.contains("LOT-247"));
        assert!(out.contains("M-3042 (Brazing Station)"));
        assert!(out.contains("Leak test verdict:  NG "));
        assert!(out.contains("FLUX-CORE-22"));
        assert!(out.contains("2.0% threshold"));
        assert!(out.contains("Jun 15"));
        assert!(out.contains("4.7%"));
    }

    #[test]
    fn test_changes_view() {
        let out = plain(changes(&sample(), &RenderOptions::default()));
        assert!(out.contains("CHG-001"));
        assert!(out.contains("Material"));
        assert!(out.contains("2 high-impact change(s) of 5"));
        assert!(out.contains("Flux Weight Reduction"));
        assert!(out.contains("0.87"));
    }

    #[test]
    fn test_hypotheses_keep_stored_order() {
        let out = plain(hypotheses(&sample(), &RenderOptions::default()));
        let first = out.find("#1 HYP-001  85% confidence").unwrap();
        let second = out.find("#2 HYP-002  65% confidence").unwrap();
        let third = out.find("#3 HYP-003  72% confidence").unwrap();
        assert!(first < second && second < third);
        assert!(out.contains("Related: CHG-002 (Machine)"));
    }

    #[test]
    fn test_hypothesis_with_dangling_reference() {
        let mut ds = sample();
        ds.hypotheses[0].related_changes = vec!["CHG-999".to_string()];
        let out = plain(hypotheses(&ds, &RenderOptions::default()));
        assert!(out.contains("CHG-999 (not in change log)"));
    }

    #[test]
    fn test_actions_view() {
        let out = plain(actions(&sample(), &RenderOptions::default()));
        assert!(out.contains("CM-004"));
        assert!(out.contains("IN PROGRESS"));
        assert!(out.contains("1 completed, 1 in progress, 2 pending"));
    }

    #[test]
    fn test_kpi_view() {
        let out = plain(kpis(&sample(), &RenderOptions::default()));
        assert!(out.contains("4.7% → 1.8%  ↓ 61.7%  target 2% (lower is better)  Target Met"));
        assert!(out.contains("94.2% → 97.8%  ↑ 3.8%  target 98% (higher is better)  In Progress"));
        assert!(out.contains("18.5 min → 12.3 min  ↓ 33.5%"));
        assert!(out.contains("sustained"));
    }

    #[test]
    fn test_kpi_view_zero_baseline() {
        let mut ds = sample();
        ds.kpis[0].before = 0.0;
        let out = plain(kpis(&ds, &RenderOptions::default()));
        assert!(out.contains("0% → 1.8%  n/a"));
    }

    #[test]
    fn test_complete_view() {
        let out = plain(complete(&sample()));
        assert!(out.contains("Analysis Complete!"));
        assert!(out.contains("85%"));
        assert!(out.contains("-61.7%"));
        assert!(out.contains("3 of 4 KPIs at target"));
        assert!(out.contains("✓ Primary cause: Flux weight reduction (5.2g → 4.8g)"));
    }
}
