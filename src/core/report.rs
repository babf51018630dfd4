//! Analysis summary and report export
//!
//! The completion screen and the exported report share [`AnalysisSummary`].
//! Reports are rendered from templates embedded under `templates/`.

use chrono::{Local, NaiveDate};
use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::fixtures::Dataset;
use crate::entities::kpi::{format_value, KpiDerived};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const REPORT_TEMPLATE: &str = "report.md.tera";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(String),
}

/// Headline numbers of a finished analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Confidence of the first-ranked hypothesis
    pub confidence: Option<u8>,

    /// Signed percent change of the first KPI
    pub defect_reduction: Option<f64>,

    /// Number of planned countermeasures
    pub countermeasures: usize,

    /// KPIs meeting target, out of all KPIs
    pub targets_met: usize,
    pub kpi_count: usize,
}

impl AnalysisSummary {
    pub fn from_dataset(ds: &Dataset) -> Self {
        Self {
            confidence: ds.leading_hypothesis().map(|h| h.confidence),
            defect_reduction: ds
                .kpis
                .first()
                .and_then(|k| k.percent_change())
                .map(|c| c.delta.signum() * c.magnitude),
            countermeasures: ds.countermeasures.len(),
            targets_met: ds.kpis.iter().filter(|k| k.target_met()).count(),
            kpi_count: ds.kpis.len(),
        }
    }

    pub fn confidence_label(&self) -> String {
        self.confidence
            .map(|c| format!("{}%", c))
            .unwrap_or_else(|| "n/a".to_string())
    }

    pub fn defect_reduction_label(&self) -> String {
        self.defect_reduction
            .map(|d| format!("{:.1}%", d))
            .unwrap_or_else(|| "n/a".to_string())
    }
}

/// Everything a report is rendered from
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub prepared_by: String,
    pub generated: NaiveDate,
    pub summary: AnalysisSummary,
    pub dataset: &'a Dataset,
    pub kpis: Vec<KpiDerived>,
}

impl<'a> Report<'a> {
    pub fn new(dataset: &'a Dataset, prepared_by: impl Into<String>) -> Self {
        Self::dated(dataset, prepared_by, Local::now().date_naive())
    }

    pub fn dated(dataset: &'a Dataset, prepared_by: impl Into<String>, generated: NaiveDate) -> Self {
        Self {
            prepared_by: prepared_by.into(),
            generated,
            summary: AnalysisSummary::from_dataset(dataset),
            dataset,
            kpis: dataset.kpis.iter().map(|k| k.derived()).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|e| ReportError::Serialize(e.to_string()))
    }
}

/// Report renderer using Tera
pub struct ReportGenerator {
    tera: Tera,
}

impl ReportGenerator {
    /// Create a generator with the embedded templates
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| ReportError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render the Markdown report
    pub fn render_markdown(&self, report: &Report<'_>) -> Result<String, ReportError> {
        if !self.tera.get_template_names().any(|n| n == REPORT_TEMPLATE) {
            return Err(ReportError::NotFound(REPORT_TEMPLATE.to_string()));
        }

        let ds = report.dataset;
        let mut context = tera::Context::new();
        context.insert("prepared_by", &report.prepared_by);
        context.insert("generated", &report.generated.format("%Y-%m-%d").to_string());
        context.insert(
            "summary",
            &serde_json::json!({
                "confidence": report.summary.confidence_label(),
                "defect_reduction": report.summary.defect_reduction_label(),
                "countermeasures": report.summary.countermeasures,
            }),
        );
        context.insert("complaint", &ds.complaint);
        context.insert("traceability", &ds.traceability);
        context.insert("insight", &ds.narrative.traceability_insight);
        context.insert("correlations", &ds.correlations);
        context.insert("kpi_summary", &ds.narrative.kpi_summary);
        context.insert("findings", &ds.narrative.key_findings);

        let changes: Vec<_> = ds
            .changes
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "date": c.date.to_string(),
                    "category": c.category.to_string(),
                    "impact": c.impact.to_string(),
                    "description": c.description,
                    "changed_by": c.changed_by,
                })
            })
            .collect();
        context.insert("changes", &changes);

        let hypotheses: Vec<_> = ds
            .hypotheses
            .iter()
            .enumerate()
            .map(|(i, h)| {
                serde_json::json!({
                    "rank": i + 1,
                    "id": h.id,
                    "confidence": h.confidence,
                    "description": h.description,
                    "evidence": h.evidence,
                    "related": h.related_changes.join(", "),
                })
            })
            .collect();
        context.insert("hypotheses", &hypotheses);

        let countermeasures: Vec<_> = ds
            .countermeasures
            .iter()
            .map(|a| {
                serde_json::json!({
                    "id": a.id,
                    "action": a.action,
                    "responsible": a.responsible,
                    "deadline": a.deadline.to_string(),
                    "status": a.status.badge(),
                    "verification": a.verification,
                })
            })
            .collect();
        context.insert("countermeasures", &countermeasures);

        let kpis: Vec<_> = report
            .kpis
            .iter()
            .map(|k| {
                serde_json::json!({
                    "name": k.name,
                    "before": format_value(k.before, &k.unit),
                    "after": format_value(k.after, &k.unit),
                    "target": format_value(k.target, &k.unit),
                    "change": k.change.map(|c| c.to_string()).unwrap_or_else(|| "n/a".to_string()),
                    "status": if k.target_met { "Target Met" } else { "In Progress" },
                })
            })
            .collect();
        context.insert("kpis", &kpis);

        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| ReportError::RenderError(e.to_string()))
    }
}
