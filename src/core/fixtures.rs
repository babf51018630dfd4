//! The embedded sample dataset
//!
//! Every record shown by the walkthrough comes from `fixtures/sample.yaml`,
//! compiled into the binary and deserialized once at startup.

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::agent::Agent;
use crate::entities::change::ChangeLogEntry;
use crate::entities::complaint::Complaint;
use crate::entities::countermeasure::Countermeasure;
use crate::entities::hypothesis::Hypothesis;
use crate::entities::kpi::Kpi;
use crate::entities::series::{CorrelationEntry, TrendPoint};
use crate::entities::traceability::TraceabilityData;

#[derive(Embed)]
#[folder = "fixtures/"]
struct EmbeddedFixtures;

/// Name of the bundled dataset
pub const SAMPLE_DATASET: &str = "sample.yaml";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Dataset {name} is not valid UTF-8")]
    Encoding { name: String },

    #[error("Failed to parse dataset {name}: {message}")]
    Parse { name: String, message: String },
}

/// Fixed explanatory texts shown alongside the data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(default)]
    pub traceability_insight: String,

    #[serde(default)]
    pub kpi_summary: String,

    #[serde(default)]
    pub key_findings: Vec<String>,
}

/// All records behind the six stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub complaint: Complaint,
    pub traceability: TraceabilityData,

    #[serde(default)]
    pub changes: Vec<ChangeLogEntry>,

    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,

    #[serde(default)]
    pub countermeasures: Vec<Countermeasure>,

    #[serde(default)]
    pub kpis: Vec<Kpi>,

    #[serde(default)]
    pub leak_trend: Vec<TrendPoint>,

    #[serde(default)]
    pub correlations: Vec<CorrelationEntry>,

    #[serde(default)]
    pub agents: Vec<Agent>,

    #[serde(default)]
    pub narrative: Narrative,
}

impl Dataset {
    /// Load the bundled sample dataset
    pub fn sample() -> Result<Self, FixtureError> {
        Self::load_embedded(SAMPLE_DATASET)
    }

    /// Load a dataset bundled under `fixtures/`
    pub fn load_embedded(name: &str) -> Result<Self, FixtureError> {
        let file =
            EmbeddedFixtures::get(name).ok_or_else(|| FixtureError::NotFound(name.to_string()))?;
        let text = std::str::from_utf8(&file.data).map_err(|_| FixtureError::Encoding {
            name: name.to_string(),
        })?;
        let dataset = Self::from_yaml(name, text)?;
        tracing::debug!(
            dataset = name,
            changes = dataset.changes.len(),
            hypotheses = dataset.hypotheses.len(),
            kpis = dataset.kpis.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    fn from_yaml(name: &str, text: &str) -> Result<Self, FixtureError> {
        serde_yml::from_str(text).map_err(|e| FixtureError::Parse {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Names of the bundled datasets
    pub fn available() -> Vec<String> {
        EmbeddedFixtures::iter().map(|f| f.to_string()).collect()
    }

    pub fn change(&self, id: &str) -> Option<&ChangeLogEntry> {
        self.changes.iter().find(|c| c.id == id)
    }

    /// Hypothesis → change references that point at no logged change
    ///
    /// Informational; nothing rejects a dataset with dangling references.
    pub fn unresolved_change_refs(&self) -> Vec<(&str, &str)> {
        self.hypotheses
            .iter()
            .flat_map(|h| {
                h.related_changes
                    .iter()
                    .filter(|id| self.change(id).is_none())
                    .map(move |id| (h.id.as_str(), id.as_str()))
            })
            .collect()
    }

    /// The first-ranked hypothesis (stored order)
    pub fn leading_hypothesis(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }
}
