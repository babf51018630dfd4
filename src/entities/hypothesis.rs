//! Root cause hypotheses

use serde::{Deserialize, Serialize};

/// Confidence band used for badge colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Above 80
    High,
    /// Above 60
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: u8) -> Self {
        if confidence > 80 {
            ConfidenceBand::High
        } else if confidence > 60 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// A candidate root cause with its supporting evidence
///
/// Display order is the stored order; hypotheses are never re-ranked by
/// confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Hypothesis identifier (e.g., "HYP-001")
    pub id: String,

    /// Statement of the suspected cause
    pub description: String,

    /// Confidence in percent (0-100)
    pub confidence: u8,

    /// Supporting evidence
    #[serde(default)]
    pub evidence: Vec<String>,

    /// Change log ids this hypothesis points at (not checked against the log)
    #[serde(default)]
    pub related_changes: Vec<String>,
}

impl Hypothesis {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}
