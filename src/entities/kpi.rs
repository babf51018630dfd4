//! KPI records tracked before and after countermeasures

use serde::{Deserialize, Serialize};

use crate::core::kpi::{self, Direction, PercentChange};

/// Asserted trend of a KPI
///
/// Stated by the data, not derived from before/after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

impl Trend {
    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Improving => "▲",
            Trend::Stable => "■",
            Trend::Degrading => "▼",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Degrading => write!(f, "degrading"),
        }
    }
}

/// A key performance indicator with before/after readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Display name (e.g., "Helium Leak NG Rate")
    pub name: String,

    /// Reading before countermeasures
    pub before: f64,

    /// Reading after countermeasures
    pub after: f64,

    /// Target value
    pub target: f64,

    /// Unit label ("%", "min", "PPM")
    pub unit: String,

    /// Asserted trend
    pub trend: Trend,

    /// Explicit direction; when absent the name rules apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_is_better: Option<bool>,
}

/// Derived display values for one KPI
#[derive(Debug, Clone, Serialize)]
pub struct KpiDerived {
    pub name: String,
    pub unit: String,
    pub before: f64,
    pub after: f64,
    pub target: f64,
    pub direction: Direction,
    pub change: Option<PercentChange>,
    pub target_met: bool,
    pub progress: f64,
    pub trend: Trend,
}

/// Format a reading with its unit ("1.8%", "12.3 min")
pub fn format_value(value: f64, unit: &str) -> String {
    match unit {
        "" => value.to_string(),
        "%" => format!("{}%", value),
        _ => format!("{} {}", value, unit),
    }
}

impl Kpi {
    /// Direction for the change arrow
    pub fn change_direction(&self) -> Direction {
        self.lower_is_better
            .map(Direction::from_flag)
            .unwrap_or_else(|| Direction::for_change(&self.name))
    }

    /// Direction for the target badge
    pub fn target_direction(&self) -> Direction {
        self.lower_is_better
            .map(Direction::from_flag)
            .unwrap_or_else(|| Direction::for_target(&self.name))
    }

    pub fn percent_change(&self) -> Option<PercentChange> {
        kpi::percent_change_with(self.before, self.after, self.change_direction())
    }

    pub fn target_met(&self) -> bool {
        kpi::target_met_with(self.after, self.target, self.target_direction())
    }

    pub fn progress_percent(&self) -> f64 {
        kpi::progress_percent(self.after, self.target, &self.name)
    }

    pub fn derived(&self) -> KpiDerived {
        KpiDerived {
            name: self.name.clone(),
            unit: self.unit.clone(),
            before: self.before,
            after: self.after,
            target: self.target,
            direction: self.target_direction(),
            change: self.percent_change(),
            target_met: self.target_met(),
            progress: self.progress_percent(),
            trend: self.trend,
        }
    }
}
