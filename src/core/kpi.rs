//! KPI derivation: percent change, improvement direction, and target checks
//!
//! Two families of functions live here. The name-based ones (`percent_change`,
//! `target_met`, `progress_percent`) infer a KPI's direction from its name the
//! way the walkthrough always has: an exact list of lower-is-better names for
//! the change arrow, and a substring match for the target badge. The
//! direction-based ones (`*_with`) take the direction explicitly and are what
//! [`Kpi`](crate::entities::kpi::Kpi) records use when they carry a
//! `lower_is_better` flag.

use serde::Serialize;

/// KPI names whose improvement is a decrease (exact match)
pub const LOWER_IS_BETTER_NAMES: [&str; 3] =
    ["Helium Leak NG Rate", "Mean Time To Repair", "Defect Rate (PPM)"];

/// Name fragments that mark a KPI as lower-is-better for target checks
pub const LOWER_IS_BETTER_HINTS: [&str; 3] = ["Rate", "Repair", "Defect"];

/// Which way a KPI should move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

impl Direction {
    pub fn from_flag(lower_is_better: bool) -> Self {
        if lower_is_better {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        }
    }

    /// Direction used for the change arrow: exact name list
    pub fn for_change(name: &str) -> Self {
        Self::from_flag(LOWER_IS_BETTER_NAMES.contains(&name))
    }

    /// Direction used for the target badge: substring heuristic
    ///
    /// A name like "Repair Yield" lands on the wrong side of this rule.
    pub fn for_target(name: &str) -> Self {
        Self::from_flag(LOWER_IS_BETTER_HINTS.iter().any(|hint| name.contains(hint)))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::LowerIsBetter => write!(f, "lower is better"),
            Direction::HigherIsBetter => write!(f, "higher is better"),
        }
    }
}

/// Percent change between a before and after reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentChange {
    /// Signed change in percent, `(after - before) / before * 100`
    pub delta: f64,

    /// `|delta|` rounded to one decimal
    pub magnitude: f64,

    /// Whether the move is in the KPI's good direction
    pub improving: bool,
}

impl PercentChange {
    /// Arrow for the raw direction of travel
    pub fn arrow(&self) -> &'static str {
        if self.delta < 0.0 {
            "↓"
        } else {
            "↑"
        }
    }
}

impl std::fmt::Display for PercentChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.1}%", self.arrow(), self.magnitude)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percent change with an explicit direction
///
/// Returns `None` when `before` is zero or either reading is not finite.
pub fn percent_change_with(before: f64, after: f64, direction: Direction) -> Option<PercentChange> {
    if before == 0.0 || !before.is_finite() || !after.is_finite() {
        return None;
    }
    let delta = (after - before) / before * 100.0;
    let improving = match direction {
        Direction::LowerIsBetter => delta < 0.0,
        Direction::HigherIsBetter => delta > 0.0,
    };
    Some(PercentChange {
        delta,
        magnitude: round1(delta.abs()),
        improving,
    })
}

/// Percent change, direction taken from the KPI name
pub fn percent_change(before: f64, after: f64, name: &str) -> Option<PercentChange> {
    percent_change_with(before, after, Direction::for_change(name))
}

/// Target check with an explicit direction
pub fn target_met_with(after: f64, target: f64, direction: Direction) -> bool {
    match direction {
        Direction::LowerIsBetter => after <= target,
        Direction::HigherIsBetter => after >= target,
    }
}

/// Target check, direction taken from the KPI name
pub fn target_met(after: f64, target: f64, name: &str) -> bool {
    target_met_with(after, target, Direction::for_target(name))
}

/// Progress bar fill in percent, capped at 100
///
/// Yield KPIs scale the after/target ratio by 100, everything else by 50.
pub fn progress_percent(after: f64, target: f64, name: &str) -> f64 {
    if target == 0.0 || !target.is_finite() {
        return 0.0;
    }
    let scale = if name.contains("Yield") { 100.0 } else { 50.0 };
    (after / target * scale).clamp(0.0, 100.0)
}
