//! Production traceability record for the affected unit

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A child part consumed by the affected unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPart {
    pub part_number: String,
    pub supplier: String,
    pub lot: String,
}

/// Where, when and by whom the affected unit was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceabilityData {
    /// Production line
    pub production_line: String,

    /// Machine / station identifier
    pub machine: String,

    /// Production lot
    pub lot: String,

    /// Build date
    pub production_date: NaiveDate,

    /// Shift label
    pub shift: String,

    /// Operator badge
    pub operator: String,

    /// End-of-line test result as recorded (e.g., "NG (2.1 Pa-m³/s - ...)")
    pub test_result: String,

    /// Child parts with their supplier lots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_parts: Vec<ChildPart>,
}

impl TraceabilityData {
    /// The verdict token of the test result (its first word)
    pub fn test_verdict(&self) -> &str {
        self.test_result.split_whitespace().next().unwrap_or("")
    }

    /// Whether the recorded test failed
    pub fn is_ng(&self) -> bool {
        self.test_verdict().eq_ignore_ascii_case("NG")
    }
}
