//! Countermeasure action plan items

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Countermeasure progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
}

impl ActionStatus {
    /// Badge text: upper-case, hyphen replaced by a space
    pub fn badge(&self) -> String {
        self.to_string().replace('-', " ").to_uppercase()
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Pending => write!(f, "pending"),
            ActionStatus::InProgress => write!(f, "in-progress"),
            ActionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A planned action addressing an identified cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countermeasure {
    /// Countermeasure identifier (e.g., "CM-001")
    pub id: String,

    /// What will be done
    pub action: String,

    /// Owning team or role
    pub responsible: String,

    /// Due date
    pub deadline: NaiveDate,

    /// Current status
    pub status: ActionStatus,

    /// How effectiveness will be checked
    pub verification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(ActionStatus::InProgress.badge(), "IN PROGRESS");
        assert_eq!(ActionStatus::Pending.badge(), "PENDING");
        assert_eq!(ActionStatus::Completed.badge(), "COMPLETED");
    }

    #[test]
    fn test_status_uses_hyphenated_names() {
        let status: ActionStatus = serde_yml::from_str("in-progress").unwrap();
        assert_eq!(status, ActionStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in-progress\"");
    }
}
