//! Agent Activity Monitor entries
//!
//! The monitor is a static panel: statuses and progress are whatever the
//! dataset says and never change while a session runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Working,
    Completed,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub status: AgentStatus,
    pub current_task: String,

    /// Percent complete; only drawn while working
    #[serde(default)]
    pub progress: u8,
}

impl Agent {
    pub fn shows_progress(&self) -> bool {
        self.status == AgentStatus::Working
    }
}
