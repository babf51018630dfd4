//! Frame pieces shown around every screen

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::chart::gauge;
use crate::core::workflow::{StepId, StepState};
use crate::entities::agent::{Agent, AgentStatus};

/// One-line progress indicator over the six steps
///
/// Completed steps get a check, the current step a filled dot, pending
/// steps an open dot.
pub fn progress_indicator(progress: &[(StepId, StepState)]) -> String {
    let parts: Vec<String> = progress
        .iter()
        .map(|(step, state)| {
            let label = format!("{} {}", step.index() + 1, step.title());
            match state {
                StepState::Completed => format!("{} {}", style("✓").green(), style(label).green()),
                StepState::Current => format!("{} {}", style("●").cyan(), style(label).cyan().bold()),
                StepState::Pending => format!("{} {}", style("○").dim(), style(label).dim()),
            }
        })
        .collect();

    let done = progress
        .iter()
        .filter(|(_, s)| *s == StepState::Completed)
        .count();
    format!(
        "{}\n{}\n",
        parts.join(&format!(" {} ", style("›").dim())),
        style(format!("{}/{} steps completed", done, progress.len())).dim()
    )
}

/// Agent Activity Monitor
///
/// Progress gauges are drawn only for working agents.
pub fn agent_panel(agents: &[Agent]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Agent", "Status", "Current Task"]);
    for agent in agents {
        let task = if agent.shows_progress() {
            format!("{} {}", agent.current_task, gauge(f64::from(agent.progress), 10))
        } else {
            agent.current_task.clone()
        };
        builder.push_record([agent.name.clone(), agent.status.to_string(), task]);
    }

    let active = agents
        .iter()
        .filter(|a| a.status != AgentStatus::Idle)
        .count();
    format!(
        "{}\n{}\n{}\n",
        style("Agent Activity Monitor").bold(),
        builder.build().with(Style::rounded()),
        style(format!("{} of {} agents active", active, agents.len())).dim()
    )
}
