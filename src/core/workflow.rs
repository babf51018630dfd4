//! Workflow controller for the six-stage analysis walkthrough
//!
//! The walkthrough moves strictly forward through
//! `intake → traceability → changes → hypothesis → actions → kpi`, bracketed
//! by the `welcome` and `complete` screens. The controller owns the current
//! stage and the set of completed steps; nothing else mutates them.
//!
//! Submitting the intake form does not move the stage immediately. It hands
//! back a [`DeferredAdvance`] that the caller resolves after the display
//! delay. Each ticket is stamped with the controller generation, which every
//! transition bumps, so a ticket issued before a reset is ignored.

use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::entities::complaint::ComplaintForm;

/// Default pause between intake submission and the traceability stage
pub const DEFAULT_INTAKE_DELAY: Duration = Duration::from_millis(500);

/// The six analysis steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Intake,
    Traceability,
    Changes,
    Hypothesis,
    Actions,
    Kpi,
}

/// Step sequence; position in this array is the step's index
pub const STEPS: [StepId; 6] = [
    StepId::Intake,
    StepId::Traceability,
    StepId::Changes,
    StepId::Hypothesis,
    StepId::Actions,
    StepId::Kpi,
];

impl StepId {
    /// Zero-based position in [`STEPS`]
    pub fn index(self) -> usize {
        match self {
            StepId::Intake => 0,
            StepId::Traceability => 1,
            StepId::Changes => 2,
            StepId::Hypothesis => 3,
            StepId::Actions => 4,
            StepId::Kpi => 5,
        }
    }

    /// The following step, or `None` after the last one
    pub fn next(self) -> Option<StepId> {
        STEPS.get(self.index() + 1).copied()
    }

    /// Progress indicator label
    pub fn title(self) -> &'static str {
        match self {
            StepId::Intake => "Complaint Intake",
            StepId::Traceability => "Traceability",
            StepId::Changes => "5M1E Changes",
            StepId::Hypothesis => "Root Cause",
            StepId::Actions => "Countermeasures",
            StepId::Kpi => "KPI Tracking",
        }
    }

    /// Label of the button that leaves this step
    pub fn next_label(self) -> &'static str {
        match self {
            StepId::Intake => "Start Analysis",
            StepId::Traceability => "Next: Analyze Changes",
            StepId::Changes => "Next: Form Hypotheses",
            StepId::Hypothesis => "Next: Plan Actions",
            StepId::Actions => "Next: View KPIs",
            StepId::Kpi => "Complete Analysis",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Intake => "intake",
            StepId::Traceability => "traceability",
            StepId::Changes => "changes",
            StepId::Hypothesis => "hypothesis",
            StepId::Actions => "actions",
            StepId::Kpi => "kpi",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every screen the walkthrough can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Welcome,
    Step(StepId),
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Welcome,
        Stage::Step(StepId::Intake),
        Stage::Step(StepId::Traceability),
        Stage::Step(StepId::Changes),
        Stage::Step(StepId::Hypothesis),
        Stage::Step(StepId::Actions),
        Stage::Step(StepId::Kpi),
        Stage::Complete,
    ];

    /// The analysis step this stage shows, if any
    pub fn step(self) -> Option<StepId> {
        match self {
            Stage::Step(step) => Some(step),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Welcome => "welcome",
            Stage::Step(step) => step.as_str(),
            Stage::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Stage::ALL
            .iter()
            .find(|stage| stage.as_str() == wanted)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid stage: {}. Use welcome, intake, traceability, changes, hypothesis, actions, kpi, or complete",
                    s
                )
            })
    }
}

/// State of one step in the progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

/// Ticket for the delayed `intake → traceability` move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the intake only advances once the ticket is resolved"]
pub struct DeferredAdvance {
    generation: u64,
    delay: Duration,
}

impl DeferredAdvance {
    /// How long the caller should wait before resolving
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Stage machine for the walkthrough
#[derive(Debug, Clone)]
pub struct WorkflowController {
    stage: Stage,
    completed: BTreeSet<StepId>,
    generation: u64,
    intake_delay: Duration,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowController {
    /// Controller at the welcome screen with the default intake delay
    pub fn new() -> Self {
        Self::with_intake_delay(DEFAULT_INTAKE_DELAY)
    }

    pub fn with_intake_delay(intake_delay: Duration) -> Self {
        Self {
            stage: Stage::Welcome,
            completed: BTreeSet::new(),
            generation: 0,
            intake_delay,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn completed(&self) -> &BTreeSet<StepId> {
        &self.completed
    }

    pub fn is_completed(&self, step: StepId) -> bool {
        self.completed.contains(&step)
    }

    pub fn intake_delay(&self) -> Duration {
        self.intake_delay
    }

    /// Per-step state for the progress indicator
    pub fn progress(&self) -> Vec<(StepId, StepState)> {
        STEPS
            .iter()
            .map(|&step| {
                let state = if self.completed.contains(&step) {
                    StepState::Completed
                } else if self.stage == Stage::Step(step) {
                    StepState::Current
                } else {
                    StepState::Pending
                };
                (step, state)
            })
            .collect()
    }

    fn transition(&mut self, to: Stage) {
        tracing::debug!(from = %self.stage, to = %to, "stage transition");
        self.stage = to;
        self.generation += 1;
    }

    /// Leave the welcome screen for the intake form
    ///
    /// From `complete` this starts a fresh run; inside the step sequence it
    /// changes nothing.
    pub fn start(&mut self) -> Stage {
        match self.stage {
            Stage::Welcome => self.transition(Stage::Step(StepId::Intake)),
            Stage::Complete => {
                self.completed.clear();
                self.transition(Stage::Step(StepId::Intake));
            }
            Stage::Step(step) => {
                tracing::debug!(%step, "start ignored inside the step sequence");
            }
        }
        self.stage
    }

    /// Accept the intake form and schedule the move to traceability
    ///
    /// The submitted values are not kept; later stages show the bundled
    /// records regardless of what was entered. Outside the intake stage this
    /// returns `None` and changes nothing.
    pub fn submit_intake(&mut self, form: ComplaintForm) -> Option<DeferredAdvance> {
        if self.stage != Stage::Step(StepId::Intake) {
            tracing::warn!(stage = %self.stage, "intake submitted outside the intake stage");
            return None;
        }
        tracing::info!(
            product_model = %form.product_model,
            serial_number = %form.serial_number,
            defect_type = %form.defect_type,
            "intake submitted"
        );

        self.completed.insert(StepId::Intake);
        self.generation += 1;
        Some(DeferredAdvance {
            generation: self.generation,
            delay: self.intake_delay,
        })
    }

    /// Apply a deferred intake advance
    ///
    /// Returns `false` if anything has moved the controller since the ticket
    /// was issued.
    pub fn resolve(&mut self, ticket: DeferredAdvance) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale intake advance dropped"
            );
            return false;
        }
        self.transition(Stage::Step(StepId::Traceability));
        true
    }

    /// Complete the current step and move to the next one
    ///
    /// After the last step the walkthrough moves to `complete`. From
    /// `welcome` this behaves like [`start`](Self::start); from `complete` it
    /// changes nothing.
    pub fn advance(&mut self) -> Stage {
        match self.stage {
            Stage::Welcome => return self.start(),
            Stage::Complete => {}
            Stage::Step(step) => {
                self.completed.insert(step);
                let to = step.next().map(Stage::Step).unwrap_or(Stage::Complete);
                self.transition(to);
            }
        }
        self.stage
    }

    /// Back to the welcome screen with nothing completed
    pub fn reset(&mut self) {
        self.completed.clear();
        self.transition(Stage::Welcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reach(stage: Stage) -> WorkflowController {
        let mut wf = WorkflowController::new();
        if stage == Stage::Welcome {
            return wf;
        }
        wf.start();
        while wf.stage() != stage {
            wf.advance();
        }
        wf
    }

    fn at(step: StepId) -> WorkflowController {
        reach(Stage::Step(step))
    }

    #[test]
    fn test_start_moves_to_intake() {
        let mut wf = WorkflowController::new();
        assert_eq!(wf.stage(), Stage::Welcome);
        assert_eq!(wf.start(), Stage::Step(StepId::Intake));
        assert!(wf.completed().is_empty());
    }

    #[test]
    fn test_advance_is_linear() {
        for (i, step) in STEPS.iter().enumerate() {
            let mut wf = at(*step);
            let to = wf.advance();
            assert!(wf.is_completed(*step));
            match STEPS.get(i + 1) {
                Some(next) => assert_eq!(to, Stage::Step(*next)),
                None => assert_eq!(to, Stage::Complete),
            }
        }
    }

    #[test]
    fn test_full_run_completes_every_step() {
        let mut wf = WorkflowController::new();
        wf.start();
        for _ in 0..STEPS.len() {
            wf.advance();
        }
        assert_eq!(wf.stage(), Stage::Complete);
        assert_eq!(wf.completed().len(), 6);
        // No further movement once complete
        assert_eq!(wf.advance(), Stage::Complete);
    }

    #[test]
    fn test_advance_from_welcome_starts() {
        let mut wf = WorkflowController::new();
        assert_eq!(wf.advance(), Stage::Step(StepId::Intake));
        assert!(wf.completed().is_empty());
    }

    #[test]
    fn test_reset_from_any_stage() {
        for stage in Stage::ALL {
            let mut wf = reach(stage);
            assert_eq!(wf.stage(), stage);
            wf.reset();
            assert_eq!(wf.stage(), Stage::Welcome);
            assert!(wf.completed().is_empty());
        }
    }

    #[test]
    fn test_submit_intake_defers_the_move() {
        let mut wf = at(StepId::Intake);
        let ticket = wf.submit_intake(ComplaintForm::default()).unwrap();
        assert_eq!(ticket.delay(), DEFAULT_INTAKE_DELAY);
        assert!(wf.is_completed(StepId::Intake));
        assert_eq!(wf.stage(), Stage::Step(StepId::Intake));

        assert!(wf.resolve(ticket));
        assert_eq!(wf.stage(), Stage::Step(StepId::Traceability));
    }

    #[test]
    fn test_stale_ticket_after_reset_is_ignored() {
        let mut wf = at(StepId::Intake);
        let ticket = wf.submit_intake(ComplaintForm::default()).unwrap();
        wf.reset();
        assert!(!wf.resolve(ticket));
        assert_eq!(wf.stage(), Stage::Welcome);
        assert!(wf.completed().is_empty());
    }

    #[test]
    fn test_ticket_cannot_move_backwards() {
        let mut wf = at(StepId::Intake);
        let ticket = wf.submit_intake(ComplaintForm::default()).unwrap();
        wf.advance();
        wf.advance();
        assert_eq!(wf.stage(), Stage::Step(StepId::Changes));
        assert!(!wf.resolve(ticket));
        assert_eq!(wf.stage(), Stage::Step(StepId::Changes));
    }

    #[test]
    fn test_ticket_resolves_once() {
        let mut wf = at(StepId::Intake);
        let ticket = wf.submit_intake(ComplaintForm::default()).unwrap();
        assert!(wf.resolve(ticket));
        assert!(!wf.resolve(ticket));
    }

    #[test]
    fn test_submit_outside_intake_is_ignored() {
        let mut wf = WorkflowController::new();
        assert!(wf.submit_intake(ComplaintForm::default()).is_none());
        let mut wf = at(StepId::Kpi);
        assert!(wf.submit_intake(ComplaintForm::default()).is_none());
        assert_eq!(wf.stage(), Stage::Step(StepId::Kpi));
    }

    #[test]
    fn test_start_inside_sequence_is_noop() {
        let mut wf = at(StepId::Changes);
        assert_eq!(wf.start(), Stage::Step(StepId::Changes));
        assert!(wf.is_completed(StepId::Traceability));
    }

    #[test]
    fn test_start_after_complete_begins_fresh_run() {
        let mut wf = at(StepId::Kpi);
        wf.advance();
        assert_eq!(wf.stage(), Stage::Complete);
        assert_eq!(wf.start(), Stage::Step(StepId::Intake));
        assert!(wf.completed().is_empty());
    }

    #[test]
    fn test_progress_states() {
        let wf = at(StepId::Changes);
        let progress = wf.progress();
        assert_eq!(progress[0], (StepId::Intake, StepState::Completed));
        assert_eq!(progress[1], (StepId::Traceability, StepState::Completed));
        assert_eq!(progress[2], (StepId::Changes, StepState::Current));
        assert_eq!(progress[5], (StepId::Kpi, StepState::Pending));
    }

    #[test]
    fn test_custom_delay_is_carried() {
        let mut wf = WorkflowController::with_intake_delay(Duration::ZERO);
        wf.start();
        let ticket = wf.submit_intake(ComplaintForm::default()).unwrap();
        assert_eq!(ticket.delay(), Duration::ZERO);
    }

    #[test]
    fn test_stage_parse() {
        assert_eq!("kpi".parse::<Stage>().unwrap(), Stage::Step(StepId::Kpi));
        assert_eq!("Complete".parse::<Stage>().unwrap(), Stage::Complete);
        assert!("review".parse::<Stage>().is_err());
    }

    #[test]
    fn test_step_next_chain() {
        assert_eq!(StepId::Intake.next(), Some(StepId::Traceability));
        assert_eq!(StepId::Actions.next(), Some(StepId::Kpi));
        assert_eq!(StepId::Kpi.next(), None);
    }
}
