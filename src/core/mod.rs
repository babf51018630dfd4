//! Core module - workflow, derivations and the bundled dataset

pub mod config;
pub mod fixtures;
pub mod kpi;
pub mod report;
pub mod workflow;

pub use config::{Config, ConfigError};
pub use fixtures::{Dataset, FixtureError, Narrative};
pub use kpi::{Direction, PercentChange};
pub use report::{AnalysisSummary, Report, ReportError, ReportGenerator};
pub use workflow::{DeferredAdvance, Stage, StepId, StepState, WorkflowController};
