//! Entity type definitions
//!
//! Records shown by the walkthrough:
//!
//! - [`Complaint`] and its editable [`ComplaintForm`]
//! - [`TraceabilityData`] - production history of the affected unit
//! - [`ChangeLogEntry`] - 5M1E process changes
//! - [`Hypothesis`] - ranked root cause candidates
//! - [`Countermeasure`] - the action plan
//! - [`Kpi`] - indicators tracked before and after
//! - [`TrendPoint`] / [`CorrelationEntry`] - chart series
//! - [`Agent`] - the static Agent Activity Monitor

pub mod agent;
pub mod change;
pub mod complaint;
pub mod countermeasure;
pub mod hypothesis;
pub mod kpi;
pub mod series;
pub mod traceability;

pub use agent::{Agent, AgentStatus};
pub use change::{Category, ChangeLogEntry, Impact};
pub use complaint::{Complaint, ComplaintForm, FormField};
pub use countermeasure::{ActionStatus, Countermeasure};
pub use hypothesis::{ConfidenceBand, Hypothesis};
pub use kpi::{Kpi, KpiDerived, Trend};
pub use series::{CorrelationBand, CorrelationEntry, TrendPoint};
pub use traceability::{ChildPart, TraceabilityData};
