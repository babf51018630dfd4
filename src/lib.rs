//! RCA Workbench
//!
//! A terminal walkthrough of a root cause analysis for a manufacturing
//! quality complaint: intake, traceability, 5M1E changes, hypotheses,
//! countermeasures and KPI tracking, rendered from a bundled dataset.

pub mod cli;
pub mod core;
pub mod entities;
