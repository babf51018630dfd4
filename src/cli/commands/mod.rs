//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod config;
pub mod kpi;
pub mod list;
pub mod report;
pub mod show;
pub mod walk;
