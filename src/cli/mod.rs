//! CLI module - argument parsing, rendering and command dispatch

pub mod args;
pub mod chart;
pub mod commands;
pub mod helpers;
pub mod logging;
pub mod table;
pub mod views;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
