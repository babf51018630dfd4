//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::workflow::DEFAULT_INTAKE_DELAY;

/// Default width of ASCII charts, in columns
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// Default wrap width for long text in stage views
pub const DEFAULT_WRAP_WIDTH: usize = 72;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// RCA configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pause after intake submission, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intake_delay_ms: Option<u64>,

    /// Width of ASCII charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_width: Option<usize>,

    /// Wrap width for long text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_width: Option<usize>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Name printed on exported reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// Built-in defaults, then the global user config, then `explicit` (if
    /// given), then environment variables. A broken global file is skipped
    /// with a warning; a broken explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => config.merge(global),
                    Err(e) => tracing::warn!("ignoring global config: {}", e),
                }
            }
        }

        if let Some(path) = explicit {
            config.merge(Self::from_file(path)?);
        }

        config.apply_env(|key| std::env::var(key).ok());
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Parse a single config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rca")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.intake_delay_ms.is_some() {
            self.intake_delay_ms = other.intake_delay_ms;
        }
        if other.chart_width.is_some() {
            self.chart_width = other.chart_width;
        }
        if other.wrap_width.is_some() {
            self.wrap_width = other.wrap_width;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.prepared_by.is_some() {
            self.prepared_by = other.prepared_by;
        }
    }

    /// Overlay `RCA_*` environment variables; unparsable numbers are ignored
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(ms) = var("RCA_INTAKE_DELAY_MS") {
            match ms.trim().parse() {
                Ok(ms) => self.intake_delay_ms = Some(ms),
                Err(_) => tracing::warn!(value = %ms, "RCA_INTAKE_DELAY_MS is not a number"),
            }
        }
        if let Some(width) = var("RCA_CHART_WIDTH") {
            match width.trim().parse() {
                Ok(width) => self.chart_width = Some(width),
                Err(_) => tracing::warn!(value = %width, "RCA_CHART_WIDTH is not a number"),
            }
        }
        if let Some(name) = var("RCA_PREPARED_BY") {
            self.prepared_by = Some(name);
        }
    }

    pub fn intake_delay(&self) -> Duration {
        self.intake_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INTAKE_DELAY)
    }

    pub fn chart_width(&self) -> usize {
        self.chart_width.unwrap_or(DEFAULT_CHART_WIDTH).max(10)
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width.unwrap_or(DEFAULT_WRAP_WIDTH).max(20)
    }

    /// Report author, falling back to the login name
    pub fn prepared_by(&self) -> String {
        if let Some(ref name) = self.prepared_by {
            return name.clone();
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}
