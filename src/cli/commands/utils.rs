//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::views::RenderOptions;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Dataset};

/// Everything a command needs to render: layered config, the bundled
/// dataset and the layout derived from the config
pub struct Session {
    pub config: Config,
    pub dataset: Dataset,
    pub opts: RenderOptions,
}

impl Session {
    pub fn load(global: &GlobalOpts) -> Result<Self> {
        let config = Config::load(global.config.as_deref()).into_diagnostic()?;
        let dataset = Dataset::sample().into_diagnostic()?;

        for (hypothesis, change) in dataset.unresolved_change_refs() {
            tracing::warn!(%hypothesis, %change, "hypothesis references an unknown change");
        }

        let opts = RenderOptions::from_config(&config);
        Ok(Self {
            config,
            dataset,
            opts,
        })
    }

    /// The requested format with `auto` resolved against the configured default
    pub fn format(&self, global: &GlobalOpts) -> OutputFormat {
        global.format.or_default(self.config.default_format.as_deref())
    }
}
