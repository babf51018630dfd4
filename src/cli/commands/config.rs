//! `rca config` command - Configuration inspection
//!
//! Configuration is read-only from the CLI; edit the YAML files directly.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::print_structured;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("intake_delay_ms", "Pause after intake submission (RCA_INTAKE_DELAY_MS)"),
    ("chart_width", "Width of ASCII charts (RCA_CHART_WIDTH)"),
    ("wrap_width", "Wrap width for long text in stage views"),
    (
        "default_format",
        "Default output format (yaml, json, tsv, csv, md)",
    ),
    ("prepared_by", "Name printed on exported reports (RCA_PREPARED_BY)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

/// Effective value of a key, with defaults applied
fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "intake_delay_ms" => Some(config.intake_delay().as_millis().to_string()),
        "chart_width" => Some(config.chart_width().to_string()),
        "wrap_width" => Some(config.wrap_width().to_string()),
        "default_format" => config.default_format.clone(),
        "prepared_by" => Some(config.prepared_by()),
        _ => None,
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref()).into_diagnostic()?;

    // If a specific key is requested, show just that value
    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(miette::miette!(
                "Unknown configuration key '{}'. Run `rca config keys` for the list",
                key
            ));
        }
        match get_config_value(&config, key) {
            Some(v) => println!("{}", v),
            None => return Err(miette::miette!("Key '{}' is not set", key)),
        }
        return Ok(());
    }

    if global.format.is_structured() {
        return print_structured(&config, global.format);
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        let explicit = match *key {
            "intake_delay_ms" => config.intake_delay_ms.is_some(),
            "chart_width" => config.chart_width.is_some(),
            "wrap_width" => config.wrap_width.is_some(),
            "default_format" => config.default_format.is_some(),
            "prepared_by" => config.prepared_by.is_some(),
            _ => false,
        };
        let value = get_config_value(&config, key).unwrap_or_else(|| "-".to_string());
        if explicit {
            println!("  {:<16} {}", style(key).cyan(), style(value).yellow());
        } else {
            println!(
                "  {:<16} {} {}",
                style(key).cyan(),
                value,
                style("(default)").dim()
            );
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (RCA_INTAKE_DELAY_MS, RCA_CHART_WIDTH, RCA_PREPARED_BY)");
    println!("  2. --config file / RCA_CONFIG");
    println!("  3. Global config (~/.config/rca/config.yaml)");
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine the user config directory"))?;

    if global.quiet {
        println!("{}", global_path.display());
        return Ok(());
    }

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    if global_path.exists() {
        println!("          {}", style("(exists)").green());
    } else {
        println!("          {}", style("(not created)").dim());
    }
    if let Some(explicit) = &global.config {
        println!("  {} {}", style("Explicit:").cyan(), explicit.display());
        if !explicit.exists() {
            println!("          {}", style("(missing)").red());
        }
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}
