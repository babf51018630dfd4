//! Diagnostic logging setup
//!
//! Events go to stderr so they never mix with command output. `RCA_LOG`
//! takes an `EnvFilter` directive string; without it the level follows the
//! global `-q`/`-v` flags. `RCA_LOG_FORMAT=json` switches to JSON lines.

use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::GlobalOpts;

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "RCA_LOG";

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "RCA_LOG_FORMAT";

/// Filter used when `RCA_LOG` is unset
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "warn,rca=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global.quiet, global.verbose)));
    let ansi = !global.no_color && std::io::stderr().is_terminal();

    let result = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(global.verbose),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "error");
        assert_eq!(default_directive(false, true), "warn,rca=debug");
        // Verbose wins over quiet
        assert_eq!(default_directive(true, true), "warn,rca=debug");
    }

    #[test]
    fn test_directives_parse() {
        for (quiet, verbose) in [(false, false), (true, false), (false, true)] {
            assert!(EnvFilter::try_new(default_directive(quiet, verbose)).is_ok());
        }
    }
}
