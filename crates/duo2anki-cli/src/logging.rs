//! Logging setup
//!
//! Level comes from DUO2ANKI_LOG (an `EnvFilter` directive such as
//! `debug`), defaulting to `warn`, or `debug` with `--verbose`.
//! Logs go to stderr unless `log_file` is configured.

use std::fs::OpenOptions;

use duo2anki_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DUO2ANKI_LOG";

/// Initialize logging for the CLI
pub fn init(config: &Config, verbose: bool) {
    let log_level = std::env::var(LOG_ENV)
        .ok()
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| default_level(verbose).to_string());

    let env_filter = EnvFilter::new(filter_directives(&log_level));

    match config.log_file {
        Some(ref log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    debug!(level = %log_level, "Logging initialized");
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Scope a bare level to our own crates; pass full directives through
fn filter_directives(log_level: &str) -> String {
    if log_level.contains('=') || log_level.contains(',') {
        log_level.to_string()
    } else {
        format!("duo2anki_core={0},duo2anki_cli={0}", log_level)
    }
}
