//! Logging setup

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use notekeep_core::Config;

/// Level used for a given number of `-v` flags
///
/// With no flags the `NOTEKEEP_LOG` variable decides, falling back to `warn`.
fn level(verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var("NOTEKEEP_LOG").unwrap_or_else(|_| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!("notekeep_core={},notekeep_cli={}", level, level))
}

/// Install the global subscriber
///
/// Logs go to `config.log_file` when set, otherwise to stderr.
pub fn init(config: &Config, verbosity: u8) {
    let level = level(verbosity);

    if let Some(log_path) = &config.log_file {
        match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(log_file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter_for(&level))
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(log_file)
                    .try_init();
                info!("Logging to {:?}", log_path);
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
