//! Logging setup
//!
//! Only initializes if WEBLAUNCHER_LOG is set (e.g. `WEBLAUNCHER_LOG=debug`).
//! Logs go to config.log_file or {data_dir}/debug.log so they never mix
//! with command output.

use std::fs::{self, OpenOptions};

use tracing::info;
use tracing_subscriber::EnvFilter;

use weblauncher_core::Config;

/// Environment variable holding the log level
const LOG_ENV: &str = "WEBLAUNCHER_LOG";

pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "weblauncher_core={},weblauncher_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
