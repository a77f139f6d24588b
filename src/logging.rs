//! Logging configuration using tracing

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV_VAR: &str = "SMART_RECIPE_LOG";
pub const LOG_FILE_NAME: &str = "smart-recipe.log";

/// Initialize the logging subsystem.
///
/// Logs go to a daily file under `log_dir` so they never draw over the
/// terminal UI. The level is controlled by `SMART_RECIPE_LOG`:
///
/// ```bash
/// SMART_RECIPE_LOG=debug smart_recipe
/// ```
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("smart_recipe=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Smart Recipe starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(log_dir.join(LOG_FILE_NAME))
}
