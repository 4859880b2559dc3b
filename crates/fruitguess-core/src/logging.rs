//! Tracing subscriber setup.
//!
//! The TUI owns stdout, so interactive runs log to a file under
//! `${FRUITGUESS_HOME}/logs`. Line-oriented commands log to stderr.
//! The filter comes from `FRUITGUESS_LOG` (default `warn`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "FRUITGUESS_LOG";

const LOG_FILE_NAME: &str = "fruitguess.log";

/// Where log records are written.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Append to `<dir>/fruitguess.log`.
    File(PathBuf),
    /// Write to stderr.
    Stderr,
}

/// Installs the global tracing subscriber.
///
/// Keep the returned guard alive for the whole run; dropping it flushes
/// buffered file output.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;
            Ok(None)
        }
    }
}
