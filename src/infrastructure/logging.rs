//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so events go to a daily-rolling file
//! instead of stderr. Only template ids, steps, and field names are ever
//! logged; answer text stays out of the log.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Installs the global subscriber writing to `folder/dapnote.log.<date>`.
///
/// `RUST_LOG` takes precedence over `default_level`. Keep the returned
/// guard alive until exit so buffered lines are flushed.
pub fn init_file_tracing(folder: &Path, default_level: LogLevel) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(folder)?;
    let appender = tracing_appender::rolling::daily(folder, "dapnote.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .with(filter)
        .init();

    Ok(guard)
}

/// Logs warnings to stderr; used by the non-interactive commands.
pub fn init_stderr_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_strings() {
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
        assert_eq!(LogLevel::Error.as_filter_str(), "error");
    }
}
