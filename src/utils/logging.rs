//! Logging setup
//!
//! The terminal belongs to the prompts, so log events go to a file through a
//! non-blocking writer. Timestamps use the local timezone.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "dropimport=info";

#[derive(Debug, Clone, Copy)]
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Filter directive for a `-v` count. `RUST_LOG` takes precedence.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_LOG_FILTER,
        1 => "dropimport=debug",
        _ => "dropimport=trace",
    }
}

/// Install the global subscriber writing to `log_file`.
///
/// Keep the returned guard alive until exit or buffered events are lost.
pub fn init_logging(log_file: &Path, verbosity: u8) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", log_file.display()))?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTimer),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
