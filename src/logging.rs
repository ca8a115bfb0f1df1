//! Logging setup.
//!
//! Logs go to stderr so stdout stays free for the greeting surface. The level
//! comes from `RUST_LOG` and defaults to `warn`. With a log file configured,
//! a second non-blocking layer writes there without ANSI colors.

use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "warn";

/// Initialize logging.
///
/// Returns a `WorkerGuard` when file logging is active; it must be held for
/// the lifetime of the process so buffered lines are flushed on exit.
#[must_use]
pub fn init(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some((non_blocking, guard)) = log_file.and_then(file_writer) else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);
        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(filter)
            .init();
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::info!(log_file = ?log_file, "File logging initialized");
    Some(guard)
}

fn file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name()?;

    if let Err(e) = std::fs::create_dir_all(directory) {
        // subscriber is not installed yet
        eprintln!("Failed to create log directory {}: {e}, using stderr only", directory.display());
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {}: {e}, using stderr only", path.display());
            return None;
        }
    };
    Some(tracing_appender::non_blocking(appender))
}
