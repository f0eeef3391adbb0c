//! Logging infrastructure.
//!
//! Structured logging with file and console output:
//! - Writes to the configured log file (cleared on session start)
//! - Optionally mirrors to stdout
//! - Configurable via the RUST_LOG environment variable

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the global tracing subscriber.
///
/// Creates the log directory if needed and truncates the previous log.
///
/// # Arguments
///
/// * `log_path` - Log file path
/// * `stdout_enabled` - Also print to stdout
/// * `debug` - Force DEBUG level regardless of RUST_LOG
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_logging(
    log_path: &Path,
    stdout_enabled: bool,
    debug: bool,
) -> Result<LoggingGuard, io::Error> {
    let (log_dir, log_file) = prepare_log_file(log_path)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the log directory and clear any previous log.
///
/// Returns the directory and file name for the appender.
fn prepare_log_file(log_path: &Path) -> io::Result<(&Path, &OsStr)> {
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_file = log_path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    fs::create_dir_all(log_dir)?;
    fs::write(log_path, "")?;
    Ok((log_dir, log_file))
}

/// Filter from RUST_LOG, defaulting to INFO (DEBUG when `debug` is set).
fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
