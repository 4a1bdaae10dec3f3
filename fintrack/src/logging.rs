use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the log writer alive. Dropping it flushes pending lines.
pub struct LogGuard {
    pub path: PathBuf,
    _guard: WorkerGuard,
}

/// Default log directory: ~/.config/fintrack/logs
pub fn default_log_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("fintrack");
    Ok(config_dir.join("logs"))
}

/// Initialize tracing with file-based logging.
///
/// Each run writes to its own `fintrack-YYYY-MM-DD-HH-MM-SS.log` under
/// `logs_dir`. The filter defaults to INFO and honors `RUST_LOG`.
pub fn init_logging(logs_dir: &Path) -> Result<LogGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("fintrack-{}.log", timestamp);
    let path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(LogGuard {
        path,
        _guard: guard,
    })
}
