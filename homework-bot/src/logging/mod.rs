//! Logging setup: a console stream mirrored into `program.log`.
//!
//! The log file is truncated on every start. Both outputs carry a local
//! timestamp, the level, the target and the message.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "homework_bot=info";

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "program.log";

/// Custom timer that uses the local timezone via chrono.
#[derive(Debug, Clone, Copy)]
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Path of the log file for `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Create `log_dir` if needed and open a fresh, empty log file in it.
fn create_log_file(log_dir: &Path) -> crate::Result<File> {
    std::fs::create_dir_all(log_dir)?;
    Ok(File::create(log_file_path(log_dir))?)
}

/// Plain-text layer writing to the log file.
fn file_layer<S>(writer: NonBlocking) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(LocalTimer)
}

/// Initialize console and file logging.
///
/// Keep the returned guard alive for the process lifetime, otherwise buffered
/// file output is lost.
pub fn init_logging(log_dir: &Path) -> crate::Result<WorkerGuard> {
    let file = create_log_file(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(true).with_timer(LocalTimer)) // Console
        .with(file_layer(non_blocking))
        .try_init()
        .map_err(|e| {
            crate::Error::Other(format!("Failed to set global default subscriber: {}", e))
        })?;

    Ok(guard)
}
