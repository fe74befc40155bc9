//! Panic reporting into the bot's log.

use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{PanicHookInfo, take_hook};
use std::path::Path;

use chrono::Local;

use crate::logging::log_file_path;

/// What the bot records about a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PanicRecord {
    message: String,
    location: String,
}

impl PanicRecord {
    fn from_info(info: &PanicHookInfo<'_>) -> Self {
        let message = info
            .payload_as_str()
            .map(str::to_string)
            .unwrap_or_else(|| info.to_string());
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "<unknown>".to_string());

        Self { message, location }
    }

    /// Line in the same shape as the file logger's output.
    fn log_line(&self) -> String {
        format!(
            "{} ERROR homework_bot::panic: Bot panicked at {}: {}",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            self.location,
            self.message
        )
    }

    fn append_to(&self, path: &Path) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", self.log_line())?;
        file.flush()
    }
}

/// Route panics through `tracing` before the default hook runs.
///
/// With `panic = "abort"` the non-blocking file writer may not flush, so the
/// record is also appended to `program.log` directly.
pub fn install(log_dir: impl AsRef<Path>) {
    let log_file = log_file_path(log_dir.as_ref());
    let previous_hook = take_hook();

    std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
        let record = PanicRecord::from_info(info);
        tracing::error!(
            target: "homework_bot::panic",
            location = %record.location,
            "Bot panicked: {}",
            record.message
        );

        if cfg!(panic = "abort") {
            let _ = record.append_to(&log_file);
        }

        previous_hook(info);
    }));
}
