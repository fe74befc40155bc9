//! Review status codes and the notification text rendered from them.

use std::fmt;
use std::str::FromStr;

use tracing::error;

use super::response::SubmissionRecord;
use crate::{Error, Result};

/// Review status reported for a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// Static metadata about a known status code.
#[derive(Debug, Clone, Copy)]
pub struct StatusVerdict {
    pub status: HomeworkStatus,
    /// Code as it appears in API responses.
    pub code: &'static str,
    /// Sentence appended to the notification.
    pub verdict: &'static str,
}

/// The fixed status catalog.
pub const STATUS_VERDICTS: &[StatusVerdict] = &[
    StatusVerdict {
        status: HomeworkStatus::Approved,
        code: "approved",
        verdict: "Работа проверена: ревьюеру всё понравилось. Ура!",
    },
    StatusVerdict {
        status: HomeworkStatus::Reviewing,
        code: "reviewing",
        verdict: "Работа взята на проверку ревьюером.",
    },
    StatusVerdict {
        status: HomeworkStatus::Rejected,
        code: "rejected",
        verdict: "Работа проверена: у ревьюера есть замечания.",
    },
];

impl HomeworkStatus {
    fn info(self) -> &'static StatusVerdict {
        STATUS_VERDICTS
            .iter()
            .find(|entry| entry.status == self)
            .unwrap_or_else(|| unreachable!("every status has a catalog entry"))
    }

    /// Status code as used by the review API.
    pub fn code(self) -> &'static str {
        self.info().code
    }

    /// Human-readable verdict sentence.
    pub fn verdict(self) -> &'static str {
        self.info().verdict
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HomeworkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        STATUS_VERDICTS
            .iter()
            .find(|entry| entry.code == s)
            .map(|entry| entry.status)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// Render the notification text for one submission record.
///
/// An unrecognised status code is a hard failure; no text is produced for it.
pub fn render_status(record: &SubmissionRecord) -> Result<String> {
    let status = record.status.parse::<HomeworkStatus>().inspect_err(|_| {
        error!(
            homework = %record.homework_name,
            status = %record.status,
            "Unknown homework status"
        );
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.homework_name,
        status.verdict()
    ))
}
