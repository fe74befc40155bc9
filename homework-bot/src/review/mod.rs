//! Review API access.
//!
//! - [`ReviewClient`] polls the review-status endpoint
//! - [`extract_homeworks`] validates the returned payload
//! - [`render_status`] turns a submission record into notification text

mod client;
mod response;
mod status;

pub use client::ReviewClient;
pub use response::{SubmissionRecord, current_date, extract_homeworks};
pub use status::{HomeworkStatus, STATUS_VERDICTS, StatusVerdict, render_status};
