//! Validation of review API payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::{Error, Result};

/// One homework's review status as returned by the review API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub homework_name: String,
    pub status: String,
    /// Fields the bot does not use (`id`, `reviewer_comment`, `date_updated`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TryFrom<&Value> for SubmissionRecord {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::MalformedRecord(e.to_string()))
    }
}

/// Extract the homework list from a review API payload.
///
/// The list is returned as delivered, without decoding its elements. Only
/// the record that is actually rendered needs to be well-formed.
pub fn extract_homeworks(payload: &Value) -> Result<&[Value]> {
    let object = payload.as_object().ok_or_else(|| {
        Error::wrong_type(format!(
            "response is {}, expected an object",
            kind(payload)
        ))
    })?;

    let homeworks = match object.get("homeworks") {
        None | Some(Value::Null) => return Err(Error::EmptyHomeworks),
        Some(Value::Array(items)) if items.is_empty() => return Err(Error::EmptyHomeworks),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::wrong_type(format!(
                "homeworks is {}, expected a list",
                kind(other)
            )));
        }
    };

    info!(count = homeworks.len(), "Homework list received");
    Ok(homeworks)
}

/// The `current_date` cursor echoed back by the API, if present.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
