//! Application-wide error types.

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is unset or blank.
    #[error("Missing required environment variable: {0}")]
    ConfigMissing(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The review API could not be reached at all.
    #[error("Request to review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Review API responded with status {0}, expected 200")]
    BadStatus(u16),

    #[error("Failed to decode review API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response has no homeworks")]
    EmptyHomeworks,

    #[error("Wrong type in response: {0}")]
    WrongType(String),

    #[error("Malformed homework record: {0}")]
    MalformedRecord(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn wrong_type(msg: impl Into<String>) -> Self {
        Self::WrongType(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    /// Whether the error happened before any response was received.
    ///
    /// Transport failures skip the cycle quietly instead of counting as a
    /// failed cycle.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
