//! Process configuration loaded from the environment.
//!
//! Everything is read once at startup into a [`BotConfig`] that is passed by
//! reference to the components that need it.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default review-status endpoint.
pub const DEFAULT_REVIEW_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default delay between polling cycles in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default timeout for a single HTTP request in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const ENV_REVIEW_API_TOKEN: &str = "REVIEW_API_TOKEN";
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "CHAT_ID";
pub const ENV_REVIEW_API_ENDPOINT: &str = "REVIEW_API_ENDPOINT";
pub const ENV_TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

/// Bot configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// OAuth token for the review API.
    pub review_api_token: String,
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Chat that receives notifications.
    pub chat_id: String,
    /// Review-status endpoint.
    pub endpoint: Url,
    /// Telegram Bot API base URL.
    pub telegram_api_base: Url,
    /// Fixed delay between cycles.
    pub poll_interval: Duration,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Directory holding `program.log`.
    pub log_dir: PathBuf,
}

impl BotConfig {
    /// Load the configuration from the process environment.
    ///
    /// `main` loads `.env` before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// The three credentials are checked first so that a missing one is
    /// reported before anything else is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let review_api_token = required(&lookup, ENV_REVIEW_API_TOKEN)?;
        let bot_token = required(&lookup, ENV_BOT_TOKEN)?;
        let chat_id = required(&lookup, ENV_CHAT_ID)?;

        let endpoint = parse_url(
            ENV_REVIEW_API_ENDPOINT,
            optional(&lookup, ENV_REVIEW_API_ENDPOINT)
                .as_deref()
                .unwrap_or(DEFAULT_REVIEW_ENDPOINT),
        )?;
        let telegram_api_base = parse_url(
            ENV_TELEGRAM_API_BASE,
            optional(&lookup, ENV_TELEGRAM_API_BASE)
                .as_deref()
                .unwrap_or(DEFAULT_TELEGRAM_API_BASE),
        )?;

        let poll_interval = parse_secs(
            ENV_POLL_INTERVAL_SECS,
            optional(&lookup, ENV_POLL_INTERVAL_SECS),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let request_timeout = parse_secs(
            ENV_HTTP_TIMEOUT_SECS,
            optional(&lookup, ENV_HTTP_TIMEOUT_SECS),
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;

        let log_dir = optional(&lookup, ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            review_api_token,
            bot_token,
            chat_id,
            endpoint,
            telegram_api_base,
            poll_interval,
            request_timeout,
            log_dir,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("review_api_token", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("telegram_api_base", &self.telegram_api_base.as_str())
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

/// Log directory from the environment, read before the full config so that
/// configuration errors still reach the log file.
pub fn log_dir_from_env() -> PathBuf {
    std::env::var(ENV_LOG_DIR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(Error::ConfigMissing(key))
}

fn parse_url(key: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::config(format!("{key} is not a valid URL: {e}")))
}

fn parse_secs(key: &str, value: Option<String>, default: u64) -> Result<Duration> {
    let secs = match value {
        Some(raw) => raw.parse::<u64>().map_err(|e| {
            Error::config(format!("{key} must be a whole number of seconds: {e}"))
        })?,
        None => default,
    };

    if secs == 0 {
        return Err(Error::config(format!("{key} must be greater than zero")));
    }

    Ok(Duration::from_secs(secs))
}
