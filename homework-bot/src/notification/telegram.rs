//! Telegram Bot API sender.
//!
//! Sends plain-text messages via `POST /bot<token>/sendMessage`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::MessageSender;
use crate::config::BotConfig;
use crate::utils::http_client;
use crate::{Error, Result};

/// Telegram `sendMessage` text limit (UTF-8 characters).
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Sends messages to a single Telegram chat.
pub struct TelegramSender {
    client: Client,
    api_base: Url,
    bot_token: String,
    chat_id: String,
}

impl TelegramSender {
    /// Create a sender from the bot configuration.
    pub fn new(config: &BotConfig) -> Result<Self> {
        Ok(Self {
            client: http_client::build_client(config.request_timeout)?,
            api_base: config.telegram_api_base.clone(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.as_str().trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    fn channel_type(&self) -> &'static str {
        "telegram"
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": truncate_message(text, TELEGRAM_MESSAGE_LIMIT),
        });

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::delivery(format!("Telegram request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::delivery(format!(
                "Telegram sendMessage failed: {status} - {body}"
            )));
        }

        debug!(chat_id = %self.chat_id, "Telegram message accepted");
        Ok(())
    }
}

/// Truncate a message to fit within the Telegram character limit.
fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let suffix = "\n\n[truncated]";
    let budget = limit - suffix.len();
    let truncated: String = text.chars().take(budget).collect();
    format!("{truncated}{suffix}")
}
