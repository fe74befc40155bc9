//! Notification delivery.
//!
//! [`Notifier`] wraps a [`MessageSender`] and never lets a delivery failure
//! escape to the polling loop.

mod telegram;

pub use telegram::TelegramSender;

use async_trait::async_trait;
use tracing::{error, info};

use crate::Result;

/// Trait for message transports.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Get the transport type name.
    fn channel_type(&self) -> &'static str;

    /// Deliver plain text to the configured recipient.
    async fn send_text(&self, text: &str) -> Result<()>;
}

/// Best-effort delivery to the configured chat.
pub struct Notifier {
    sender: Box<dyn MessageSender>,
}

impl Notifier {
    pub fn new(sender: impl MessageSender + 'static) -> Self {
        Self {
            sender: Box::new(sender),
        }
    }

    /// Send `text`, logging the outcome.
    ///
    /// Returns whether the message was delivered. Failures are logged and
    /// never retried.
    pub async fn send(&self, text: &str) -> bool {
        match self.sender.send_text(text).await {
            Ok(()) => {
                info!(channel = self.sender.channel_type(), "Message sent: {text}");
                true
            }
            Err(e) => {
                error!(
                    channel = self.sender.channel_type(),
                    error = %e,
                    "Message not sent"
                );
                false
            }
        }
    }
}
