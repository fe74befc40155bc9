//! The polling loop.
//!
//! Each cycle fetches status changes since the cursor, validates the payload,
//! renders the first submission record and sends it to the chat. Whatever the
//! outcome, the loop then sleeps for the fixed poll interval.
//!
//! Only the first record of a batch is ever notified. Later records in the
//! same response are dropped, and the cursor still advances past them.

use std::convert::Infallible;
use std::time::Duration;

use chrono::Utc;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::Result;
use crate::config::BotConfig;
use crate::notification::{Notifier, TelegramSender};
use crate::review::{self, ReviewClient, SubmissionRecord};

/// Result of a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Homework the notification was about.
    pub homework_name: String,
    /// Text rendered for the chat.
    pub message: String,
    /// Whether the chat accepted the message.
    pub delivered: bool,
}

/// Drives fetch, validate, render and notify on a fixed interval.
pub struct PollLoop {
    client: ReviewClient,
    notifier: Notifier,
    poll_interval: Duration,
    cursor: i64,
    cycles: u64,
}

impl PollLoop {
    /// Build the loop from configuration, with the cursor set to now.
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = ReviewClient::new(config)?;
        let notifier = Notifier::new(TelegramSender::new(config)?);
        Ok(Self::with_parts(
            client,
            notifier,
            config.poll_interval,
            Utc::now().timestamp(),
        ))
    }

    /// Build the loop from already constructed parts.
    pub fn with_parts(
        client: ReviewClient,
        notifier: Notifier,
        poll_interval: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            client,
            notifier,
            poll_interval,
            cursor,
            cycles: 0,
        }
    }

    /// Lower bound for the next poll, in Unix seconds.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run one cycle without sleeping.
    ///
    /// The cursor only moves when the whole cycle succeeds and the response
    /// echoed a `current_date`.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let payload = self.client.fetch(self.cursor).await?;
        let homeworks = review::extract_homeworks(&payload)?;

        // `extract_homeworks` never returns an empty list.
        let record = SubmissionRecord::try_from(&homeworks[0])?;
        if homeworks.len() > 1 {
            debug!(
                skipped = homeworks.len() - 1,
                "Only the first homework of the batch is notified"
            );
        }

        let message = review::render_status(&record)?;
        let delivered = self.notifier.send(&message).await;

        match review::current_date(&payload) {
            Some(date) => self.cursor = date,
            None => warn!(cursor = self.cursor, "Response has no current_date, keeping cursor"),
        }

        Ok(CycleReport {
            homework_name: record.homework_name,
            message,
            delivered,
        })
    }

    /// Run one cycle and log its outcome by error kind.
    ///
    /// Nothing escapes: transport failures are logged as a skipped cycle,
    /// every other error as a failed cycle.
    pub async fn tick(&mut self) {
        self.cycles += 1;
        let span = info_span!("cycle", n = self.cycles);

        async {
            match self.run_cycle().await {
                Ok(report) => info!(
                    homework = %report.homework_name,
                    delivered = report.delivered,
                    cursor = self.cursor,
                    "Cycle completed"
                ),
                Err(e) if e.is_transport() => {
                    warn!(error = %e, "Review API unreachable, skipping cycle")
                }
                Err(e) => error!("Cycle failed: {e}"),
            }
        }
        .instrument(span)
        .await
    }

    /// Poll forever, sleeping the fixed interval after every cycle.
    pub async fn run(mut self) -> Infallible {
        info!(
            cursor = self.cursor,
            interval_secs = self.poll_interval.as_secs(),
            "Polling started"
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
