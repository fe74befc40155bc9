//! HTTP client for the review-status endpoint.

use chrono::Utc;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::config::BotConfig;
use crate::utils::http_client;
use crate::{Error, Result};

/// Client for the review-status endpoint.
pub struct ReviewClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl ReviewClient {
    /// Create a client from the bot configuration.
    pub fn new(config: &BotConfig) -> Result<Self> {
        Ok(Self {
            client: http_client::build_client(config.request_timeout)?,
            endpoint: config.endpoint.clone(),
            token: config.review_api_token.clone(),
        })
    }

    /// Fetch status changes since `cursor` (Unix seconds).
    ///
    /// A cursor of `0` means "now". Returns the parsed JSON body unchanged.
    pub async fn fetch(&self, cursor: i64) -> Result<Value> {
        let from_date = if cursor == 0 {
            Utc::now().timestamp()
        } else {
            cursor
        };

        debug!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Review API request failed"))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Review API returned unexpected status");
            return Err(Error::BadStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
