//! Outbound notification channel.

use async_trait::async_trait;
use serde_json::json;

use crate::error::WatchError;

/// Anything that can deliver an alert message. The ledger and watcher only
/// talk to this trait, so tests can substitute a recording sink.
#[async_trait]
pub trait NotificationSink {
    async fn post(&self, message: &str) -> Result<(), WatchError>;
}

/// Posts messages to a Slack incoming webhook. No retry, no confirmation
/// beyond transport-level success; failures propagate to the caller.
pub struct SlackNotifier {
    http: reqwest::Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for SlackNotifier {
    async fn post(&self, message: &str) -> Result<(), WatchError> {
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "text": message }))
            .send()
            .await
            .map_err(|e| WatchError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Delivery(format!("webhook returned {status}")));
        }
        Ok(())
    }
}
