use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings, all environment-driven. `.env` files are honored by the
/// binary before this is read.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Slack incoming-webhook URL receiving the alerts.
    pub slack_webhook_url: String,
    /// Booking API origin. Overridable for tests.
    pub base_url: String,
    /// Path of the persisted notification ledger.
    pub ledger_path: PathBuf,
    /// Minimum spacing between outbound API calls.
    pub call_spacing: Duration,
    /// Minimum minutes between two alerts for the same center.
    pub debounce_minutes: i64,
    /// Alert only when at least this many slots are open.
    pub alert_threshold: u32,
}

impl WatchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            slack_webhook_url: env::var("SLACK_HOOK").context("SLACK_HOOK must be set")?,
            base_url: env::var("DOCTOLIB_BASE_URL")
                .unwrap_or_else(|_| "https://www.doctolib.fr".to_string()),
            ledger_path: env::var("LEDGER_PATH")
                .unwrap_or_else(|_| "notifications.json".to_string())
                .into(),
            call_spacing: Duration::from_millis(
                env::var("CALL_SPACING_MS")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .context("CALL_SPACING_MS must be a valid number")?,
            ),
            debounce_minutes: env::var("NOTIFY_DEBOUNCE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("NOTIFY_DEBOUNCE_MINUTES must be a valid number")?,
            alert_threshold: env::var("ALERT_THRESHOLD")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("ALERT_THRESHOLD must be a valid number")?,
        })
    }
}
