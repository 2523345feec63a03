//! Persisted record of the last notification time per center.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::error::WatchError;
use crate::notifier::NotificationSink;

/// Debounce gate backed by a whole-document JSON file mapping profile id to
/// the last time an alert went out for it.
///
/// The file is read fresh before every decision and written back in full on
/// every record. Concurrent runs against the same file can lose an update
/// (last writer wins); the deployment model is a single periodic job.
pub struct NotificationLedger {
    path: PathBuf,
    debounce: Duration,
}

impl NotificationLedger {
    /// The ledger file must already exist (seed it with `{}`); a missing or
    /// unreadable file is a fatal error, not an empty ledger.
    pub fn new(path: impl Into<PathBuf>, debounce_minutes: i64) -> Self {
        Self {
            path: path.into(),
            debounce: Duration::minutes(debounce_minutes),
        }
    }

    /// True if `id` has never been notified, or the debounce window has fully
    /// elapsed since the last time.
    pub fn should_notify(&self, id: &str) -> Result<bool, WatchError> {
        let entries = self.read()?;
        Ok(match entries.get(id) {
            None => true,
            Some(last) => Utc::now().signed_duration_since(*last) >= self.debounce,
        })
    }

    /// Stamp `id` with the current time and persist the full ledger. An
    /// existing timestamp is never moved backward.
    pub fn record(&self, id: &str) -> Result<(), WatchError> {
        let mut entries = self.read()?;
        let now = Utc::now();
        let stamp = entries.get(id).map_or(now, |last| now.max(*last));
        entries.insert(id.to_string(), stamp);
        self.write(&entries)
    }

    /// Send `message` through `sink` if `id` is due, then record the send.
    ///
    /// Ordering is strict notify-then-record: nothing is recorded unless the
    /// sink accepted the message, so a crash in between can produce one
    /// near-term duplicate but never a lost alert. Returns whether a message
    /// went out.
    pub async fn notify_if_due(
        &self,
        id: &str,
        message: &str,
        sink: &dyn NotificationSink,
    ) -> Result<bool, WatchError> {
        if !self.should_notify(id)? {
            return Ok(false);
        }
        sink.post(message).await?;
        self.record(id)?;
        Ok(true)
    }

    fn read(&self) -> Result<HashMap<String, DateTime<Utc>>, WatchError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| WatchError::ledger(&self.path, e))?;
        serde_json::from_str(&raw).map_err(|e| WatchError::ledger(&self.path, e))
    }

    fn write(&self, entries: &HashMap<String, DateTime<Utc>>) -> Result<(), WatchError> {
        let raw =
            serde_json::to_string(entries).map_err(|e| WatchError::ledger(&self.path, e))?;
        fs::write(&self.path, raw).map_err(|e| WatchError::ledger(&self.path, e))
    }
}
