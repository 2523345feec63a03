//! Unified error handling for the watcher.
//!
//! Skip reasons (closed agendas, no matching motive) are not errors; they live
//! in [`crate::availability`] and are absorbed per center. Everything here is
//! either fatal for the run or fatal at startup.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    /// Non-2xx status from the booking API. Never retried.
    #[error("HTTP {status} from {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The request never produced a usable response (connect, decode, ...).
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The notification ledger could not be read, parsed or written. Fatal:
    /// known notification state must never be silently lost.
    #[error("notification ledger {path}: {reason}")]
    Ledger { path: PathBuf, reason: String },

    /// Webhook delivery failed. The notification is not recorded as sent.
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    /// The center catalog file could not be read or parsed.
    #[error("catalog file {path}: {reason}")]
    Catalog { path: PathBuf, reason: String },
}

impl WatchError {
    pub fn ledger(path: &Path, cause: impl std::fmt::Display) -> Self {
        WatchError::Ledger {
            path: path.to_path_buf(),
            reason: cause.to_string(),
        }
    }

    pub fn catalog(path: &Path, cause: impl std::fmt::Display) -> Self {
        WatchError::Catalog {
            path: path.to_path_buf(),
            reason: cause.to_string(),
        }
    }
}
