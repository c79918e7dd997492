//! Storage sink types and traits

use std::future::Future;
use thiserror::Error;

/// Errors that can occur while storing a tile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Sink could not be constructed from its configuration
    #[error("Invalid storage configuration: {0}")]
    Config(String),

    /// Network-level failure talking to the backend
    #[error("Upload of '{name}' failed: {reason}")]
    Request { name: String, reason: String },

    /// Backend answered with a non-success status
    #[error("Upload of '{name}' rejected with HTTP {status}: {body}")]
    Status {
        name: String,
        status: u16,
        body: String,
    },

    /// Local filesystem failure
    #[error("Failed to write '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Sink call exceeded the configured upload timeout
    #[error("Upload of '{name}' timed out after {secs}s")]
    Timeout { name: String, secs: u64 },
}

/// Destination for encoded tiles.
///
/// `put` must tolerate being called again with the same name: the later
/// object replaces the earlier one.
pub trait StorageSink: Send + Sync {
    /// Store `bytes` under `name` and return a URL where it can be fetched.
    fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<String, SinkError>> + Send;

    /// Short backend description for logging.
    fn describe(&self) -> String;
}
