//! Source image download.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default timeout for source downloads, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with source downloads. Some image hosts reject requests
/// without one.
const DEFAULT_USER_AGENT: &str = concat!("imageslicer/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while downloading a source image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failed to build the HTTP client
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Network-level failure (DNS, connect, timeout, body read)
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

/// Trait for fetching raw source bytes.
///
/// Abstracted so the slicing service can be tested without network access.
pub trait Fetcher: Send + Sync {
    /// Download the resource at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// HTTP fetcher using reqwest.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "Source download starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                url = url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "Source request failed"
            );
            FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "Source HTTP error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: format!("failed to read body: {}", e),
        })?;

        debug!(url = url, bytes = bytes.len(), "Source downloaded");
        Ok(bytes.to_vec())
    }
}
