//! Sink factory for centralized sink creation.
//!
//! The exporter is generic over [`StorageSink`], so a backend picked at
//! runtime (from config or CLI flags) is wrapped in [`ConfiguredSink`].

use super::directory::DirectorySink;
use super::gcs::{GcsConfig, GcsSink};
use super::memory::MemorySink;
use super::types::{SinkError, StorageSink};
use std::path::PathBuf;

/// Configuration for creating a sink.
///
/// # Example
///
/// ```
/// use imageslicer::storage::SinkConfig;
///
/// let config = SinkConfig::directory("/tmp/tiles");
/// assert_eq!(config.name(), "directory");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    /// Google Cloud Storage bucket.
    Gcs(GcsConfig),

    /// Local directory, optionally fronted by a public base URL.
    Directory {
        path: PathBuf,
        public_base_url: Option<String>,
    },

    /// In-process store (dry run).
    Memory,
}

impl SinkConfig {
    /// GCS bucket with default endpoints.
    pub fn gcs(bucket: impl Into<String>) -> Self {
        Self::Gcs(GcsConfig::new(bucket))
    }

    /// Local directory with `file://` URLs.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory {
            path: path.into(),
            public_base_url: None,
        }
    }

    /// In-memory store.
    pub fn memory() -> Self {
        Self::Memory
    }

    /// Backend name for this configuration.
    pub fn name(&self) -> &str {
        match self {
            Self::Gcs(_) => "gcs",
            Self::Directory { .. } => "directory",
            Self::Memory => "memory",
        }
    }

    /// Build the sink.
    ///
    /// # Errors
    ///
    /// Propagates the backend constructor's [`SinkError`].
    pub fn create(&self) -> Result<ConfiguredSink, SinkError> {
        match self {
            Self::Gcs(config) => Ok(ConfiguredSink::Gcs(GcsSink::new(config.clone())?)),
            Self::Directory {
                path,
                public_base_url,
            } => {
                let mut sink = DirectorySink::new(path)?;
                if let Some(base) = public_base_url {
                    sink = sink.with_public_base_url(base)?;
                }
                Ok(ConfiguredSink::Directory(sink))
            }
            Self::Memory => Ok(ConfiguredSink::Memory(MemorySink::new())),
        }
    }
}

/// A sink chosen at runtime.
#[derive(Clone)]
pub enum ConfiguredSink {
    Gcs(GcsSink),
    Directory(DirectorySink),
    Memory(MemorySink),
}

impl StorageSink for ConfiguredSink {
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, SinkError> {
        match self {
            Self::Gcs(sink) => sink.put(name, bytes, content_type).await,
            Self::Directory(sink) => sink.put(name, bytes, content_type).await,
            Self::Memory(sink) => sink.put(name, bytes, content_type).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Gcs(sink) => sink.describe(),
            Self::Directory(sink) => sink.describe(),
            Self::Memory(sink) => sink.describe(),
        }
    }
}
