//! Tile storage backends.
//!
//! A [`StorageSink`] takes a named byte buffer and returns a URL where the
//! object can be retrieved. Uploads overwrite objects with the same name.
//!
//! # Backends
//!
//! - [`GcsSink`] - Google Cloud Storage bucket, public object URLs
//! - [`DirectorySink`] - Local directory, `file://` or custom base URLs
//! - [`MemorySink`] - In-process store for dry runs and tests
//!
//! [`SinkConfig::create`] builds a [`ConfiguredSink`] when the backend is
//! only known at runtime.

mod directory;
mod factory;
mod gcs;
mod memory;
mod types;

pub use directory::DirectorySink;
pub use factory::{ConfiguredSink, SinkConfig};
pub use gcs::{GcsConfig, GcsSink, DEFAULT_GCS_PUBLIC_BASE_URL, DEFAULT_GCS_UPLOAD_BASE_URL};
pub use memory::{MemorySink, StoredObject, MEMORY_URL_SCHEME};
pub use types::{SinkError, StorageSink};
