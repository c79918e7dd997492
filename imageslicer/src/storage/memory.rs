//! In-process sink.

use super::types::{SinkError, StorageSink};
use parking_lot::Mutex;
use std::sync::Arc;

/// URL scheme used for objects held by [`MemorySink`].
pub const MEMORY_URL_SCHEME: &str = "memory";

/// An object held by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Sink keeping objects in memory.
///
/// Used for dry runs and tests. Cloning shares the underlying store.
/// Objects keep the order of their first upload; re-uploading a name
/// replaces the content in place.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    objects: Arc<Mutex<Vec<StoredObject>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored objects.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().clone()
    }

    /// Names of all stored objects, in first-upload order.
    pub fn names(&self) -> Vec<String> {
        self.objects.lock().iter().map(|o| o.name.clone()).collect()
    }

    /// Look up one object by name.
    pub fn get(&self, name: &str) -> Option<StoredObject> {
        self.objects.lock().iter().find(|o| o.name == name).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

impl StorageSink for MemorySink {
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, SinkError> {
        let object = StoredObject {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        };

        let mut objects = self.objects.lock();
        match objects.iter_mut().find(|o| o.name == name) {
            Some(existing) => *existing = object,
            None => objects.push(object),
        }

        Ok(format!("{}://{}", MEMORY_URL_SCHEME, name))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
