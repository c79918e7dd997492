//! Local directory sink.

use super::types::{SinkError, StorageSink};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Sink writing tiles into a local directory.
///
/// Returned URLs are `file://` URLs unless a public base URL is configured,
/// in which case they are `{base}/{name}` (useful when the directory is
/// served by a web server).
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    public_base: Option<Url>,
}

impl DirectorySink {
    /// Create a sink rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the directory cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SinkError> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| io_error(root, e))?;
        let root = std::fs::canonicalize(root).map_err(|e| io_error(root, e))?;

        Ok(Self {
            root,
            public_base: None,
        })
    }

    /// Serve returned URLs from `base` instead of `file://`.
    pub fn with_public_base_url(mut self, base: &str) -> Result<Self, SinkError> {
        let mut url = Url::parse(base)
            .map_err(|e| SinkError::Config(format!("invalid URL '{}': {}", base, e)))?;
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        self.public_base = Some(url);
        Ok(self)
    }

    /// Directory tiles are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_for(&self, path: &Path, name: &str) -> Result<String, SinkError> {
        match &self.public_base {
            Some(base) => base
                .join(name)
                .map(|u| u.to_string())
                .map_err(|e| SinkError::Config(format!("cannot build URL for '{}': {}", name, e))),
            None => Url::from_file_path(path)
                .map(|u| u.to_string())
                .map_err(|_| SinkError::Io {
                    path: path.display().to_string(),
                    reason: "path is not absolute".to_string(),
                }),
        }
    }
}

fn io_error(path: &Path, error: std::io::Error) -> SinkError {
    SinkError::Io {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

impl StorageSink for DirectorySink {
    async fn put(&self, name: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, SinkError> {
        // Names are flat object keys; refuse anything that would escape the root
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(SinkError::Io {
                path: name.to_string(),
                reason: "invalid object name".to_string(),
            });
        }

        let path = self.root.join(name);
        let size = bytes.len();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_error(&path, e))?;

        debug!(path = %path.display(), size, "Tile written");
        self.url_for(&path, name)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_file_and_returns_file_url() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path()).unwrap();

        let url = sink.put("a_4x4_1.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();

        let written = std::fs::read(sink.root().join("a_4x4_1.jpg")).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/a_4x4_1.jpg"));
    }

    #[tokio::test]
    async fn test_overwrites_existing_object() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path()).unwrap();

        sink.put("x.jpg", vec![1], "image/jpeg").await.unwrap();
        sink.put("x.jpg", vec![2, 2], "image/jpeg").await.unwrap();

        assert_eq!(std::fs::read(sink.root().join("x.jpg")).unwrap(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_public_base_url() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path())
            .unwrap()
            .with_public_base_url("https://static.example.com/tiles")
            .unwrap();

        let url = sink.put("t_1.jpg", vec![0], "image/jpeg").await.unwrap();
        assert_eq!(url, "https://static.example.com/tiles/t_1.jpg");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path()).unwrap();

        for name in ["../escape.jpg", "sub/dir.jpg", "", ".."] {
            let result = sink.put(name, vec![0], "image/jpeg").await;
            assert!(matches!(result, Err(SinkError::Io { .. })), "{name}");
        }
    }

    #[test]
    fn test_creates_nested_root() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let sink = DirectorySink::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert!(sink.describe().starts_with("directory "));
    }
}
