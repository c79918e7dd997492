//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use imageslicer::config::{ConfigFile, StorageBackend, MAX_CONCURRENT_UPLOADS};
use std::path::PathBuf;

use crate::error::CliError;

/// Storage backend selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BackendType {
    /// Google Cloud Storage bucket (requires --bucket or storage.bucket)
    Gcs,
    /// Local directory (requires --output-dir or storage.directory)
    Directory,
    /// Keep tiles in memory and only print their names (dry run)
    Memory,
}

impl From<BackendType> for StorageBackend {
    fn from(backend: BackendType) -> Self {
        match backend {
            BackendType::Gcs => StorageBackend::Gcs,
            BackendType::Directory => StorageBackend::Directory,
            BackendType::Memory => StorageBackend::Memory,
        }
    }
}

/// Command-line settings that override config.ini.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<BackendType>,
    pub bucket: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub public_base_url: Option<String>,
    pub concurrency: Option<usize>,
}

/// Resolve the effective configuration: CLI takes precedence, then config.
///
/// `--output-dir` without `--backend` selects the directory backend.
pub fn resolve_config(base: &ConfigFile, overrides: Overrides) -> Result<ConfigFile, CliError> {
    let mut config = base.clone();

    if let Some(bucket) = overrides.bucket {
        config.storage.bucket = Some(bucket);
    }
    if let Some(url) = overrides.public_base_url {
        config.storage.public_base_url = Some(url);
    }
    if let Some(dir) = overrides.output_dir {
        config.storage.directory = Some(dir);
        if overrides.backend.is_none() {
            config.storage.backend = StorageBackend::Directory;
        }
    }
    if let Some(backend) = overrides.backend {
        config.storage.backend = backend.into();
    }

    if let Some(concurrency) = overrides.concurrency {
        if concurrency == 0 || concurrency > MAX_CONCURRENT_UPLOADS {
            return Err(CliError::Config(format!(
                "--concurrency must be between 1 and {}",
                MAX_CONCURRENT_UPLOADS
            )));
        }
        config.export.max_concurrent_uploads = concurrency;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let base = ConfigFile::default();
        let resolved = resolve_config(&base, Overrides::default()).unwrap();
        assert_eq!(resolved, base);
    }

    #[test]
    fn test_output_dir_implies_directory_backend() {
        let resolved = resolve_config(
            &ConfigFile::default(),
            Overrides {
                output_dir: Some(PathBuf::from("/tmp/tiles")),
                ..Overrides::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.storage.backend, StorageBackend::Directory);
        assert_eq!(resolved.storage.directory, Some(PathBuf::from("/tmp/tiles")));
    }

    #[test]
    fn test_explicit_backend_wins() {
        let resolved = resolve_config(
            &ConfigFile::default(),
            Overrides {
                backend: Some(BackendType::Memory),
                output_dir: Some(PathBuf::from("/tmp/tiles")),
                ..Overrides::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_bucket_and_concurrency() {
        let resolved = resolve_config(
            &ConfigFile::default(),
            Overrides {
                bucket: Some("tiles".to_string()),
                concurrency: Some(8),
                ..Overrides::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.storage.bucket.as_deref(), Some("tiles"));
        assert_eq!(resolved.export.max_concurrent_uploads, 8);
    }

    #[test]
    fn test_concurrency_out_of_range() {
        for concurrency in [0, MAX_CONCURRENT_UPLOADS + 1] {
            let result = resolve_config(
                &ConfigFile::default(),
                Overrides {
                    concurrency: Some(concurrency),
                    ..Overrides::default()
                },
            );
            assert!(matches!(result, Err(CliError::Config(_))));
        }
    }
}
