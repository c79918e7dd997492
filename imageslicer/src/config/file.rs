//! Configuration file handling for ~/.imageslicer/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::encoding::EncodingConfig;
use super::settings::{ConfigFile, StorageBackend};
use crate::export::ExportConfig;
use crate::grid::GridSpec;
use crate::storage::{GcsConfig, SinkConfig, SinkError};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.imageslicer/config.ini).
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_config_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Commented INI text for this configuration.
    pub fn to_config_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Grid defaults for requests that omit them.
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec::new(self.grid.size).with_border_inset(self.grid.border_inset)
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new()
            .with_max_concurrent_uploads(self.export.max_concurrent_uploads)
            .with_upload_timeout(Duration::from_secs(self.export.upload_timeout_secs))
    }

    pub fn encoding_config(&self) -> EncodingConfig {
        EncodingConfig::new(self.encoding.quality)
    }

    /// Sink configuration for the selected backend.
    ///
    /// For `gcs` the access token is read from the environment variable
    /// named by `storage.access_token_env`.
    ///
    /// # Errors
    ///
    /// [`SinkError::Config`] if the backend's required setting is missing.
    pub fn sink_config(&self) -> Result<SinkConfig, SinkError> {
        let token = std::env::var(&self.storage.access_token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        self.sink_config_with_token(token)
    }

    fn sink_config_with_token(&self, token: Option<String>) -> Result<SinkConfig, SinkError> {
        let storage = &self.storage;
        match storage.backend {
            StorageBackend::Gcs => {
                let bucket = storage.bucket.as_deref().ok_or_else(|| {
                    SinkError::Config("storage.bucket is required for the gcs backend".to_string())
                })?;

                let mut gcs = GcsConfig::new(bucket);
                gcs.timeout_secs = self.export.upload_timeout_secs;
                if let Some(base) = &storage.public_base_url {
                    gcs = gcs.with_public_base_url(base.as_str());
                }
                if let Some(token) = token {
                    gcs = gcs.with_access_token(token);
                }
                Ok(SinkConfig::Gcs(gcs))
            }
            StorageBackend::Directory => {
                let path = storage.directory.clone().ok_or_else(|| {
                    SinkError::Config(
                        "storage.directory is required for the directory backend".to_string(),
                    )
                })?;
                Ok(SinkConfig::Directory {
                    path,
                    public_base_url: storage.public_base_url.clone(),
                })
            }
            StorageBackend::Memory => Ok(SinkConfig::Memory),
        }
    }
}

/// Get the path to the config directory (~/.imageslicer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".imageslicer")
}

/// Get the path to the config file (~/.imageslicer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
