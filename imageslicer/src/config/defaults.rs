//! Default values and constants for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::export::{DEFAULT_MAX_CONCURRENT_UPLOADS, DEFAULT_UPLOAD_TIMEOUT_SECS};
use crate::grid::{DEFAULT_BORDER_INSET, DEFAULT_GRID_SIZE};
use crate::source::DEFAULT_FETCH_TIMEOUT_SECS;

/// Default environment variable read for the GCS access token.
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "GCS_ACCESS_TOKEN";

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "imageslicer.log";

/// Upper bound for `[export] max_concurrent_uploads`.
pub const MAX_CONCURRENT_UPLOADS: usize = 64;

/// Default log file path (~/.imageslicer/imageslicer.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                size: DEFAULT_GRID_SIZE,
                border_inset: DEFAULT_BORDER_INSET,
            },
            encoding: EncodingSettings {
                quality: DEFAULT_JPEG_QUALITY,
            },
            download: DownloadSettings {
                timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            },
            storage: StorageSettings {
                backend: StorageBackend::Gcs,
                bucket: None,
                public_base_url: None,
                directory: None,
                access_token_env: DEFAULT_ACCESS_TOKEN_ENV.to_string(),
            },
            export: ExportSettings {
                max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
                upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
