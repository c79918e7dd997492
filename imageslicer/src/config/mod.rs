//! Configuration for the slicer.
//!
//! Settings are read once from `~/.imageslicer/config.ini` into an
//! immutable [`ConfigFile`], which hands out the typed configs used by the
//! rest of the crate ([`GridSpec`](crate::grid::GridSpec),
//! [`ExportConfig`](crate::export::ExportConfig), [`EncodingConfig`],
//! [`SinkConfig`](crate::storage::SinkConfig)).
//!
//! # Example
//!
//! ```
//! use imageslicer::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.grid_spec().grid_size(), 4);
//! assert!(config.export_config().is_sequential());
//! ```

mod defaults;
mod encoding;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_ACCESS_TOKEN_ENV, DEFAULT_LOG_FILE_NAME, MAX_CONCURRENT_UPLOADS,
};
pub use encoding::EncodingConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DownloadSettings, EncodingSettings, ExportSettings, GridSettings,
    LoggingSettings, StorageBackend, StorageSettings,
};
