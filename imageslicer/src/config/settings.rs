//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Default grid settings
    pub grid: GridSettings,
    /// Tile encoding settings
    pub encoding: EncodingSettings,
    /// Source download settings
    pub download: DownloadSettings,
    /// Where tiles are stored
    pub storage: StorageSettings,
    /// Upload concurrency and timeouts
    pub export: ExportSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Grid defaults, used when a request omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    /// Tiles per side
    pub size: u32,
    /// Pixels trimmed from every side of each tile
    pub border_inset: u32,
}

/// Tile encoding configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingSettings {
    /// JPEG quality (1-100)
    pub quality: u8,
}

/// Source download configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Cloud Storage bucket
    Gcs,
    /// Local directory
    Directory,
    /// In-process memory, lost on exit
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcs => "gcs",
            Self::Directory => "directory",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gcs" => Ok(Self::Gcs),
            "directory" | "dir" => Ok(Self::Directory),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{}': must be one of gcs, directory, memory",
                other
            )),
        }
    }
}

/// Storage sink configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Backend to write tiles to
    pub backend: StorageBackend,
    /// GCS bucket name (required for the gcs backend)
    pub bucket: Option<String>,
    /// Base URL used to build returned tile URLs
    pub public_base_url: Option<String>,
    /// Output directory (required for the directory backend)
    pub directory: Option<PathBuf>,
    /// Environment variable holding the GCS OAuth access token
    pub access_token_env: String,
}

/// Tile export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Uploads in flight at once; 1 uploads tiles strictly in order
    pub max_concurrent_uploads: usize,
    /// Per-upload timeout in seconds
    pub upload_timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
