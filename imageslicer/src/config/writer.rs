//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let bucket = config.storage.bucket.as_deref().unwrap_or("");
    let public_base_url = config.storage.public_base_url.as_deref().unwrap_or("");
    let directory = config
        .storage
        .directory
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[grid]
; Tiles per side; the image is cut into size x size tiles
size = {}
; Pixels trimmed from every side of each tile (0 = none).
; Skipped for tiles not larger than twice the inset.
border_inset = {}

[encoding]
; JPEG quality for tiles (1-100)
quality = {}

[download]
; Source image download timeout in seconds
timeout = {}

[storage]
; Where tiles are written:
;   gcs       - Google Cloud Storage bucket (requires bucket)
;   directory - local directory (requires directory)
;   memory    - kept in memory, useful for dry runs
backend = {}
; GCS bucket name
bucket = {}
; Base URL for returned tile URLs. For gcs defaults to
; https://storage.googleapis.com; for directory defaults to file:// URLs
public_base_url = {}
; Output directory for the directory backend
directory = {}
; Environment variable holding the GCS OAuth access token
access_token_env = {}

[export]
; Uploads in flight at once. 1 uploads tiles strictly in order and
; stops at the first failure.
max_concurrent_uploads = {}
; Per-upload timeout in seconds
upload_timeout = {}

[logging]
; Log file, cleared at the start of each run
file = {}
"#,
        config.grid.size,
        config.grid.border_inset,
        config.encoding.quality,
        config.download.timeout_secs,
        config.storage.backend,
        bucket,
        public_base_url,
        directory,
        config.storage.access_token_env,
        config.export.max_concurrent_uploads,
        config.export.upload_timeout_secs,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
