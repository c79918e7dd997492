//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::MAX_CONCURRENT_UPLOADS;
use super::file::ConfigFileError;
use super::settings::{ConfigFile, StorageBackend};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        if let Some(v) = section.get("size") {
            config.grid.size = parse_positive("grid", "size", v)?;
        }
        if let Some(v) = section.get("border_inset") {
            config.grid.border_inset = parse_number("grid", "border_inset", v)?;
        }
    }

    // [encoding] section
    if let Some(section) = ini.section(Some("encoding")) {
        if let Some(v) = section.get("quality") {
            let quality: u8 = parse_number("encoding", "quality", v)?;
            if !(1..=100).contains(&quality) {
                return Err(invalid(
                    "encoding",
                    "quality",
                    v,
                    "must be between 1 and 100",
                ));
            }
            config.encoding.quality = quality;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout_secs = parse_positive("download", "timeout", v)?;
        }
    }

    // [storage] section
    if let Some(section) = ini.section(Some("storage")) {
        if let Some(v) = section.get("backend") {
            config.storage.backend = StorageBackend::from_str(v).map_err(|_| {
                invalid(
                    "storage",
                    "backend",
                    v,
                    "must be one of: gcs, directory, memory",
                )
            })?;
        }
        if let Some(v) = section.get("bucket") {
            config.storage.bucket = non_empty(v);
        }
        if let Some(v) = section.get("public_base_url") {
            config.storage.public_base_url = non_empty(v);
        }
        if let Some(v) = section.get("directory") {
            config.storage.directory = non_empty(v).map(|p| expand_tilde(&p));
        }
        if let Some(v) = section.get("access_token_env") {
            config.storage.access_token_env = non_empty(v).ok_or_else(|| {
                invalid(
                    "storage",
                    "access_token_env",
                    v,
                    "must name an environment variable",
                )
            })?;
        }
    }

    // [export] section
    if let Some(section) = ini.section(Some("export")) {
        if let Some(v) = section.get("max_concurrent_uploads") {
            let max: usize = parse_positive("export", "max_concurrent_uploads", v)?;
            if max > MAX_CONCURRENT_UPLOADS {
                return Err(invalid(
                    "export",
                    "max_concurrent_uploads",
                    v,
                    &format!("must be at most {}", MAX_CONCURRENT_UPLOADS),
                ));
            }
            config.export.max_concurrent_uploads = max;
        }
        if let Some(v) = section.get("upload_timeout") {
            config.export.upload_timeout_secs = parse_positive("export", "upload_timeout", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            if let Some(path) = non_empty(v) {
                config.logging.file = expand_tilde(&path);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "must be a non-negative integer"))
}

fn parse_positive<T>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + Default + PartialEq,
{
    let parsed: T = value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "must be a positive integer"))?;
    if parsed == T::default() {
        return Err(invalid(section, key, value, "must be a positive integer"));
    }
    Ok(parsed)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
