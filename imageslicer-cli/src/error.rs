//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use imageslicer::config::ConfigFileError;
use imageslicer::service::{ServiceInitError, SliceError};
use imageslicer::storage::SinkError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create service
    ServiceCreation(ServiceInitError),
    /// Slicing failed
    Slice(SliceError),
    /// Failed to render output
    Output(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::ServiceCreation(ServiceInitError::Sink(SinkError::Config(_))) => {
                eprintln!();
                eprintln!("Storage is configured in ~/.imageslicer/config.ini:");
                eprintln!("  gcs       - set bucket (or pass --bucket)");
                eprintln!("  directory - set directory (or pass --output-dir)");
                eprintln!("  memory    - no settings needed (pass --backend memory)");
            }
            CliError::Slice(SliceError::Export(_)) => {
                eprintln!();
                eprintln!("Tiles uploaded before the failure were not removed.");
            }
            CliError::Slice(err) if err.status_code() == 400 => {
                eprintln!();
                eprintln!("Check --grid-size and --border-inset against the image size.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Slice(e) => write!(f, "Slicing failed: {}", e),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::ServiceCreation(e) => Some(e),
            CliError::Slice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ServiceInitError> for CliError {
    fn from(e: ServiceInitError) -> Self {
        CliError::ServiceCreation(e)
    }
}

impl From<SliceError> for CliError {
    fn from(e: SliceError) -> Self {
        CliError::Slice(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = CliError::from(SliceError::MissingParameter("imageUrl"));
        assert_eq!(
            err.to_string(),
            "Slicing failed: Missing 'imageUrl' in request body."
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_conversion() {
        let err = CliError::from(ConfigFileError::InvalidValue {
            section: "grid".to_string(),
            key: "size".to_string(),
            value: "0".to_string(),
            reason: "must be a positive integer".to_string(),
        });
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("grid.size"));
    }
}
