//! Service error types.

use crate::export::ExportError;
use crate::grid::GridError;
use crate::source::{DecodeError, FetchError};
use crate::storage::SinkError;
use serde::Serialize;
use thiserror::Error;

/// Why the source image could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Decode worker panicked or was lost
    #[error("Decode worker failed: {0}")]
    Worker(String),
}

/// Errors returned by [`SliceService`](super::SliceService).
///
/// Each variant maps to a client error (400) or a server error (500) via
/// [`SliceError::status_code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    /// A required request field is absent or blank
    #[error("Missing '{0}' in request body.")]
    MissingParameter(&'static str),

    /// Grid parameters or image dimensions are unusable
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Download or decode of the source failed
    #[error("Failed to download or open image: {0}")]
    SourceFetch(#[from] SourceFailure),

    /// A tile failed to export, or the export was cancelled
    #[error(transparent)]
    Export(ExportError),
}

impl From<ExportError> for SliceError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Grid(grid) => Self::Grid(grid),
            other => Self::Export(other),
        }
    }
}

impl SliceError {
    /// HTTP-equivalent status: 400 for caller mistakes, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_) | Self::Grid(_) => 400,
            Self::SourceFetch(_) | Self::Export(_) => 500,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing_parameter",
            Self::Grid(GridError::InvalidDimension { .. }) => "invalid_dimension",
            Self::Grid(GridError::DimensionTooSmall { .. }) => "dimension_too_small",
            Self::SourceFetch(_) => "source_fetch",
            Self::Export(ExportError::Cancelled { .. }) => "cancelled",
            Self::Export(_) => "export_failed",
        }
    }

    /// Structured body describing this error.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: "error",
            kind: self.kind(),
            code: self.status_code(),
            message: self.to_string(),
        }
    }
}

/// Errors constructing a service from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceInitError {
    #[error(transparent)]
    Fetcher(#[from] FetchError),

    #[error("Failed to create storage sink: {0}")]
    Sink(#[from] SinkError),
}

/// Serializable failure description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub kind: &'static str,
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TileFailure;
    use crate::grid::Axis;

    #[test]
    fn test_missing_parameter() {
        let err = SliceError::MissingParameter("imageUrl");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.kind(), "missing_parameter");
        assert_eq!(err.to_string(), "Missing 'imageUrl' in request body.");
    }

    #[test]
    fn test_too_small_is_client_error() {
        let err = SliceError::from(GridError::DimensionTooSmall {
            axis: Axis::Width,
            size: 3,
            grid_size: 4,
        });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.kind(), "dimension_too_small");
    }

    #[test]
    fn test_export_grid_error_is_unwrapped() {
        let err = SliceError::from(ExportError::Grid(GridError::InvalidDimension {
            width: 1,
            height: 1,
            grid_size: 0,
        }));
        assert!(matches!(err, SliceError::Grid(_)));
        assert_eq!(err.kind(), "invalid_dimension");
    }

    #[test]
    fn test_source_fetch_message_includes_cause() {
        let err = SliceError::from(SourceFailure::Fetch(FetchError::Status {
            url: "https://x/y.png".to_string(),
            status: 404,
        }));
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "Failed to download or open image: HTTP 404 from https://x/y.png"
        );
    }

    #[test]
    fn test_export_kinds() {
        let failed = SliceError::from(ExportError::Failed {
            index: 2,
            cause: TileFailure::Sink(SinkError::Config("x".to_string())),
        });
        assert_eq!(failed.kind(), "export_failed");
        assert_eq!(failed.status_code(), 500);

        let cancelled = SliceError::from(ExportError::Cancelled { index: 1 });
        assert_eq!(cancelled.kind(), "cancelled");
    }

    #[test]
    fn test_error_body_serializes() {
        let body = SliceError::MissingParameter("imageUrl").to_body();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "missing_parameter");
        assert_eq!(json["code"], 400);
    }
}
