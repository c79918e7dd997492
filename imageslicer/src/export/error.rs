//! Error types for tile export.

use crate::encode::EncodeError;
use crate::grid::GridError;
use crate::storage::SinkError;
use thiserror::Error;

/// Why a single tile could not be exported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileFailure {
    /// Sink rejected the upload, failed, or timed out
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Tile could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Worker running the tile panicked or was lost
    #[error("Tile worker failed: {0}")]
    Worker(String),
}

/// Errors that can occur during an export.
///
/// Tiles uploaded before the failure stay in the sink; nothing is rolled
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Image could not be partitioned; no tile was attempted
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A tile failed; `index` is its 1-based row-major position
    #[error("Export failed at tile {index}: {cause}")]
    Failed { index: usize, cause: TileFailure },

    /// Export was cancelled before tile `index` completed
    #[error("Export cancelled at tile {index}")]
    Cancelled { index: usize },
}

impl ExportError {
    /// 1-based index of the tile the export stopped at, if any.
    pub fn tile_index(&self) -> Option<usize> {
        match self {
            Self::Grid(_) => None,
            Self::Failed { index, .. } | Self::Cancelled { index } => Some(*index),
        }
    }

    /// True if the export stopped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
