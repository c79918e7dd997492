//! Grid type definitions

use thiserror::Error;

/// Default grid size (4×4 tiles).
pub const DEFAULT_GRID_SIZE: u32 = 4;

/// Default border inset in pixels (no trimming).
pub const DEFAULT_BORDER_INSET: u32 = 0;

/// Image axis, used to report which dimension failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Errors that can occur while partitioning an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid size or a source dimension is zero
    #[error("Invalid dimensions: {width}x{height} with grid size {grid_size}")]
    InvalidDimension {
        width: u32,
        height: u32,
        grid_size: u32,
    },

    /// A source dimension is smaller than the grid size, so truncation
    /// would leave nothing to tile
    #[error("Image {axis} {size} is smaller than grid size {grid_size}")]
    DimensionTooSmall { axis: Axis, size: u32, grid_size: u32 },
}

/// Grid configuration: how many tiles per side and how much border to trim.
///
/// # Example
///
/// ```
/// use imageslicer::grid::GridSpec;
///
/// let spec = GridSpec::new(6).with_border_inset(5);
/// assert_eq!(spec.grid_size(), 6);
/// assert_eq!(spec.border_inset(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    grid_size: u32,
    border_inset: u32,
}

impl GridSpec {
    /// Create a spec for an N×N grid with no border inset.
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            border_inset: DEFAULT_BORDER_INSET,
        }
    }

    /// Set the border inset trimmed from each side of every tile.
    pub fn with_border_inset(mut self, inset: u32) -> Self {
        self.border_inset = inset;
        self
    }

    /// Number of tiles per side.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Pixels trimmed from each edge of a tile.
    pub fn border_inset(&self) -> u32 {
        self.border_inset
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// Pixel rectangle of one tile, half-open: `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    /// 0-based row, top to bottom
    pub row: u32,
    /// 0-based column, left to right
    pub col: u32,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// 1-based row-major position of this tile within a grid.
    #[inline]
    pub fn index(&self, grid_size: u32) -> usize {
        (self.row as usize) * (grid_size as usize) + (self.col as usize) + 1
    }
}

/// Result of partitioning an image into a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayout {
    /// Source width after truncation to a multiple of the grid size
    pub usable_width: u32,
    /// Source height after truncation to a multiple of the grid size
    pub usable_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub grid_size: u32,
    /// Tile rectangles in row-major order
    pub tiles: Vec<TileRect>,
}

impl TileLayout {
    /// Number of tiles in the layout.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if the layout holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
