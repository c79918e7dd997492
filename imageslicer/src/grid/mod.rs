//! Grid partitioning module
//!
//! Computes tile rectangles for an N×N split of an image. Dimensions that
//! are not a multiple of the grid size are truncated (the right/bottom
//! remainder is dropped), so every tile has the same size.
//!
//! Pure geometry: no pixels are touched here.

mod types;


pub use types::{
    Axis, GridError, GridSpec, TileLayout, TileRect, DEFAULT_BORDER_INSET, DEFAULT_GRID_SIZE,
};

/// Partitions a `width × height` image into `grid_size²` equal tiles.
///
/// # Arguments
///
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
/// * `grid_size` - Tiles per side
///
/// # Returns
///
/// A [`TileLayout`] with rectangles in row-major order (row 0 left to
/// right, then row 1, ...). The rectangles cover
/// `[0, usable_width) × [0, usable_height)` with no gaps or overlaps.
///
/// # Errors
///
/// - [`GridError::InvalidDimension`] if any argument is zero
/// - [`GridError::DimensionTooSmall`] if a dimension is below `grid_size`
///
/// # Example
///
/// ```
/// use imageslicer::grid::compute_tiles;
///
/// let layout = compute_tiles(25, 25, 4).unwrap();
/// assert_eq!((layout.usable_width, layout.usable_height), (24, 24));
/// assert_eq!(layout.tiles.len(), 16);
/// ```
pub fn compute_tiles(width: u32, height: u32, grid_size: u32) -> Result<TileLayout, GridError> {
    if grid_size == 0 || width == 0 || height == 0 {
        return Err(GridError::InvalidDimension {
            width,
            height,
            grid_size,
        });
    }

    let usable_width = width - width % grid_size;
    let usable_height = height - height % grid_size;

    if usable_width == 0 {
        return Err(GridError::DimensionTooSmall {
            axis: Axis::Width,
            size: width,
            grid_size,
        });
    }
    if usable_height == 0 {
        return Err(GridError::DimensionTooSmall {
            axis: Axis::Height,
            size: height,
            grid_size,
        });
    }

    let tile_width = usable_width / grid_size;
    let tile_height = usable_height / grid_size;

    let tiles = (0..grid_size)
        .flat_map(|row| (0..grid_size).map(move |col| (row, col)))
        .map(|(row, col)| {
            let left = col * tile_width;
            let top = row * tile_height;
            TileRect {
                row,
                col,
                left,
                top,
                right: left + tile_width,
                bottom: top + tile_height,
            }
        })
        .collect();

    Ok(TileLayout {
        usable_width,
        usable_height,
        tile_width,
        tile_height,
        grid_size,
        tiles,
    })
}

/// Shrinks a rectangle by `inset` pixels on every side.
///
/// The rectangle is returned unchanged when `inset` is zero or when either
/// side is not strictly larger than `2 * inset`; a too-small tile keeps its
/// full extent instead of collapsing.
#[inline]
pub fn apply_inset(rect: TileRect, inset: u32) -> TileRect {
    let margin = u64::from(inset) * 2;
    if inset == 0 || u64::from(rect.width()) <= margin || u64::from(rect.height()) <= margin {
        return rect;
    }

    TileRect {
        left: rect.left + inset,
        top: rect.top + inset,
        right: rect.right - inset,
        bottom: rect.bottom - inset,
        ..rect
    }
}
