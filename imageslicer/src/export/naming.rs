//! Tile object naming.

/// Builds the object name for a tile.
///
/// Format: `{identifier}_{usable_width}x{usable_height}_{index}.{extension}`.
/// Names are unique within one export (the index differs) and across
/// exports with different identifiers. Two exports with the same
/// identifier and dimensions produce the same names and overwrite each
/// other in the sink.
///
/// # Example
///
/// ```
/// use imageslicer::export::tile_name;
///
/// assert_eq!(tile_name("abc", 24, 24, 1, "jpg"), "abc_24x24_1.jpg");
/// ```
pub fn tile_name(
    identifier: &str,
    usable_width: u32,
    usable_height: u32,
    index: usize,
    extension: &str,
) -> String {
    format!(
        "{}_{}x{}_{}.{}",
        identifier, usable_width, usable_height, index, extension
    )
}
