//! Tile name prefix derived from the source URL.

use url::Url;

/// Prefix used when nothing usable can be derived from the URL.
pub const FALLBACK_IDENTIFIER: &str = "slice";

/// Derives a stable identifier from an image URL.
///
/// Takes the last path segment, drops its extension, and keeps only
/// `[A-Za-z0-9_-]` characters so the result is safe inside an object name.
/// Query strings and fragments are ignored. Returns [`FALLBACK_IDENTIFIER`]
/// when the result would be empty.
///
/// # Example
///
/// ```
/// use imageslicer::source::identifier_from_url;
///
/// assert_eq!(identifier_from_url("https://cdn.example.com/art/poster.v2.png?x=1"), "poster_v2");
/// assert_eq!(identifier_from_url("https://cdn.example.com/"), "slice");
/// ```
pub fn identifier_from_url(image_url: &str) -> String {
    let segment = match Url::parse(image_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        // Not an absolute URL; treat it as a bare path
        Err(_) => image_url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').find(|s| !s.is_empty()))
            .map(str::to_string),
    };

    let Some(segment) = segment else {
        return FALLBACK_IDENTIFIER.to_string();
    };

    let stem = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment.as_str(),
    };

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('_').is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        sanitized
    }
}
