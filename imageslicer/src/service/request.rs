//! Slice request and response types.

use super::error::SliceError;
use crate::grid::{GridError, GridSpec};
use serde::{Deserialize, Serialize};

/// Incoming "slice an image" request.
///
/// Field names follow the JSON body: `imageUrl`, `gridSize`, `borderInset`.
/// Only `imageUrl` is required; the others fall back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub grid_size: Option<u32>,
    #[serde(default)]
    pub border_inset: Option<u32>,
}

impl SliceRequest {
    /// Request for `image_url` with default grid settings.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            ..Self::default()
        }
    }

    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    pub fn with_border_inset(mut self, inset: u32) -> Self {
        self.border_inset = Some(inset);
        self
    }

    /// Check required fields and resolve defaults.
    ///
    /// # Errors
    ///
    /// - [`SliceError::MissingParameter`] if `imageUrl` is absent or blank
    /// - [`SliceError::Grid`] if the grid size is zero
    pub fn validate(self, defaults: GridSpec) -> Result<ValidatedRequest, SliceError> {
        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(SliceError::MissingParameter("imageUrl"))?;

        let grid_size = self.grid_size.unwrap_or(defaults.grid_size());
        if grid_size == 0 {
            return Err(GridError::InvalidDimension {
                width: 0,
                height: 0,
                grid_size,
            }
            .into());
        }

        let border_inset = self.border_inset.unwrap_or(defaults.border_inset());

        Ok(ValidatedRequest {
            image_url,
            grid: GridSpec::new(grid_size).with_border_inset(border_inset),
        })
    }
}

/// A request whose fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub image_url: String,
    pub grid: GridSpec,
}

/// Successful slice response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceResponse {
    /// Always `"success"`
    pub status: &'static str,
    /// Tile URLs in row-major order
    pub urls: Vec<String>,
}

impl SliceResponse {
    pub fn success(urls: Vec<String>) -> Self {
        Self {
            status: "success",
            urls,
        }
    }
}
