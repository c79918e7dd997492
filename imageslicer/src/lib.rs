//! imageslicer - cut images into grid tiles and publish them
//!
//! The library fetches a source image by URL, partitions it into an
//! N×N grid (truncating remainder pixels, optionally trimming a border
//! inset from every tile), JPEG-encodes each tile and uploads it to a
//! storage sink, returning the tile URLs in row-major order.
//!
//! # High-Level API
//!
//! The [`service`] module provides the entry point:
//!
//! ```ignore
//! use imageslicer::config::ConfigFile;
//! use imageslicer::service::{DefaultSliceService, SliceRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ConfigFile::load()?;
//! let service = DefaultSliceService::from_config(&config)?;
//!
//! let response = service
//!     .slice(SliceRequest::new("https://example.com/abc.png"), &CancellationToken::new())
//!     .await?;
//! ```
//!
//! Lower layers are usable on their own: [`grid`] for the partition math,
//! [`export`] for rendering and uploading tiles of an already-decoded
//! image, [`storage`] for the sinks.

pub mod config;
pub mod encode;
pub mod export;
pub mod grid;
pub mod logging;
pub mod service;
pub mod source;
pub mod storage;

/// Version of the imageslicer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
