//! Inbound slice service.
//!
//! [`SliceService`] is the entry point used by the CLI: it validates a
//! [`SliceRequest`], loads the source image and runs the tile export,
//! returning a [`SliceResponse`] or a [`SliceError`] that carries its own
//! 400/500 classification.

mod error;
mod facade;
mod request;

pub use error::{ErrorBody, ServiceInitError, SliceError, SourceFailure};
pub use facade::{DefaultSliceService, SliceService};
pub use request::{SliceRequest, SliceResponse, ValidatedRequest};
