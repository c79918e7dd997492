//! Source image acquisition.
//!
//! Everything that happens before partitioning: downloading the source
//! bytes ([`Fetcher`]), decoding them ([`Decoder`]) into a [`SourceImage`],
//! and deriving the tile name prefix from the URL ([`identifier_from_url`]).

mod buffer;
mod decode;
mod fetch;
mod identifier;

pub use buffer::SourceImage;
pub use decode::{DecodeError, Decoder, ImageDecoder};
pub use fetch::{FetchError, Fetcher, ReqwestFetcher, DEFAULT_FETCH_TIMEOUT_SECS};
pub use identifier::{identifier_from_url, FALLBACK_IDENTIFIER};
