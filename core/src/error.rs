//! Error types for the food-product API client.
//!
//! # Design
//! Transport failures are deliberately passed through transparent: this
//! layer never retries and never rewraps, so callers see the underlying
//! `reqwest::Error` unchanged. The only failures minted here are the two the
//! dispatcher itself can produce: an upload source that cannot be read, and
//! a multipart response body that is not valid UTF-8.

use thiserror::Error;

/// Errors returned by `ApiClient` dispatch methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying transport failed (DNS, connect, timeout, protocol).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A multipart response body could not be decoded as UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    BodyEncoding(#[from] std::str::Utf8Error),

    /// An upload source handed to the reader collaborator could not be read.
    #[error("reading upload bytes from {uri}: {source}")]
    UploadSource {
        uri: String,
        #[source]
        source: std::io::Error,
    },
}
