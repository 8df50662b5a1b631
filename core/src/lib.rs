//! Asynchronous HTTP client core for a remote food-product API.
//!
//! # Overview
//! Mediates every outbound request to the API: builds the common header
//! set, enriches outgoing form fields with application metadata, consults
//! an optional interception seam, dispatches GET / form-POST / multipart
//! requests, and decodes multipart responses tolerantly (servers under
//! maintenance answer 200 with HTML).
//!
//! # Design
//! - `ApiClient` is constructed from an [`ApiConfig`] and carries no
//!   mutable state between calls; interception and the upload-byte reader
//!   are injected at construction, never registered globally.
//! - Header building, parameter enrichment, and response decoding are pure
//!   functions, unit-testable without a transport.
//! - Transport failures propagate unwrapped; only multipart responses are
//!   interpreted here, and only their JSON shape (never their status) can
//!   fall back.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod intercept;
pub mod params;
pub mod reader;
pub mod status;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, Environment};
pub use error::ClientError;
pub use headers::build_headers;
pub use intercept::RequestInterceptor;
pub use params::enrich_params;
pub use reader::{FsUriReader, UriReader};
pub use status::{decode_upload_response, Status, UploadStatus};
pub use types::{AppMetadata, UserSession};
