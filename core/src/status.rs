//! Upload result type and tolerant multipart response decoding.
//!
//! # Design
//! The remote API answers multipart submissions with a small JSON document,
//! but a deployment under maintenance may answer `200` with an HTML page
//! instead. Decoding therefore never treats "not JSON" as an error: a 200
//! body that fails to parse becomes a raw-text fallback, and only a body
//! that is not UTF-8 at all propagates as a failure. Non-200 responses are
//! folded into an error value rather than thrown, since callers routinely
//! inspect them.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Decoded JSON payload of a successful multipart submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Outcome of a multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// 200 response whose body parsed as the expected JSON shape.
    Decoded(Status),

    /// 200 response whose body was readable text but not JSON.
    RawBody { status_code: u16, body: String },

    /// Non-200 response; `reason` is the status line's reason phrase.
    HttpError {
        status_code: u16,
        reason: Option<String>,
    },
}

/// Decode a completed multipart response into an [`UploadStatus`].
///
/// Only a body that cannot be interpreted as UTF-8 fails; every other
/// response shape maps to one of the three variants.
pub fn decode_upload_response(
    status_code: StatusCode,
    body: &[u8],
) -> Result<UploadStatus, ClientError> {
    if status_code != StatusCode::OK {
        return Ok(UploadStatus::HttpError {
            status_code: status_code.as_u16(),
            reason: status_code.canonical_reason().map(str::to_string),
        });
    }

    let text = std::str::from_utf8(body)?;
    match serde_json::from_str::<Status>(text) {
        Ok(status) => Ok(UploadStatus::Decoded(status)),
        Err(_) => Ok(UploadStatus::RawBody {
            status_code: status_code.as_u16(),
            body: text.to_string(),
        }),
    }
}
