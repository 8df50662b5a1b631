//! Pure header-set builder for outbound requests.
//!
//! # Design
//! Every request the dispatcher sends carries the same three headers:
//! `Accept`, `User-Agent`, and `From`, each with a fixed fallback when no
//! configured value resolves. `Authorization` is added exactly when the
//! resolved environment is not production, using the staging deployment's
//! fixed Basic credential. The builder is deterministic and has no failure
//! modes: a configured string that is not a valid header value falls back
//! to the corresponding fixed default.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, FROM, USER_AGENT};

use crate::types::UserSession;

/// `User-Agent` value when the configuration does not provide one.
pub const DEFAULT_USER_AGENT: &str = "Dart API";

/// `From` value when no identity resolves.
pub const DEFAULT_FROM: &str = "anonymous";

/// Basic auth credential accepted by non-production deployments.
const TEST_CREDENTIALS: &str = "off:off";

/// Build the header set for an outbound request.
pub fn build_headers(
    user_agent: Option<&str>,
    identity: Option<&UserSession>,
    test_mode: bool,
) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        header_value(user_agent.unwrap_or(DEFAULT_USER_AGENT), DEFAULT_USER_AGENT),
    );
    headers.insert(
        FROM,
        header_value(
            identity.map_or(DEFAULT_FROM, |session| session.user_id.as_str()),
            DEFAULT_FROM,
        ),
    );
    if test_mode {
        let credentials = STANDARD.encode(TEST_CREDENTIALS);
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Basic {credentials}"), "Basic"),
        );
    }
    headers
}

/// Header values reject control characters; configured strings that carry
/// them fall back to the fixed default instead of failing the request.
fn header_value(value: &str, fallback: &'static str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(fallback))
}
