//! Request interception seam.
//!
//! # Design
//! A single optional handle, injected into `ApiClient` at construction,
//! may override how each dispatch protocol builds its request — or, for
//! GET, short-circuit the round-trip entirely. Every hook defaults to
//! "no override" (`None`), so implementors pick only the capabilities
//! they need. The dispatcher queries the hooks synchronously before any
//! header or body work happens.
//!
//! The seam exists for test doubles and alternate transport policies such
//! as request signing; nothing in the crate registers one globally.

use reqwest::{Client, Method, RequestBuilder, Response, Url};

/// Optional overrides for request construction, one hook per protocol.
///
/// Returning `None` from a hook means "build the default request".
pub trait RequestInterceptor: Send + Sync {
    /// Replace the request shell for a GET. Headers are still applied to
    /// the returned builder before sending.
    fn intercept_get(&self, _http: &Client, _url: &Url) -> Option<RequestBuilder> {
        None
    }

    /// Answer a GET without touching the network. The response is returned
    /// to the caller verbatim — no headers are injected.
    fn fully_intercept_get(&self, _url: &Url) -> Option<Response> {
        None
    }

    /// Replace the request shell for a form POST, before headers and body
    /// fields are attached.
    fn intercept_post(&self, _http: &Client, _url: &Url) -> Option<RequestBuilder> {
        None
    }

    /// Replace the request shell for a multipart request, before headers,
    /// fields, and file parts are attached.
    fn intercept_multipart(
        &self,
        _http: &Client,
        _method: Method,
        _url: &Url,
    ) -> Option<RequestBuilder> {
        None
    }
}
