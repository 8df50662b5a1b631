//! Request dispatcher for the food-product API.
//!
//! # Design
//! `ApiClient` owns a `reqwest::Client` and its construction-time
//! configuration, and carries no mutable state between calls; every
//! dispatch builds a fresh request. Each protocol follows the same order:
//! query the interception seam, fall back to a default request shell,
//! apply the common header set, attach protocol-specific body content,
//! send. Transport failures propagate to the caller unwrapped — this layer
//! never retries. Multipart responses additionally pass through the
//! tolerant decoder in [`crate::status`].

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use crate::config::{ApiConfig, Environment};
use crate::error::ClientError;
use crate::headers::build_headers;
use crate::intercept::RequestInterceptor;
use crate::params::enrich_params;
use crate::reader::{FsUriReader, UriReader};
use crate::status::{decode_upload_response, UploadStatus};
use crate::types::UserSession;

/// Part filename when an upload source URI has no usable path segment.
const FALLBACK_PART_FILENAME: &str = "file";

/// Asynchronous dispatcher for GET, form-POST, and multipart-POST requests.
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    interceptor: Option<Arc<dyn RequestInterceptor>>,
    reader: Arc<dyn UriReader>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            interceptor: None,
            reader: Arc::new(FsUriReader),
        }
    }

    /// Install an interception handle. At most one is consulted per client.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Replace the reader collaborator used to resolve upload sources.
    pub fn with_reader(mut self, reader: Arc<dyn UriReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Send a GET request and return the raw response.
    ///
    /// A registered full-interception hook answers without touching the
    /// network, bypassing header injection entirely.
    pub async fn get(
        &self,
        url: Url,
        identity: Option<&UserSession>,
        environment: Option<Environment>,
    ) -> Result<Response, ClientError> {
        if let Some(interceptor) = &self.interceptor {
            if let Some(response) = interceptor.fully_intercept_get(&url) {
                debug!(%url, "GET answered by full interception");
                return Ok(response);
            }
        }

        debug!(%url, "dispatching GET");
        let request = self
            .intercepted(|i| i.intercept_get(&self.http, &url))
            .unwrap_or_else(|| self.http.get(url.clone()));
        let response = request
            .headers(self.request_headers(identity, environment))
            .send()
            .await?;
        Ok(response)
    }

    /// Send a form-urlencoded POST and return the raw response.
    ///
    /// Body fields are the caller's map, extended with the identity's
    /// authentication fields, with configured app metadata added last.
    pub async fn post_form(
        &self,
        url: Url,
        body: HashMap<String, String>,
        identity: Option<&UserSession>,
        environment: Option<Environment>,
    ) -> Result<Response, ClientError> {
        debug!(%url, fields = body.len(), "dispatching POST");
        let mut fields = body;
        if let Some(identity) = identity {
            fields.extend(identity.form_fields());
        }
        let fields =
            enrich_params(self.config.app_metadata.as_ref(), Some(fields)).unwrap_or_default();

        let request = self
            .intercepted(|i| i.intercept_post(&self.http, &url))
            .unwrap_or_else(|| self.http.post(url.clone()));
        let response = request
            .headers(self.request_headers(identity, environment))
            .form(&fields)
            .send()
            .await?;
        Ok(response)
    }

    /// Send a multipart POST carrying form fields and file parts, then
    /// decode the response into an [`UploadStatus`].
    ///
    /// Each `(field, uri)` entry in `files` is resolved to bytes through
    /// the reader collaborator and attached under the caller's field name,
    /// with the part filename taken from the URI's trailing path segment.
    pub async fn post_multipart(
        &self,
        url: Url,
        body: HashMap<String, String>,
        files: Option<HashMap<String, Url>>,
        identity: Option<&UserSession>,
        environment: Option<Environment>,
    ) -> Result<UploadStatus, ClientError> {
        debug!(%url, "dispatching multipart POST");
        let mut fields =
            enrich_params(self.config.app_metadata.as_ref(), Some(body)).unwrap_or_default();
        if let Some(identity) = identity {
            fields.extend(identity.form_fields());
        }

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        for (name, uri) in files.unwrap_or_default() {
            let bytes =
                self.reader
                    .read_bytes(&uri)
                    .await
                    .map_err(|source| ClientError::UploadSource {
                        uri: uri.to_string(),
                        source,
                    })?;
            let part = Part::bytes(bytes).file_name(part_file_name(&uri));
            form = form.part(name, part);
        }

        let request = self
            .intercepted(|i| i.intercept_multipart(&self.http, Method::POST, &url))
            .unwrap_or_else(|| self.http.post(url.clone()));
        // The multipart encoder writes the final `Content-Type` (with its
        // boundary) after the common headers, so it always wins.
        let response = request
            .headers(self.request_headers(identity, environment))
            .multipart(form)
            .send()
            .await?;

        let status_code = response.status();
        let body = response.bytes().await?;
        let decoded = decode_upload_response(status_code, &body)?;
        match &decoded {
            UploadStatus::RawBody { .. } => {
                warn!(%url, "multipart response body is not JSON; returning raw text")
            }
            UploadStatus::HttpError { status_code, .. } => {
                warn!(%url, status_code, "multipart upload rejected")
            }
            UploadStatus::Decoded(_) => {}
        }
        Ok(decoded)
    }

    fn intercepted<F>(&self, hook: F) -> Option<RequestBuilder>
    where
        F: FnOnce(&dyn RequestInterceptor) -> Option<RequestBuilder>,
    {
        self.interceptor.as_deref().and_then(hook)
    }

    fn request_headers(
        &self,
        identity: Option<&UserSession>,
        environment: Option<Environment>,
    ) -> reqwest::header::HeaderMap {
        let environment = environment.unwrap_or(self.config.environment);
        build_headers(
            self.config.user_agent.as_deref(),
            identity,
            environment != Environment::Production,
        )
    }
}

/// Derive a part filename from the trailing path segment of an upload URI.
fn part_file_name(uri: &Url) -> String {
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_PART_FILENAME)
        .to_string()
}
