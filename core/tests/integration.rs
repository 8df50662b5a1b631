//! End-to-end dispatch tests against the live mock server.
//!
//! # Design
//! Starts the mock product API on a random port, then drives every
//! dispatch protocol over real HTTP: header injection per environment,
//! form-field merging, multipart upload with file parts, the tolerant
//! decode paths, and all four interception hooks.

use std::collections::HashMap;
use std::sync::Arc;

use foodapi_core::{
    ApiClient, ApiConfig, AppMetadata, Environment, RequestInterceptor, UploadStatus, UserSession,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use uuid::Uuid;

async fn start_server() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn configured_client() -> ApiClient {
    ApiClient::new(ApiConfig {
        user_agent: Some("acme-scanner/1.2.3".to_string()),
        environment: Environment::Production,
        app_metadata: Some(AppMetadata {
            name: Some("acme-scanner".to_string()),
            version: Some("1.2.3".to_string()),
            instance_uuid: Some(Uuid::nil()),
        }),
    })
}

fn identity() -> UserSession {
    UserSession::new("alice", "s3cret")
}

async fn echoed_headers(
    client: &ApiClient,
    base: &Url,
    identity: Option<&UserSession>,
    environment: Option<Environment>,
) -> HashMap<String, String> {
    let response = client
        .get(base.join("/echo/headers").unwrap(), identity, environment)
        .await
        .unwrap();
    response.json().await.unwrap()
}

#[tokio::test]
async fn get_injects_default_headers_in_production() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default());

    let headers = echoed_headers(&client, &base, None, None).await;
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["user-agent"], "Dart API");
    assert_eq!(headers["from"], "anonymous");
    assert!(!headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_environment_adds_authorization_and_identity_from() {
    let base = start_server().await;
    let client = configured_client();

    let session = identity();
    let headers = echoed_headers(&client, &base, Some(&session), Some(Environment::Test)).await;
    assert_eq!(headers["authorization"], "Basic b2ZmOm9mZg==");
    assert_eq!(headers["from"], "alice");
    assert_eq!(headers["user-agent"], "acme-scanner/1.2.3");
}

#[tokio::test]
async fn per_call_environment_overrides_configured_default() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig {
        environment: Environment::Test,
        ..ApiConfig::default()
    });

    // Configured default applies when the call names no environment.
    let headers = echoed_headers(&client, &base, None, None).await;
    assert!(headers.contains_key("authorization"));

    let headers = echoed_headers(&client, &base, None, Some(Environment::Production)).await;
    assert!(!headers.contains_key("authorization"));
}

#[tokio::test]
async fn post_form_merges_identity_and_metadata_fields() {
    let base = start_server().await;
    let client = configured_client();

    let body = HashMap::from([("code".to_string(), "4000000000001".to_string())]);
    let response = client
        .post_form(
            base.join("/echo/form").unwrap(),
            body,
            Some(&identity()),
            None,
        )
        .await
        .unwrap();

    let fields: HashMap<String, String> = response.json().await.unwrap();
    assert_eq!(fields["code"], "4000000000001");
    assert_eq!(fields["user_id"], "alice");
    assert_eq!(fields["password"], "s3cret");
    assert_eq!(fields["app_name"], "acme-scanner");
    assert_eq!(fields["app_version"], "1.2.3");
    assert_eq!(fields["app_uuid"], Uuid::nil().to_string());
}

#[tokio::test]
async fn multipart_upload_reports_parts_and_decodes_status() {
    let base = start_server().await;
    let client = configured_client();

    let dir = std::env::temp_dir().join("foodapi-multipart-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("front.jpg");
    std::fs::write(&path, b"jpegbytes").unwrap();

    let body = HashMap::from([("code".to_string(), "4000000000001".to_string())]);
    let files = HashMap::from([(
        "image_front".to_string(),
        Url::from_file_path(&path).unwrap(),
    )]);
    let status = client
        .post_multipart(
            base.join("/product/image").unwrap(),
            body,
            Some(files),
            Some(&identity()),
            None,
        )
        .await
        .unwrap();

    let UploadStatus::Decoded(status) = status else {
        panic!("expected decoded status, got {status:?}");
    };
    assert_eq!(status.status, Some(1));
    let summary = status.body.unwrap();
    assert!(summary.contains("image_front=front.jpg:9"), "{summary}");
    assert!(summary.contains("user_id=alice"), "{summary}");
    assert!(summary.contains("app_name=acme-scanner"), "{summary}");
}

#[tokio::test]
async fn multipart_maintenance_page_falls_back_to_raw_body() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default());

    let status = client
        .post_multipart(
            base.join("/maintenance").unwrap(),
            HashMap::new(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        status,
        UploadStatus::RawBody {
            status_code: 200,
            body: "<html>Maintenance</html>".to_string(),
        }
    );
}

#[tokio::test]
async fn multipart_unavailable_maps_to_http_error_reason() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default());

    let status = client
        .post_multipart(
            base.join("/unavailable").unwrap(),
            HashMap::new(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        status,
        UploadStatus::HttpError {
            status_code: 503,
            reason: Some("Service Unavailable".to_string()),
        }
    );
}

// --- interception ---

struct CannedGet;

impl RequestInterceptor for CannedGet {
    fn fully_intercept_get(&self, _url: &Url) -> Option<reqwest::Response> {
        let response = http::Response::builder()
            .status(http::StatusCode::OK)
            .header("x-canned", "yes")
            .body("canned")
            .unwrap();
        Some(reqwest::Response::from(response))
    }
}

#[tokio::test]
async fn fully_intercepted_get_bypasses_header_injection() {
    // No server: the canned response never touches the network.
    let client = ApiClient::new(ApiConfig::default()).with_interceptor(Arc::new(CannedGet));

    let url = Url::parse("http://127.0.0.1:1/product/4000000000001").unwrap();
    let response = client.get(url, None, Some(Environment::Test)).await.unwrap();

    assert_eq!(response.headers()["x-canned"], "yes");
    assert!(!response.headers().contains_key("user-agent"));
    assert!(!response.headers().contains_key("from"));
    assert!(!response.headers().contains_key("authorization"));
    assert_eq!(response.text().await.unwrap(), "canned");
}

struct GetSigner;

impl RequestInterceptor for GetSigner {
    fn intercept_get(&self, http: &Client, url: &Url) -> Option<RequestBuilder> {
        Some(http.get(url.clone()).header("x-signed", "1"))
    }
}

#[tokio::test]
async fn intercepted_get_shell_still_receives_headers() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default()).with_interceptor(Arc::new(GetSigner));

    let headers = echoed_headers(&client, &base, None, None).await;
    assert_eq!(headers["x-signed"], "1");
    assert_eq!(headers["user-agent"], "Dart API");
    assert_eq!(headers["from"], "anonymous");
}

/// Routes POST and multipart shells to a fixed target, proving the
/// dispatcher uses the intercepted shell instead of the default.
struct Redirector {
    target: Url,
}

impl RequestInterceptor for Redirector {
    fn intercept_post(&self, http: &Client, _url: &Url) -> Option<RequestBuilder> {
        Some(http.post(self.target.clone()))
    }

    fn intercept_multipart(
        &self,
        http: &Client,
        method: Method,
        _url: &Url,
    ) -> Option<RequestBuilder> {
        Some(http.request(method, self.target.clone()))
    }
}

#[tokio::test]
async fn intercepted_post_shell_replaces_target() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default()).with_interceptor(Arc::new(Redirector {
        target: base.join("/unavailable").unwrap(),
    }));

    let response = client
        .post_form(base.join("/echo/form").unwrap(), HashMap::new(), None, None)
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
async fn intercepted_multipart_shell_replaces_target() {
    let base = start_server().await;
    let client = ApiClient::new(ApiConfig::default()).with_interceptor(Arc::new(Redirector {
        target: base.join("/maintenance").unwrap(),
    }));

    let status = client
        .post_multipart(
            base.join("/product/image").unwrap(),
            HashMap::new(),
            None,
            None,
            None,
        )
        .await
        .unwrap();
    assert!(matches!(status, UploadStatus::RawBody { .. }));
}
