use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A product document as served by the remote API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub product_name: String,
    pub brands: Option<String>,
}

pub type Db = Arc<HashMap<String, Product>>;

/// Build the test router, seeded with a couple of products.
///
/// Besides the product route, the router exposes echo and failure-mode
/// endpoints used by the client integration tests: header echo, form echo,
/// multipart accept, a maintenance page answering 200 with HTML, and a 503.
pub fn app() -> Router {
    let db: Db = Arc::new(HashMap::from([
        (
            "4000000000001".to_string(),
            Product {
                code: "4000000000001".to_string(),
                product_name: "Hazelnut spread".to_string(),
                brands: Some("Acme".to_string()),
            },
        ),
        (
            "4000000000002".to_string(),
            Product {
                code: "4000000000002".to_string(),
                product_name: "Sparkling water".to_string(),
                brands: None,
            },
        ),
    ]));
    Router::new()
        .route("/product/{barcode}", get(get_product))
        .route("/echo/headers", get(echo_headers))
        .route("/echo/form", post(echo_form))
        .route("/product/image", post(upload_image))
        .route("/maintenance", get(maintenance).post(maintenance))
        .route("/unavailable", get(unavailable).post(unavailable))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_product(
    State(db): State<Db>,
    Path(barcode): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    db.get(&barcode)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Echo selected request headers back as a JSON map (lowercased names).
async fn echo_headers(headers: HeaderMap) -> Json<HashMap<String, String>> {
    let echoed = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(echoed)
}

/// Echo received form-urlencoded fields back as a JSON map.
async fn echo_form(Form(fields): Form<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(fields)
}

/// Accept a multipart upload and answer with the API's status document.
///
/// The `body` field summarizes what arrived — `name=value` for text fields,
/// `name=filename:bytelen` for file parts — so tests can assert on part
/// names, filenames, and sizes through the decoded status alone.
async fn upload_image(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let mut fields = Vec::new();
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(ToString::to_string) {
            Some(filename) => {
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                files.push(format!("{name}={filename}:{}", bytes.len()));
            }
            None => {
                let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                fields.push(format!("{name}={value}"));
            }
        }
    }
    fields.sort();
    files.sort();
    Ok(Json(json!({
        "status": 1,
        "body": format!("fields {}; files {}", fields.join(","), files.join(",")),
    })))
}

/// A deployment under maintenance answers 200 with an HTML page.
async fn maintenance() -> Html<&'static str> {
    Html("<html>Maintenance</html>")
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}
