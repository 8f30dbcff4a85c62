#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use zfarming_api::config::ServerConfig;
use zfarming_api::router::build_app_router;
use zfarming_api::state::AppState;
use zfarming_core::catalog::CatalogProvider;
use zfarming_core::identification::{
    IdentificationProvider, IdentificationSuggestion, UpstreamError,
};
use zfarming_db::catalog::PgCatalog;
use zfarming_plantid::PlantIdConfig;

/// Boundary used by [`post_multipart`].
const BOUNDARY: &str = "zfarming-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a 4 KiB upload limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 4096,
        plant_id: PlantIdConfig::default(),
    }
}

/// Identification provider returning a fixed answer.
pub enum StubIdentifier {
    Suggestions(Vec<IdentificationSuggestion>),
    Unavailable,
}

#[async_trait]
impl IdentificationProvider for StubIdentifier {
    async fn fetch_suggestions(
        &self,
        _image: &[u8],
    ) -> Result<Vec<IdentificationSuggestion>, UpstreamError> {
        match self {
            StubIdentifier::Suggestions(s) => Ok(s.clone()),
            StubIdentifier::Unavailable => Err(UpstreamError::Request(
                "connection refused".to_string(),
            )),
        }
    }
}

/// Full application router backed by the seeded database and an unavailable
/// identification provider (every scan falls back to mock results).
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, StubIdentifier::Unavailable)
}

/// Full application router with a chosen identification provider.
pub fn build_test_app_with(pool: PgPool, identifier: StubIdentifier) -> Router {
    build_test_app_from(pool, test_config(), Arc::new(identifier))
}

/// Full application router from an explicit config and provider.
pub fn build_test_app_from(
    pool: PgPool,
    config: ServerConfig,
    identifier: Arc<dyn IdentificationProvider>,
) -> Router {
    let catalog: Arc<dyn CatalogProvider> = Arc::new(PgCatalog::new(pool.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog,
        identifier,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// POST a single-file multipart form.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    data: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
