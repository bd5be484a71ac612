use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cinelog_api::config::{ServerConfig, StorageBackend};
use cinelog_api::router::build_app_router;
use cinelog_api::services::{FilmService, UserService};
use cinelog_api::state::AppState;
use cinelog_api::storage::{FilmStore, InMemoryFilmStore, InMemoryUserStore, UserStore};

/// Build a test `ServerConfig` for the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
    }
}

/// Build the full application router on fresh in-memory stores.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let films: Arc<dyn FilmStore> = Arc::new(InMemoryFilmStore::new());
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    let state = AppState {
        films: FilmService::new(Arc::clone(&films), Arc::clone(&users)),
        users: UserService::new(Arc::clone(&users)),
        pool: None,
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

/// Fire a single request at the app and return the raw response.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    request(app, Method::PUT, uri, Some(body)).await
}

pub async fn put(app: Router, uri: &str) -> Response {
    request(app, Method::PUT, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    request(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
