//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body, http::Request, http::Response};
use tower::util::ServiceExt;

use network_gpt::api::AppState;
use network_gpt::api::app;
use network_gpt::core::AppConfig;
use network_gpt::providers::{ProviderConfig, ProviderKind};

/// Configuration with no environment, no providers and a static
/// directory that doesn't exist
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::from_lookup(|_| None);
    config.static_dir = String::from("./test-static-missing");
    config
}

/// Creates a test application router from `config`
pub fn test_app_with(config: AppConfig) -> Router {
    let app_state = AppState::from_config(config).expect("Failed to build app state");
    app(Arc::new(app_state))
}

/// Creates a test application router that tries `providers` in order
pub fn test_app(providers: Vec<ProviderConfig>) -> Router {
    let mut config = test_config();
    config.providers = providers;
    test_app_with(config)
}

/// Provider pointing at a mock server's completions path
pub fn mock_provider(kind: ProviderKind, url: &str) -> ProviderConfig {
    ProviderConfig::new(kind, "test-key").endpoint(&format!("{}/v1/chat/completions", url))
}

pub async fn post_json(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body is not JSON")
}
