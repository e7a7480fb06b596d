use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::middleware;
use axum::response::IntoResponse;
use axum::{Json, Router, extract::Request, response::Response};
use http::{HeaderName, HeaderValue, StatusCode, header};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::public::ErrorResponse;
use super::routes;
use crate::api::state::{AppState, SharedState};
use crate::core::AppConfig;

const API_HEADERS: [(HeaderName, &str); 7] = [
    (header::CONTENT_TYPE, "application/json"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

async fn set_static_cache_control(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

/// Applied to every API response, including errors and panics
async fn set_api_headers(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in API_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

/// Wraps API routes so that every response, including errors and
/// panics, is JSON with the security headers set
fn with_api_layers(router: Router<SharedState>) -> Router<SharedState> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(set_api_headers))
}

pub fn app(shared_state: SharedState) -> Router {
    let cors = CorsLayer::permissive();
    let static_dir = shared_state.config.static_dir.clone();

    Router::new()
        // API routes
        .nest("/api", with_api_layers(routes::router()))
        // Static server of the web client
        .fallback_service(
            ServiceBuilder::new()
                .layer(middleware::from_fn(set_static_cache_control))
                .service(
                    ServeDir::new(static_dir)
                        .precompressed_br()
                        .precompressed_gzip(),
                ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.providers.is_empty() {
        tracing::warn!("No provider credentials configured, every reply will be offline");
    }
    for provider in config.providers.iter() {
        tracing::info!("Provider enabled: {} ({})", provider.name, provider.endpoint);
    }

    let app_state = AppState::from_config(config)?;
    let app = app(Arc::new(app_state));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::body::Body;
    use axum::routing::get;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::public::ApiError;

    async fn failing_handler() -> Result<Json<ErrorResponse>, ApiError> {
        Err(anyhow!("connection to upstream reset").into())
    }

    async fn panicking_handler() -> &'static str {
        panic!("handler blew up")
    }

    fn test_router() -> Router {
        let state = AppState::from_config(AppConfig::from_lookup(|_| None)).unwrap();
        let api = Router::new()
            .route("/fail", get(failing_handler))
            .route("/panic", get(panicking_handler));

        Router::new()
            .nest("/api", with_api_layers(api))
            .with_state(Arc::new(state))
    }

    async fn assert_internal_error(uri: &str) {
        let response = test_router()
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        for (name, value) in API_HEADERS {
            assert_eq!(response.headers().get(&name).unwrap(), value, "header {}", name);
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_internal_error_is_hidden() {
        assert_internal_error("/api/fail").await;
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        assert_internal_error("/api/panic").await;
    }
}
