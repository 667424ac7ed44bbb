use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderMap, StatusCode},
    routing::get,
    BoxError, Json, Router,
};
use jsonapi_kit::api::filters::REQUEST_ID_HEADER;
use jsonapi_kit::api::{error_response, internal_error};
use jsonapi_kit::ErrorDocumentResponse;
use runtime::ServerConfig;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};
use users::Service;

use crate::request_id::{self, MakeReqId};
use crate::shutdown::wait_for_shutdown;

const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Application routes wrapped in the HTTP middleware stack.
pub fn build_router(config: &ServerConfig, users: Arc<Service>) -> Router {
    let mut router = Router::new().route("/health", get(health_check));
    router = users::api::rest::routes::register_routes(router, users);

    // Layers added later wrap the earlier ones, so a request passes through
    // BodyLimit -> CORS -> Timeout -> SetRequestId -> PropagateRequestId -> Trace
    router = router.layer(request_id::create_trace_layer());

    // Copy x-request-id from the request onto the response
    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // Generate x-request-id when missing
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeReqId));

    // Per-request timeout (disabled by 0)
    if config.timeout_sec > 0 {
        router = with_timeout(router, Duration::from_secs(config.timeout_sec));
    }

    // CORS layer (if enabled)
    if config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    // Body limit layer
    router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

/// Errors raised by middleware (only the timeout today) as error documents.
async fn handle_middleware_error(headers: HeaderMap, err: BoxError) -> ErrorDocumentResponse {
    let response = if err.is::<tower::timeout::error::Elapsed>() {
        error_response(StatusCode::REQUEST_TIMEOUT, "Request took too long")
    } else {
        internal_error(format!("Unhandled internal error: {err}"))
    };
    match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(id) => response.with_id(id),
        None => response,
    }
}

fn with_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(timeout),
    )
}

/// Resolves when `signal` does. A signal listener that failed to register
/// never resolves, so the server keeps running instead of stopping at once.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signals: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("HTTP server shutting down gracefully");
}

/// Bind `host:port` and serve `router` until a shutdown signal arrives.
pub async fn serve(config: &ServerConfig, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(wait_for_shutdown()))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    #[tokio::test]
    async fn timeout_renders_error_document() {
        let router = with_timeout(
            Router::new().route("/slow", get(slow)),
            Duration::from_millis(20),
        );

        let resp = router
            .oneshot(
                Request::get("/slow")
                    .header(REQUEST_ID_HEADER, "req-9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            jsonapi_kit::APPLICATION_JSON_API
        );
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["status"], "408");
        assert_eq!(body["errors"][0]["id"], "req-9");
    }

    #[tokio::test]
    async fn fast_handlers_are_not_affected_by_timeout() {
        let router = with_timeout(
            Router::new().route("/health", get(health_check)),
            Duration::from_secs(5),
        );

        let resp = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_signal_registration_keeps_server_running() {
        let pending = tokio::time::timeout(
            Duration::from_millis(50),
            shutdown_signal(async { Err(anyhow::anyhow!("no signal handlers")) }),
        )
        .await;

        assert!(pending.is_err(), "shutdown must not resolve on a failed listener");
    }

    #[tokio::test]
    async fn received_signal_triggers_shutdown() {
        let done = tokio::time::timeout(
            Duration::from_millis(50),
            shutdown_signal(async { Ok(()) }),
        )
        .await;

        assert!(done.is_ok());
    }
}
