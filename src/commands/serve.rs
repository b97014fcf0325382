//! HTTP status service.
//!
//! A small axum app exposing a welcome route carrying the session id and a
//! health check, served until Ctrl-C.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use super::CommandContext;

/// State shared with the request handlers.
#[derive(Clone)]
struct ServeState {
    session_id: String,
}

/// Build the service router.
fn router(session_id: String) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(ServeState { session_id })
}

/// GET /, a welcome payload carrying the session id
async fn root_handler(State(state): State<ServeState>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the logbook status API",
        "sessionId": state.session_id,
    }))
}

/// GET /health
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Bind the listener and serve until Ctrl-C.
pub async fn run(ctx: &CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.serve_host.clone());
    let port = port.unwrap_or(ctx.config.serve_port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid bind address {host}:{port}"))?;

    let app = router(ctx.logger.session_id().to_string());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let bound = listener.local_addr()?;

    ctx.logger
        .info("serve:start", json!({ "addr": bound.to_string() }))?;
    println!("Serving on http://{bound} (Ctrl-C to stop)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
        .context("Server error")?;

    ctx.logger.info("serve:stop", Value::Null)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let app = router("test-session".to_string());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_route_carries_session_id() {
        let app = router("XYZ".to_string());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["sessionId"], "XYZ");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = router("s".to_string());

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
