//! HTTP gateway exposing the routing engine over REST.

pub mod api;

use anyhow::{Context, Result};
use axum::routing::{delete, get, post};
use axum::Router as AxumRouter;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::router::Router;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<dyn Router>,
}

/// Build the route table with body-limit and timeout layers applied.
pub fn build_router(state: AppState, config: &GatewayConfig) -> AxumRouter {
    AxumRouter::new()
        .route("/api/session", post(api::handle_session_start))
        .route("/api/query", post(api::handle_query))
        .route("/api/status", get(api::handle_status))
        .route("/api/sessions/{id}/stats", get(api::handle_session_stats))
        .route("/api/sessions/{id}", delete(api::handle_session_clear))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(config: &GatewayConfig, router: Arc<dyn Router>) -> Result<()> {
    let app = build_router(AppState { router }, config);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind gateway on {addr}"))?;

    info!(%addr, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received, stopping gateway");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    fn app() -> AxumRouter {
        let engine = crate::router::create_engine(&crate::config::Config::default()).unwrap();
        build_router(
            AppState {
                router: Arc::new(engine),
            },
            &GatewayConfig::default(),
        )
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn query_endpoint_routes_to_a_specialist() {
        let app = app();
        let response = app
            .oneshot(json_post(
                "/api/query",
                r#"{"message":"debug my docker build","sessionId":"s1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["handlingAgentId"], "technical-specialist");
        assert_eq!(body["contextMaintained"], true);
    }

    #[tokio::test]
    async fn empty_message_is_a_bad_request() {
        let app = app();
        let response = app
            .oneshot(json_post(
                "/api/query",
                r#"{"message":"  ","sessionId":"s1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("validation"));
    }

    #[tokio::test]
    async fn session_start_returns_a_session_id() {
        let app = app();
        let response = app
            .oneshot(json_post("/api/session", r#"{"message":"hello there"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(!body["sessionId"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_lists_specialists() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["specialists"].as_array().unwrap().len(), 6);
        assert_eq!(body["fallbackSpecialist"], "general-assistant");
    }

    #[tokio::test]
    async fn stats_for_unknown_session_is_not_found() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sessions/ghost/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_session_existed() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/sessions/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cleared"], false);
    }
}
