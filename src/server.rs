//! ==============================================================================
//! server.rs - http front
//! ==============================================================================
//!
//! routes:
//!     POST /data   ingest a json payload, always "Data received and processed"
//!     GET  /       monitoring page (render.rs)
//!     GET  /api    current reading as json
//!
//! malformed bodies never reach the handlers, axum's Json extractor answers
//! them with a 4xx.
//!
//! ==============================================================================

use crate::domain::CurrentReading;
use crate::render;
use crate::store::TelemetryStore;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
    response::{Html, Json},
    extract::State,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const INGEST_ACK: &str = "Data received and processed";

pub fn router(store: TelemetryStore) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api", get(api_handler))
        .route("/data", post(ingest_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// serve until ctrl-c, then drain in-flight requests
pub async fn run(store: TelemetryStore, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn ingest_handler(
    State(store): State<TelemetryStore>,
    Json(payload): Json<serde_json::Value>,
) -> &'static str {
    store.ingest(&payload).await;
    INGEST_ACK
}

async fn dashboard_handler(State(store): State<TelemetryStore>) -> Html<String> {
    let reading = store.snapshot().await;
    Html(render::view(&reading))
}

/// json api endpoint for programmatic access
async fn api_handler(State(store): State<TelemetryStore>) -> Json<CurrentReading> {
    Json(store.snapshot().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn post_data(store: &TelemetryStore, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/data")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(store.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_page(store: &TelemetryStore, uri: &str) -> (StatusCode, String, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router(store.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_initial_page() {
        let store = TelemetryStore::new();
        let (status, content_type, body) = get_page(&store, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        for label in ["Temperature", "Moisture", "Disease Name", "Probability"] {
            assert!(body.contains(&format!("{}: N/A", label)), "missing {}", label);
        }
    }

    #[tokio::test]
    async fn test_sensor_payload() {
        let store = TelemetryStore::new();

        let (status, body) = post_data(&store, r#"{"temp": 22.5, "moisture": 40}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INGEST_ACK);

        let (_, _, page) = get_page(&store, "/").await;
        assert!(page.contains("Temperature: 22.5"));
        assert!(page.contains("Moisture: 40"));
        assert!(page.contains("Disease Name: N/A"));
    }

    #[tokio::test]
    async fn test_disease_payload_keeps_sensor_data() {
        let store = TelemetryStore::new();
        post_data(&store, r#"{"temp": 22.5, "moisture": 40}"#).await;

        let (status, _) = post_data(&store, r#"{"disease": "blight", "probability": 0.87}"#).await;
        assert_eq!(status, StatusCode::OK);

        let (_, _, page) = get_page(&store, "/").await;
        assert!(page.contains("Disease Name: blight"));
        assert!(page.contains("Probability: 0.87"));
        assert!(page.contains("Temperature: 22.5"));
        assert!(page.contains("Moisture: 40"));
    }

    #[tokio::test]
    async fn test_incomplete_group_changes_nothing() {
        let store = TelemetryStore::new();
        post_data(&store, r#"{"temp": 22.5, "moisture": 40}"#).await;
        let (_, _, before) = get_page(&store, "/").await;

        let (status, body) = post_data(&store, r#"{"temp": 30}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INGEST_ACK);

        let (_, _, after) = get_page(&store, "/").await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_empty_object_still_acknowledged() {
        let store = TelemetryStore::new();

        let (status, body) = post_data(&store, "{}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INGEST_ACK);

        let (_, _, page) = get_page(&store, "/").await;
        assert!(page.contains("Temperature: N/A"));
    }

    #[tokio::test]
    async fn test_non_object_body_acknowledged() {
        let store = TelemetryStore::new();
        let (status, _) = post_data(&store, "[1, 2, 3]").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.snapshot().await, CurrentReading::default());
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let store = TelemetryStore::new();
        let (status, _) = post_data(&store, "{not json").await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_page_is_idempotent() {
        let store = TelemetryStore::new();
        post_data(&store, r#"{"disease": "mildew", "probability": 0.4}"#).await;

        let (_, _, first) = get_page(&store, "/").await;
        let (_, _, second) = get_page(&store, "/").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_api_snapshot() {
        let store = TelemetryStore::new();
        post_data(&store, r#"{"temp": 21, "moisture": 35}"#).await;

        let (status, content_type, body) = get_page(&store, "/api").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("application/json"));

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "temperature": 21,
                "moisture": 35,
                "disease": null,
                "probability": null
            })
        );
    }
}
