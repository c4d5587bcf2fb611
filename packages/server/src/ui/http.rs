//! Admin HTTP API: read-only views of the chat state.

use std::{io, sync::Arc};

use axum::{Json, Router, extract::State, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::dto::http::{HistoryDto, StatusDto},
    usecase::ChatService,
};

pub fn router(service: Arc<ChatService>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/status", get(get_status))
        .route("/api/history", get(get_history))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the admin API until `shutdown` is cancelled
pub async fn serve(
    listener: TcpListener,
    service: Arc<ChatService>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connected users, their connections and history fill
pub async fn get_status(State(service): State<Arc<ChatService>>) -> Json<StatusDto> {
    Json(service.snapshot().await.into())
}

/// Broadcast history, oldest first
pub async fn get_history(State(service): State<Arc<ChatService>>) -> Json<HistoryDto> {
    Json(service.snapshot().await.into())
}
