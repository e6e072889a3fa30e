use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use photobank_rag::SupportAssistant;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ApiError;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

pub fn router(assistant: Arc<SupportAssistant>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/knowledge/reload", post(reload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(assistant)
}

async fn chat(
    State(assistant): State<Arc<SupportAssistant>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::from_json_rejection)?;
    let response = assistant.answer(&request.message).await?;
    Ok(Json(ChatResponse { response }))
}

async fn reload(State(assistant): State<Arc<SupportAssistant>>) -> Result<Json<Value>, ApiError> {
    let chunks = assistant.reload().await?;
    Ok(Json(json!({ "chunks": chunks })))
}

async fn health(State(assistant): State<Arc<SupportAssistant>>) -> Json<Value> {
    let chunks = assistant.knowledge().len().await;
    Json(json!({ "status": "ok", "chunks": chunks }))
}
