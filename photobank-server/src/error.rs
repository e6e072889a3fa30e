use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use photobank_rag::AssistantError;
use serde_json::json;
use thiserror::Error;

const EMPTY_MESSAGE: &str = "Сообщение не может быть пустым";
const BAD_REQUEST: &str = "Некорректный запрос";
const TOO_LARGE: &str = "Слишком большой запрос";
const PROCESSING_FAILED: &str = "Произошла ошибка при обработке запроса";

/// Errors returned to HTTP clients as `{ "error": ..., "details"?: ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl ApiError {
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Assistant(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Assistant(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(details) => {
                tracing::warn!(details = %details, "rejected malformed request");
                json!({ "error": BAD_REQUEST, "details": details })
            }
            ApiError::PayloadTooLarge(details) => {
                tracing::warn!(details = %details, "rejected oversized request");
                json!({ "error": TOO_LARGE, "details": details })
            }
            ApiError::Assistant(AssistantError::EmptyMessage) => {
                json!({ "error": EMPTY_MESSAGE })
            }
            ApiError::Assistant(err) => {
                tracing::error!(error = %err, debug = ?err, "request failed");
                json!({ "error": PROCESSING_FAILED, "details": err.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
