//! HTTP request handlers

use super::types::{ChatData, ChatEnvelope, ChatRequest, HealthResponse};
use super::AppState;
use crate::llm::{LlmError, LlmRequest};
use crate::prompt::build_prompt;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Substituted when the provider returns no usable content
pub const EMPTY_COMPLETION_FALLBACK: &str = "Sorry, I could not generate a response.";

const PROVIDER_FAILURE_MESSAGE: &str = "An error occurred while processing your request";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat relay
// ============================================================

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatEnvelope>, AppError> {
    let request_id = uuid::Uuid::new_v4();

    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(%request_id, error = %rejection.body_text(), "Rejected malformed chat request");
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let message = req
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            tracing::warn!(%request_id, "Rejected chat request without a message");
            AppError::BadRequest("Message is required".to_string())
        })?;

    tracing::info!(
        %request_id,
        history_len = req.conversation_history.len(),
        message_len = message.len(),
        "Relaying chat request"
    );

    let messages = build_prompt(&req.conversation_history, &message);
    let completion = state
        .llm
        .complete(&LlmRequest::new(messages, state.sampling))
        .await
        .map_err(|e| {
            tracing::error!(%request_id, error = %e, kind = ?e.kind, "Chat relay failed");
            AppError::Provider(e)
        })?;

    if completion.text_or("").is_empty() {
        tracing::warn!(%request_id, model = %completion.model, "Provider returned no content");
    }

    Ok(Json(ChatEnvelope::success(ChatData {
        response: completion.text_or(EMPTY_COMPLETION_FALLBACK).to_string(),
        model: completion.model,
        usage: completion.usage,
    })))
}

// ============================================================
// Health / Version
// ============================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.llm.model_id().to_string(),
        provider_configured: state.llm.is_configured(),
    })
}

async fn get_version() -> &'static str {
    concat!("relay-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Provider(LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ChatEnvelope::client_error(msg)),
            AppError::Provider(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatEnvelope::server_error(PROVIDER_FAILURE_MESSAGE, e.message),
            ),
        };

        (status, Json(body)).into_response()
    }
}
