//! HTTP surface for the Completion Gateway
//!
//! Exposes `POST /api/chat` with the request body
//! `{ "messages": [{"role", "content"}, ...] }`. Success responds
//! `{ "message": string }`; failure responds `{ "error": string }` with
//! 401 when the upstream credential is missing and 500 for any other
//! upstream failure.

use crate::error::{KaiwaError, Result};
use crate::gateway::CompletionGateway;
use crate::providers::ChatMessage;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inbound completion request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Prior conversation turns, oldest first
    pub messages: Vec<ChatMessage>,
}

/// Successful completion response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply text
    pub message: String,
}

/// Failure response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Build the completion endpoint router
pub fn routes(gateway: Arc<CompletionGateway>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(gateway)
}

/// Bind and run the completion endpoint
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails
pub async fn serve(bind: &str, gateway: Arc<CompletionGateway>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Completion endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, routes(gateway)).await?;
    Ok(())
}

/// Handle a completion request
async fn chat(
    State(gateway): State<Arc<CompletionGateway>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match gateway.complete(&request.messages).await {
        Ok(message) => (StatusCode::OK, Json(ChatResponse { message })).into_response(),
        Err(err) => {
            tracing::warn!("Completion request failed: {:#}", err);
            let (status, error) = match err.downcast_ref::<KaiwaError>() {
                Some(KaiwaError::MissingCredentials(_)) => (
                    StatusCode::UNAUTHORIZED,
                    "Missing API credential".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to get completion from provider".to_string(),
                ),
            };
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}
