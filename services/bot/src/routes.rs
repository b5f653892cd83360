//! HTTP routes for the bot service

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::error;

use crate::error::BotError;
use crate::events::WebhookRequest;
use crate::handlers;
use crate::signature;
use crate::state::AppState;

/// Create the router for the bot service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "stockpile-bot"
    }))
}

/// LINE webhook endpoint
///
/// The signature is verified over the raw body before anything is parsed;
/// a mismatch rejects the whole batch with 401 and no event is processed.
/// Per-event handler failures are logged and do not fail the delivery.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, BotError> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|value| value.to_str().ok())
        .ok_or(BotError::InvalidSignature)?;

    if !signature::verify(&state.channel_secret, body.as_bytes(), signature) {
        return Err(BotError::InvalidSignature);
    }

    let request: WebhookRequest = serde_json::from_str(&body)?;

    for event in request.events {
        if let Err(e) = handlers::handle_event(&state, event).await {
            error!("Failed to handle webhook event: {:#}", e);
        }
    }

    Ok(Json(json!({ "message": "OK" })))
}
