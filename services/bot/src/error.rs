//! Custom error types for the webhook endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error type for the webhook HTTP boundary
///
/// A signature failure rejects the entire inbound batch before any event
/// is processed; per-event failures are logged inside the handler and do
/// not surface here.
#[derive(Error, Debug)]
pub enum BotError {
    /// Missing or mismatched X-Line-Signature header
    #[error("invalid signature")]
    InvalidSignature,

    /// The request body is not a valid webhook payload
    #[error("malformed webhook payload: {0}")]
    BadPayload(#[from] serde_json::Error),
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            BotError::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid signature"),
            BotError::BadPayload(_) => (StatusCode::BAD_REQUEST, "Malformed payload"),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_failure_maps_to_unauthorized() {
        let response = BotError::InvalidSignature.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn malformed_payload_maps_to_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let response = BotError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
