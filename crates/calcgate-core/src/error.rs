//! Request-path error type for the gateway.
//!
//! Every failure a handler can produce is a [`GatewayError`]; its
//! `IntoResponse` impl is the only place that decides status codes and JSON
//! error bodies.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Generic message returned when the feedback relay fails.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to submit feedback. Please try again later.";

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GatewayError {
    /// Malformed body or missing required field.
    #[error("{0}")]
    BadRequest(String),

    /// Browser origin not in the allow-list.
    #[error("Origin not allowed: {0}")]
    OriginRejected(String),

    /// Fixed-window limit exceeded for this client and scope.
    #[error("Too many requests. Please try again in {retry_after_secs} seconds.")]
    RateLimited { retry_after_secs: u64 },

    /// A server-side credential is not configured.
    #[error("{0} is not configured on the server")]
    MissingCredential(&'static str),

    /// Terminal upstream failure, surfaced with the upstream's own status.
    #[error("{message}")]
    Upstream { status: u16, message: String, model: Option<String> },

    /// Every text candidate failed with a retryable error.
    #[error("{message}")]
    Exhausted { message: String },

    /// Every media model failed; `details` has one entry per attempt.
    #[error("All {media} generation models failed")]
    MediaExhausted { media: &'static str, details: Vec<String> },

    /// Form relay transport failure or explicit failure flag.
    #[error("{}", RELAY_FAILURE_MESSAGE)]
    RelayFailed,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::OriginRejected(_) => StatusCode::FORBIDDEN,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            },
            GatewayError::Exhausted { .. } | GatewayError::MediaExhausted { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            },
            GatewayError::RelayFailed => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            GatewayError::RateLimited { retry_after_secs } => {
                let mut response = (status, Json(json!({ "error": message }))).into_response();
                response.headers_mut().insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            },
            GatewayError::Upstream { model: Some(model), .. } => {
                (status, Json(json!({ "error": message, "model": model }))).into_response()
            },
            GatewayError::MediaExhausted { details, .. } => {
                (status, Json(json!({ "error": message, "details": details }))).into_response()
            },
            _ => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}

/// Result type alias for request handling.
pub type GatewayResult<T> = Result<T, GatewayError>;
