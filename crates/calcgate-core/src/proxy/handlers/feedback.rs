use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use calcgate_types::models::RateScope;

use super::common::{admit, finish, RequestMeta};
use crate::error::GatewayError;
use crate::proxy::common::header_constants::POST_METHODS;
use crate::proxy::server::GatewayState;

/// POST /api/feedback
pub async fn handle_feedback(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);

    let result = async {
        admit(&state, &meta, RateScope::Feedback)?;
        let Json(body) = body.map_err(|e| {
            GatewayError::BadRequest(format!("Invalid JSON body: {}", e.body_text()))
        })?;
        state.feedback.submit(&body, &meta.trace_id).await?;
        Ok::<_, GatewayError>(Json(json!({ "ok": true })))
    }
    .await;

    finish(&state, &meta, POST_METHODS, result)
}
