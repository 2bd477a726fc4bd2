use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;

use calcgate_types::models::RateScope;
use calcgate_types::protocol::TextGenerationRequest;

use super::common::{admit, finish, model_header, RequestMeta};
use crate::error::GatewayError;
use crate::proxy::common::header_constants::{POST_METHODS, X_SERVED_MODEL};
use crate::proxy::server::GatewayState;

/// POST /api/generate-text
pub async fn handle_generate_text(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Json<TextGenerationRequest>, JsonRejection>,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);

    let result = async {
        admit(&state, &meta, RateScope::Text)?;
        state.text.ensure_configured()?;
        let Json(request) = body.map_err(|e| {
            GatewayError::BadRequest(format!("Invalid JSON body: {}", e.body_text()))
        })?;
        let generated = state.text.generate(&request, &meta.trace_id).await?;

        let mut response = Json(&generated).into_response();
        if let Some(value) = model_header(&generated.model) {
            response.headers_mut().insert(X_SERVED_MODEL, value);
        }
        Ok::<Response, GatewayError>(response)
    }
    .await;

    finish(&state, &meta, POST_METHODS, result)
}
