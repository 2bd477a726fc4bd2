use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use std::collections::HashMap;

use calcgate_types::models::RateScope;

use super::common::{admit, finish, RequestMeta};
use crate::error::{GatewayError, GatewayResult};
use crate::proxy::common::header_constants::GET_METHODS;
use crate::proxy::fallback::{parse_media_query, MediaFallback, MediaSuccess};
use crate::proxy::server::GatewayState;

type MediaQuery = Result<Query<HashMap<String, String>>, QueryRejection>;

/// GET /api/generate-image
pub async fn handle_generate_image(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    query: MediaQuery,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);
    let result = run(&state, &meta, RateScope::Image, &state.image, query).await;
    finish(&state, &meta, GET_METHODS, result)
}

/// GET /api/generate-video
pub async fn handle_generate_video(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    query: MediaQuery,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);
    let result = run(&state, &meta, RateScope::Video, &state.video, query).await;
    finish(&state, &meta, GET_METHODS, result)
}

async fn run(
    state: &GatewayState,
    meta: &RequestMeta,
    scope: RateScope,
    fallback: &MediaFallback,
    query: MediaQuery,
) -> GatewayResult<MediaSuccess> {
    admit(state, meta, scope)?;
    let Query(params) =
        query.map_err(|e| GatewayError::BadRequest(format!("Invalid query: {}", e.body_text())))?;
    let request = parse_media_query(fallback.kind(), &params)?;
    fallback.generate(&request, &meta.trace_id).await
}
