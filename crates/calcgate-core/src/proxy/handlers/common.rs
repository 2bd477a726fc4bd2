use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;

use calcgate_types::models::RateScope;

use crate::error::{GatewayError, GatewayResult};
use crate::proxy::middleware::extract_client_id;
use crate::proxy::server::GatewayState;

/// `Origin` header as text; `None` only when the header is missing.
///
/// Bytes outside visible ASCII are decoded lossily so the value still reaches
/// the origin guard, which rejects it.
pub fn origin_of(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers.get(header::ORIGIN).map(|v| match v.to_str() {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => String::from_utf8_lossy(v.as_bytes()),
    })
}

/// Per-request facts needed for admission and logging.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub origin: Option<String>,
    pub client_id: String,
    pub trace_id: String,
}

impl RequestMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let trace_id = uuid::Uuid::new_v4().simple().to_string();
        Self {
            origin: origin_of(headers).map(Cow::into_owned),
            client_id: extract_client_id(headers),
            trace_id: trace_id.chars().take(8).collect(),
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// Origin check, then the scope's rate limit. Runs before any upstream call.
pub fn admit(state: &GatewayState, meta: &RequestMeta, scope: RateScope) -> GatewayResult<()> {
    state.origin_guard.admit(meta.origin())?;

    let decision =
        state.rate_limiter.check_scope(&meta.client_id, scope, state.rate_limits.rule(scope));
    if !decision.allowed {
        tracing::warn!(
            "[{}] {} request from {} rate limited for {}s",
            meta.trace_id,
            scope,
            meta.client_id,
            decision.retry_after_secs
        );
        return Err(GatewayError::RateLimited { retry_after_secs: decision.retry_after_secs });
    }
    Ok(())
}

/// Turn a handler result into a response carrying the CORS header set.
pub fn finish<T: IntoResponse>(
    state: &GatewayState,
    meta: &RequestMeta,
    allowed_methods: &'static str,
    result: GatewayResult<T>,
) -> Response {
    let mut response = match result {
        Ok(body) => body.into_response(),
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!("[{}] Request failed: {}", meta.trace_id, err);
            } else {
                tracing::debug!("[{}] Request rejected: {}", meta.trace_id, err);
            }
            err.into_response()
        },
    };
    let cors = state.origin_guard.build_cors_headers(meta.origin(), allowed_methods, &[]);
    let headers = response.headers_mut();
    for (name, value) in &cors {
        headers.insert(name.clone(), value.clone());
    }
    response
}

/// Header value for a model id, skipping ids that are not valid header text.
pub fn model_header(model: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(model).ok()
}
