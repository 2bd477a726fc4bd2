use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rand::Rng;
use std::collections::HashMap;

use crate::error::{GatewayError, GatewayResult};
use crate::proxy::common::header_constants::X_SERVED_MODEL;
use crate::proxy::upstream::{MediaClient, MediaKind, MediaRequest};

/// Accepted range for image width/height; anything else falls back to the provider default.
const DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 64..=2048;

/// Build a [`MediaRequest`] from raw query parameters.
///
/// A blank prompt is a client error. Unparsable or out-of-range dimensions
/// are dropped; a missing seed is replaced with a random one for images.
pub fn parse_media_query(kind: MediaKind, params: &HashMap<String, String>) -> GatewayResult<MediaRequest> {
    let prompt = params.get("prompt").map(|p| p.trim()).unwrap_or_default();
    if prompt.is_empty() {
        return Err(GatewayError::BadRequest("Missing 'prompt' parameter".to_string()));
    }

    let mut request = MediaRequest::new(prompt);
    if kind == MediaKind::Image {
        let dimension = |name: &str| {
            params
                .get(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| DIMENSION_RANGE.contains(v))
        };
        request.width = dimension("width");
        request.height = dimension("height");
        request.seed = Some(
            params
                .get("seed")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or_else(|| rand::thread_rng().gen()),
        );
    }
    Ok(request)
}

/// An accepted upstream media response, ready to be streamed to the caller.
pub struct MediaSuccess {
    pub model: String,
    content_type: HeaderValue,
    upstream: reqwest::Response,
}

impl IntoResponse for MediaSuccess {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from_stream(self.upstream.bytes_stream()));
        *response.status_mut() = StatusCode::OK;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, self.content_type);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        if let Ok(model) = HeaderValue::from_str(&self.model) {
            headers.insert(X_SERVED_MODEL, model);
        }
        response
    }
}

/// Sequential fallback across the fixed model list of one media kind.
pub struct MediaFallback {
    kind: MediaKind,
    client: MediaClient,
    models: Vec<String>,
}

impl MediaFallback {
    pub fn new(kind: MediaKind, client: MediaClient, models: Vec<String>) -> Self {
        Self { kind, client, models }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub async fn generate(&self, request: &MediaRequest, trace_id: &str) -> GatewayResult<MediaSuccess> {
        let label = self.kind.label();
        let prefix = self.kind.content_prefix();
        let mut errors: Vec<String> = Vec::with_capacity(self.models.len());

        tracing::info!(
            "[{}] {} request: prompt={:.50}, models={:?}",
            trace_id,
            label,
            request.prompt,
            self.models
        );

        for model in &self.models {
            let url = self.client.build_url(self.kind, request, model);
            let upstream = match self.client.fetch(url).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("[{}] {} model {} network error: {}", trace_id, label, model, e);
                    errors.push(format!("{}: network error: {}", model, e));
                    continue;
                },
            };

            let status = upstream.status();
            if !status.is_success() {
                tracing::warn!("[{}] {} model {} returned HTTP {}", trace_id, label, model, status);
                errors.push(format!("{}: HTTP {}", model, status.as_u16()));
                continue;
            }

            let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
            let matches_family = content_type
                .as_ref()
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with(prefix));
            let Some(content_type) = content_type.filter(|_| matches_family) else {
                let shown = content_type_label(upstream.headers().get(header::CONTENT_TYPE));
                tracing::warn!(
                    "[{}] {} model {} returned unexpected content-type {}",
                    trace_id,
                    label,
                    model,
                    shown
                );
                errors.push(format!("{}: unexpected content-type {}", model, shown));
                continue;
            };

            tracing::info!("[{}] {} served by {}", trace_id, label, model);
            return Ok(MediaSuccess { model: model.clone(), content_type, upstream });
        }

        tracing::error!("[{}] All {} models failed: {:?}", trace_id, label, errors);
        Err(GatewayError::MediaExhausted { media: label, details: errors })
    }
}

fn content_type_label(value: Option<&HeaderValue>) -> String {
    match value.and_then(|v| v.to_str().ok()) {
        Some(ct) => format!("'{}'", ct),
        None => "(none)".to_string(),
    }
}
