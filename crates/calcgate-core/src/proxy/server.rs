use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use calcgate_types::models::{GatewayConfig, RateLimitConfig};

use crate::proxy::feedback::FeedbackRelay;
use crate::proxy::fallback::{MediaFallback, TextFallback};
use crate::proxy::middleware::{OriginGuard, RateLimiter};
use crate::proxy::retry::PatternClassifier;
use crate::proxy::upstream::{FormRelayClient, HttpTextProvider, MediaClient, MediaKind};

/// Request bodies larger than this are rejected before reaching a handler.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Shared state for the gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    pub origin_guard: Arc<OriginGuard>,
    pub rate_limiter: Arc<RateLimiter>,
    pub rate_limits: RateLimitConfig,
    pub text: Arc<TextFallback>,
    pub image: Arc<MediaFallback>,
    pub video: Arc<MediaFallback>,
    pub feedback: Arc<FeedbackRelay>,
}

impl GatewayState {
    /// Wire every component from a validated config.
    ///
    /// The limiter is passed in so callers can share or inspect it.
    pub fn from_config(
        config: &GatewayConfig,
        http_client: reqwest::Client,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self, String> {
        let provider = HttpTextProvider::new(
            http_client.clone(),
            &config.text.base_url,
            config.text.api_key.clone(),
            Duration::from_secs(config.text.request_timeout_secs),
        );
        let text = TextFallback::new(
            Arc::new(provider),
            Arc::new(PatternClassifier::new()),
            &config.text,
        );

        let image_client =
            MediaClient::new(http_client.clone(), &config.image.base_url, config.image.token.clone())?;
        let video_client =
            MediaClient::new(http_client.clone(), &config.video.base_url, config.video.token.clone())?;

        let relay = FeedbackRelay::new(
            FormRelayClient::new(http_client, config.feedback.endpoint.clone()),
            config.feedback.access_key.clone(),
            config.feedback.from_name.clone(),
        );

        Ok(Self {
            origin_guard: Arc::new(OriginGuard::new(&config.allowed_origins)),
            rate_limiter,
            rate_limits: config.rate_limits,
            text: Arc::new(text),
            image: Arc::new(MediaFallback::new(
                MediaKind::Image,
                image_client,
                config.image.models.clone(),
            )),
            video: Arc::new(MediaFallback::new(
                MediaKind::Video,
                video_client,
                config.video.models.clone(),
            )),
            feedback: Arc::new(relay),
        })
    }
}

/// Build the `/api/*` router. Request tracing is layered on by the caller.
pub fn build_gateway_router(state: GatewayState) -> Router<()> {
    use crate::proxy::handlers;

    Router::new()
        .route(
            "/api/generate-text",
            post(handlers::handle_generate_text).options(handlers::handle_post_preflight),
        )
        .route(
            "/api/generate-image",
            get(handlers::handle_generate_image).options(handlers::handle_get_preflight),
        )
        .route(
            "/api/generate-video",
            get(handlers::handle_generate_video).options(handlers::handle_get_preflight),
        )
        .route(
            "/api/feedback",
            post(handlers::handle_feedback).options(handlers::handle_post_preflight),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
