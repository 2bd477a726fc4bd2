use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let gateway_router = state.build_gateway_router();

    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .route("/status", get(status_info));

    public_routes
        .with_state(state)
        .merge(gateway_router)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

async fn status_info(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    axum::Json(serde_json::json!({
        "status": "ok",
        "uptime_secs": state.uptime_secs(),
        "rate_limit_entries": state.rate_limit_entries(),
        "allowed_origins": config.allowed_origins.len(),
        "text_configured": config.text.api_key.is_some(),
        "feedback_configured": config.feedback.access_key.is_some(),
        "text_models": config.text.models,
        "image_models": config.image.models,
        "video_models": config.video.models,
    }))
}
