// Handlers module - HTTP entry points for the gateway endpoints

pub mod common;
pub mod feedback;
pub mod media;
pub mod text;

pub use feedback::handle_feedback;
pub use media::{handle_generate_image, handle_generate_video};
pub use text::handle_generate_text;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use crate::proxy::common::header_constants::{GET_METHODS, POST_METHODS};
use crate::proxy::server::GatewayState;

/// OPTIONS for the POST endpoints.
pub async fn handle_post_preflight(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    state.origin_guard.preflight(common::origin_of(&headers).as_deref(), POST_METHODS)
}

/// OPTIONS for the GET (media) endpoints.
pub async fn handle_get_preflight(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    state.origin_guard.preflight(common::origin_of(&headers).as_deref(), GET_METHODS)
}
