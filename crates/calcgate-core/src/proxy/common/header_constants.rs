//! Standard HTTP header names used across gateway handlers.

use axum::http::HeaderName;

/// Header naming the upstream model that served the request.
pub const X_SERVED_MODEL: HeaderName = HeaderName::from_static("x-served-model");

/// Allowed methods for the text and feedback endpoints.
pub const POST_METHODS: &str = "POST, OPTIONS";

/// Allowed methods for the media endpoints.
pub const GET_METHODS: &str = "GET, OPTIONS";
