// Origin guard: allow-list check and CORS header construction
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::GatewayError;

/// Request headers browsers may send to the API.
pub const ALLOWED_REQUEST_HEADERS: &str = "Content-Type";

/// Cache lifetime for successful preflight answers.
const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;

/// Decides which browser origins may call the API.
///
/// Origins are compared as exact strings after trimming a trailing slash
/// from configured entries. The set is fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: Vec<String>,
}

impl OriginGuard {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for origin in origins {
            let origin = origin.as_ref().trim().trim_end_matches('/');
            if !origin.is_empty() && !allowed.iter().any(|o| o == origin) {
                allowed.push(origin.to_string());
            }
        }
        Self { allowed }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed
    }

    /// Absent or empty origins (native apps, server-to-server) are allowed.
    /// A present origin must be visible ASCII and listed.
    pub fn is_origin_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(o) if o.is_empty() => true,
            Some(o) => o.bytes().all(|b| b.is_ascii_graphic()) && self.allowed.iter().any(|a| a == o),
        }
    }

    /// Build the CORS header set for a response.
    ///
    /// The origin is echoed only when present and allowed; otherwise the
    /// browser rejects the response on its own.
    pub fn build_cors_headers(
        &self,
        origin: Option<&str>,
        allowed_methods: &'static str,
        extra: &[(HeaderName, HeaderValue)],
    ) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(allowed_methods),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_REQUEST_HEADERS),
        );
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));

        if let Some(o) = origin.filter(|o| !o.is_empty()) {
            if self.is_origin_allowed(Some(o)) {
                if let Ok(value) = HeaderValue::from_str(o) {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                }
            }
        }

        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// Answer an OPTIONS request: 403 with no body for a disallowed origin,
    /// 204 with the CORS header set otherwise.
    pub fn preflight(&self, origin: Option<&str>, allowed_methods: &'static str) -> Response {
        if !self.is_origin_allowed(origin) {
            tracing::warn!("Preflight rejected for origin {:?}", origin);
            return StatusCode::FORBIDDEN.into_response();
        }
        let max_age = [(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(PREFLIGHT_MAX_AGE_SECS))];
        let headers = self.build_cors_headers(origin, allowed_methods, &max_age);
        (StatusCode::NO_CONTENT, headers).into_response()
    }

    /// Admission check run before rate limiting and before any upstream call.
    pub fn admit(&self, origin: Option<&str>) -> Result<(), GatewayError> {
        if self.is_origin_allowed(origin) {
            return Ok(());
        }
        let origin = origin.unwrap_or_default().to_string();
        tracing::warn!("Rejected request from disallowed origin {}", origin);
        Err(GatewayError::OriginRejected(origin))
    }
}
