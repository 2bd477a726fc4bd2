use axum::http::HeaderMap;

/// Shared bucket for requests that carry no usable client address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Best-available client identifier for rate limiting.
///
/// Order: first `X-Forwarded-For` hop, `X-Real-IP`, `CF-Connecting-IP`.
pub fn extract_client_id(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| header("x-real-ip"))
        .or_else(|| header("cf-connecting-ip"))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_first_forwarded_hop_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(extract_client_id(&headers), "203.0.113.7");
    }

    #[test]
    fn test_falls_back_through_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static("2001:db8::1"));
        assert_eq!(extract_client_id(&headers), "2001:db8::1");

        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(extract_client_id(&headers), "198.51.100.2");
    }

    #[test]
    fn test_missing_headers_share_unknown_bucket() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(extract_client_id(&headers), UNKNOWN_CLIENT);
    }
}
