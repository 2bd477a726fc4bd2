use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build the shared upstream HTTP client.
///
/// `timeout_secs` is the transport-level ceiling for a whole request; text
/// calls may tighten it per request.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(timeout_secs.max(5)))
        .tcp_nodelay(true)
        .user_agent(concat!("calcgate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
