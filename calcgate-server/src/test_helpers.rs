//! Test helpers for calcgate-server unit tests.

use calcgate_types::models::GatewayConfig;

use crate::state::AppState;

/// `AppState` over default config with placeholder credentials. Upstreams
/// point at an unroutable address so nothing leaves the machine.
pub fn test_app_state() -> AppState {
    let mut config = GatewayConfig::default();
    config.text.api_key = Some("test-text-key".to_string());
    config.feedback.access_key = Some("test-form-key".to_string());
    config.text.base_url = "http://127.0.0.1:9".to_string();
    config.image.base_url = "http://127.0.0.1:9".to_string();
    config.video.base_url = "http://127.0.0.1:9".to_string();
    config.feedback.endpoint = "http://127.0.0.1:9/submit".to_string();

    AppState::with_http_client(config, reqwest::Client::new()).expect("failed to create test AppState")
}
