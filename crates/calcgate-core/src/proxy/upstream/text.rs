use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use calcgate_types::protocol::ChatTurn;

use crate::proxy::retry::UpstreamFailure;

/// Longest upstream error text passed on to callers.
const MAX_ERROR_MESSAGE_CHARS: usize = 500;

/// One chat-completion call against one model.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A text-completion provider.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// False when the server credential is missing.
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamFailure>;
}

/// OpenAI-compatible `/chat/completions` client.
pub struct HttpTextProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTextProvider {
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { http_client, endpoint, api_key, timeout }
    }
}

#[async_trait]
impl TextCompletion for HttpTextProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamFailure> {
        let mut builder = self.http_client.post(&self.endpoint).timeout(self.timeout).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| UpstreamFailure::transport(format!("Network error: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamFailure::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::debug!("Text upstream {} body: {}", status, body);
            return Err(UpstreamFailure::new(status.as_u16(), extract_error_message(status, &body)));
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamFailure::transport(format!("Invalid JSON from provider: {}", e)))?;

        json.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| UpstreamFailure::transport("Provider returned no content"))
    }
}

/// Pull a human-readable message out of an upstream error body.
pub(crate) fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| v.get("error").and_then(Value::as_str))
            .or_else(|| v.get("message").and_then(Value::as_str))
            .map(str::to_string)
    });

    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        return format!("Upstream error (HTTP {})", status.as_u16());
    }
    message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![ChatTurn::new("user", "2+2?")],
            max_tokens: 64,
            temperature: 0.5,
        }
    }

    fn provider(server: &MockServer, key: Option<&str>) -> HttpTextProvider {
        HttpTextProvider::new(
            reqwest::Client::new(),
            &format!("{}/", server.uri()),
            key.map(str::to_string),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_extract_error_message_variants() {
        let s = StatusCode::BAD_REQUEST;
        assert_eq!(extract_error_message(s, r#"{"error":{"message":"bad model"}}"#), "bad model");
        assert_eq!(extract_error_message(s, r#"{"error":"flat"}"#), "flat");
        assert_eq!(extract_error_message(s, "  plain text  "), "plain text");
        assert_eq!(extract_error_message(s, ""), "Upstream error (HTTP 400)");
        assert_eq!(extract_error_message(s, &"x".repeat(2000)).len(), MAX_ERROR_MESSAGE_CHARS);
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let p = HttpTextProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            Some("  ".to_string()),
            Duration::from_secs(1),
        );
        assert!(!p.is_configured());
    }

    #[tokio::test]
    async fn test_success_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "m1", "max_tokens": 64})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "4"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server, Some("sk-test")).complete(&request("m1")).await;
        assert_eq!(text, Ok("4".to_string()));
    }

    #[tokio::test]
    async fn test_error_status_and_message_are_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "invalid api key"}})),
            )
            .mount(&server)
            .await;

        let err = provider(&server, Some("bad")).complete(&request("m1")).await;
        assert_eq!(err, Err(UpstreamFailure::new(401, "invalid api key")));
    }

    #[tokio::test]
    async fn test_non_json_success_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server, Some("k")).complete(&request("m1")).await.err();
        assert_eq!(err.map(|e| e.status), Some(502));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let p = HttpTextProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            Some("k".to_string()),
            Duration::from_secs(2),
        );
        let err = p.complete(&request("m1")).await.err();
        assert_eq!(err.map(|e| e.status), Some(502));
    }
}
