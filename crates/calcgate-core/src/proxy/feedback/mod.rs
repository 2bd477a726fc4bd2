//! Feedback relay: honeypot check, validation, and forwarding to the form relay.

pub mod payload;

use serde_json::Value;

use calcgate_types::protocol::FeedbackSubmission;

use crate::error::{GatewayError, GatewayResult};
use crate::proxy::upstream::FormRelayClient;
use payload::{build_payload, Envelope};

/// Hidden form field only bots fill in.
pub const HONEYPOT_FIELD: &str = "website";

pub struct FeedbackRelay {
    client: FormRelayClient,
    access_key: Option<String>,
    from_name: String,
}

impl FeedbackRelay {
    pub fn new(client: FormRelayClient, access_key: Option<String>, from_name: impl Into<String>) -> Self {
        let access_key = access_key.filter(|k| !k.trim().is_empty());
        Self { client, access_key, from_name: from_name.into() }
    }

    /// Validate and forward one submission.
    ///
    /// A filled honeypot returns `Ok` without contacting the relay. Relay
    /// failures are logged in full and reported to the caller only as
    /// [`GatewayError::RelayFailed`].
    pub async fn submit(&self, body: &Value, trace_id: &str) -> GatewayResult<()> {
        if !body.is_object() {
            return Err(GatewayError::BadRequest("Request body must be a JSON object".to_string()));
        }

        let honeypot = body.get(HONEYPOT_FIELD).and_then(Value::as_str).map(str::trim);
        if honeypot.is_some_and(|h| !h.is_empty()) {
            tracing::info!("[{}] Honeypot filled, dropping feedback submission", trace_id);
            return Ok(());
        }

        let Some(access_key) = self.access_key.as_deref() else {
            tracing::error!("[{}] Feedback relay access key is not configured", trace_id);
            return Err(GatewayError::MissingCredential("Feedback relay access key"));
        };

        let submission: FeedbackSubmission = serde_json::from_value(body.clone()).map_err(|e| {
            tracing::debug!("[{}] Invalid feedback body: {}", trace_id, e);
            GatewayError::BadRequest(
                "Invalid feedback: 'type' must be 'tool_request' or 'bug_report'".to_string(),
            )
        })?;

        if submission.description().map(str::trim).unwrap_or_default().is_empty() {
            return Err(GatewayError::BadRequest("Description is required".to_string()));
        }

        let submitted_at = chrono::Utc::now().to_rfc3339();
        let envelope = Envelope { access_key, from_name: &self.from_name, submitted_at: &submitted_at };
        let payload = build_payload(&submission, &envelope);

        match self.client.submit(&payload).await {
            Ok(()) => {
                tracing::info!("[{}] Feedback ({}) relayed", trace_id, submission.kind());
                Ok(())
            },
            Err(e) => {
                tracing::error!("[{}] Feedback relay failed: {}", trace_id, e);
                Err(GatewayError::RelayFailed)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn relay(server: &MockServer, key: Option<&str>) -> FeedbackRelay {
        FeedbackRelay::new(
            FormRelayClient::new(reqwest::Client::new(), server.uri()),
            key.map(str::to_string),
            "Calculator Feedback",
        )
    }

    #[tokio::test]
    async fn test_honeypot_never_reaches_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(0)
            .mount(&server)
            .await;

        let body = json!({"type": "bug_report", "description": "spam", "website": "http://spam.example"});
        assert_eq!(relay(&server, Some("k")).submit(&body, "t").await, Ok(()));

        // Honeypot wins even with an invalid shape and no credential.
        let junk = json!({"type": "nonsense", "website": "x"});
        assert_eq!(relay(&server, None).submit(&junk, "t").await, Ok(()));
    }

    #[tokio::test]
    async fn test_valid_tool_request_is_forwarded_with_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "access_key": "relay-key",
                "subject": "Tool request: Tip splitter",
                "Email": "Not provided"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let body = json!({
            "type": "tool_request",
            "toolName": "Tip splitter",
            "description": "split by percentage",
            "website": ""
        });
        assert_eq!(relay(&server, Some("relay-key")).submit(&body, "t").await, Ok(()));
    }

    #[tokio::test]
    async fn test_missing_description_is_bad_request() {
        let server = MockServer::start().await;
        let body = json!({"type": "bug_report", "description": "   "});
        let result = relay(&server, Some("k")).submit(&body, "t").await;
        assert_eq!(result, Err(GatewayError::BadRequest("Description is required".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_type_is_bad_request() {
        let server = MockServer::start().await;
        let body = json!({"type": "praise", "description": "great site"});
        assert!(matches!(
            relay(&server, Some("k")).submit(&body, "t").await,
            Err(GatewayError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure_flag_is_generic_502() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "internal relay detail"})),
            )
            .mount(&server)
            .await;

        let body = json!({"type": "bug_report", "description": "wrong"});
        let result = relay(&server, Some("k")).submit(&body, "t").await;
        assert_eq!(result, Err(GatewayError::RelayFailed));
    }

    #[tokio::test]
    async fn test_missing_access_key_is_500() {
        let server = MockServer::start().await;
        let body = json!({"type": "bug_report", "description": "wrong"});
        let result = relay(&server, None).submit(&body, "t").await;
        assert!(matches!(result, Err(GatewayError::MissingCredential(_))));
    }
}
