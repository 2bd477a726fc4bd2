use serde_json::Value;

/// Client for the JSON form-relay provider.
pub struct FormRelayClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl FormRelayClient {
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { http_client, endpoint: endpoint.into() }
    }

    /// Forward one payload. The error string is for server logs only.
    pub async fn submit(&self, payload: &Value) -> Result<(), String> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("Relay returned non-JSON body (HTTP {}): {}", status, e))?;

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !status.is_success() || !success {
            let message = body.get("message").and_then(Value::as_str).unwrap_or("no message");
            return Err(format!("Relay rejected submission (HTTP {}): {}", status, message));
        }
        Ok(())
    }
}
