//! Top-level gateway configuration.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::providers::{
    deserialize_image_config, deserialize_video_config, FeedbackConfig, MediaProviderConfig,
    TextProviderConfig,
};
use super::rate_limit::RateLimitConfig;
use crate::error::ConfigError;

/// Placeholder shown instead of credentials.
pub const REDACTED: &str = "***";

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_host")]
    pub host: String,
    #[validate(range(min = 1_u16))]
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Full gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct GatewayConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    /// Browser origins allowed to call the API. Order is preserved.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub rate_limits: RateLimitConfig,
    #[serde(default)]
    #[validate(nested)]
    pub text: TextProviderConfig,
    #[serde(default = "MediaProviderConfig::default_image", deserialize_with = "deserialize_image_config")]
    #[validate(nested)]
    pub image: MediaProviderConfig,
    #[serde(default = "MediaProviderConfig::default_video", deserialize_with = "deserialize_video_config")]
    #[validate(nested)]
    pub video: MediaProviderConfig,
    #[serde(default)]
    #[validate(nested)]
    pub feedback: FeedbackConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            allowed_origins: default_allowed_origins(),
            rate_limits: RateLimitConfig::default(),
            text: TextProviderConfig::default(),
            image: MediaProviderConfig::default_image(),
            video: MediaProviderConfig::default_video(),
            feedback: FeedbackConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate all sections, reporting the first failing field by path.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|errors| {
            let mut flat = Vec::new();
            flatten_errors("", &errors, &mut flat);
            flat.sort();
            let (field, message) = flat
                .into_iter()
                .next()
                .unwrap_or_else(|| ("config".to_string(), errors.to_string()));
            ConfigError::ValidationError { field, message }
        })
    }

    /// Copy with every credential replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let mask = |secret: &mut Option<String>| {
            if secret.is_some() {
                *secret = Some(REDACTED.to_string());
            }
        };
        mask(&mut copy.text.api_key);
        mask(&mut copy.image.token);
        mask(&mut copy.video.token);
        mask(&mut copy.feedback.access_key);
        copy
    }
}

fn flatten_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(format!("failed '{}' check", err.code)));
                    out.push((path.clone(), message.into_owned()));
                }
            },
            ValidationErrorsKind::Struct(inner) => flatten_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    flatten_errors(&format!("{}[{}]", path, idx), inner, out);
                }
            },
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .iter()
    .map(|o| (*o).to_string())
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: GatewayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_media_section_keeps_kind_defaults() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"image": {"token": "t"}, "video": {"models": ["veo"]}}"#)
                .unwrap();
        let defaults = GatewayConfig::default();

        assert_eq!(config.image.token.as_deref(), Some("t"));
        assert_eq!(config.image.base_url, defaults.image.base_url);
        assert_eq!(config.image.models, defaults.image.models);

        assert_eq!(config.video.models, vec!["veo".to_string()]);
        assert_eq!(config.video.base_url, defaults.video.base_url);
        assert!(config.video.token.is_none());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_check_reports_nested_field_path() {
        let mut config = GatewayConfig::default();
        config.image.models.clear();
        let err = config.check().unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "image.models"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_rejects_bad_base_url() {
        let mut config = GatewayConfig::default();
        config.text.base_url = "not a url".to_string();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_redacted_masks_only_present_secrets() {
        let mut config = GatewayConfig::default();
        config.text.api_key = Some("gsk_live_secret".to_string());
        config.feedback.access_key = Some("relay-key".to_string());

        let redacted = config.redacted();
        assert_eq!(redacted.text.api_key.as_deref(), Some(REDACTED));
        assert_eq!(redacted.feedback.access_key.as_deref(), Some(REDACTED));
        assert_eq!(redacted.image.token, None);
        assert!(!serde_json::to_string(&redacted).unwrap().contains("gsk_live_secret"));
    }
}
