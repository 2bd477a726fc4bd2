//! Upstream provider configuration.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Text-completion provider (OpenAI-compatible chat completions API).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct TextProviderConfig {
    /// Base URL; `/chat/completions` is appended
    #[validate(url)]
    #[serde(default = "default_text_base_url")]
    pub base_url: String,
    /// Bearer credential. Requests fail with 500 while unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Fallback priority chain, tried in order
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_text_models")]
    pub models: Vec<String>,
    /// First model tried in search mode
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_search_model")]
    pub search_model: String,
    /// Second (and last) model tried in search mode
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_search_fallback_model")]
    pub search_fallback_model: String,
    #[validate(range(min = 1_u32, max = 8192_u32))]
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
    #[validate(range(min = 0.0_f32, max = 2.0_f32))]
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    #[validate(range(min = 5_u64, max = 600_u64))]
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TextProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_text_base_url(),
            api_key: None,
            models: default_text_models(),
            search_model: default_search_model(),
            search_fallback_model: default_search_fallback_model(),
            default_max_tokens: default_max_tokens(),
            default_temperature: default_temperature(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Media-generation provider for one media type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct MediaProviderConfig {
    /// Base URL; `/prompt/{prompt}` is appended
    #[validate(url)]
    pub base_url: String,
    /// Models tried in declared order
    #[validate(length(min = 1_u64))]
    pub models: Vec<String>,
    /// Optional bearer token sent with every media request
    #[serde(default)]
    pub token: Option<String>,
}

impl MediaProviderConfig {
    pub fn default_image() -> Self {
        Self {
            base_url: "https://image.pollinations.ai".to_string(),
            models: vec!["flux".to_string(), "turbo".to_string(), "gptimage".to_string()],
            token: None,
        }
    }

    pub fn default_video() -> Self {
        Self {
            base_url: "https://video.pollinations.ai".to_string(),
            models: vec!["veo".to_string(), "seedance".to_string()],
            token: None,
        }
    }
}

/// A media section as written in the config file; absent fields keep the
/// per-kind default.
#[derive(Debug, Default, Deserialize)]
struct MediaProviderOverrides {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    models: Option<Vec<String>>,
    #[serde(default)]
    token: Option<String>,
}

impl MediaProviderOverrides {
    fn apply(self, mut config: MediaProviderConfig) -> MediaProviderConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(models) = self.models {
            config.models = models;
        }
        if self.token.is_some() {
            config.token = self.token;
        }
        config
    }
}

pub(crate) fn deserialize_image_config<'de, D>(deserializer: D) -> Result<MediaProviderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(MediaProviderOverrides::deserialize(deserializer)?.apply(MediaProviderConfig::default_image()))
}

pub(crate) fn deserialize_video_config<'de, D>(deserializer: D) -> Result<MediaProviderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(MediaProviderOverrides::deserialize(deserializer)?.apply(MediaProviderConfig::default_video()))
}

/// Form-relay provider used by the feedback endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct FeedbackConfig {
    #[validate(url)]
    #[serde(default = "default_feedback_endpoint")]
    pub endpoint: String,
    /// Relay access credential. Submissions fail with 500 while unset.
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint: default_feedback_endpoint(),
            access_key: None,
            from_name: default_from_name(),
        }
    }
}

fn default_text_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_text_models() -> Vec<String> {
    [
        "llama-3.3-70b-versatile",
        "openai/gpt-oss-120b",
        "meta-llama/llama-4-scout-17b-16e-instruct",
        "llama-3.1-8b-instant",
    ]
    .iter()
    .map(|m| (*m).to_string())
    .collect()
}

fn default_search_model() -> String {
    "groq/compound".to_string()
}

fn default_search_fallback_model() -> String {
    "groq/compound-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout() -> u64 {
    60
}

fn default_feedback_endpoint() -> String {
    "https://api.web3forms.com/submit".to_string()
}

fn default_from_name() -> String {
    "Calculator Feedback".to_string()
}
