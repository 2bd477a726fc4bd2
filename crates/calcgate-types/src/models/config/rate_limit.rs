//! Per-scope rate limit thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use validator::Validate;

/// Protected endpoint family. Counters are never shared across scopes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RateScope {
    Text,
    Image,
    Video,
    Feedback,
}

impl RateScope {
    /// Stable key used in counter keys and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            RateScope::Text => "text",
            RateScope::Image => "image",
            RateScope::Video => "video",
            RateScope::Feedback => "feedback",
        }
    }
}

impl fmt::Display for RateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-window limit for one scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RateLimitRule {
    /// Requests allowed per window per client
    #[validate(range(min = 1_u32))]
    pub max_requests: u32,
    /// Window length in seconds
    #[validate(range(min = 1_u64, max = 86_400_u64))]
    pub window_secs: u64,
}

impl RateLimitRule {
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self { max_requests, window_secs }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Rate limit rules for every scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RateLimitConfig {
    #[serde(default = "default_text_rule")]
    #[validate(nested)]
    pub text: RateLimitRule,
    #[serde(default = "default_image_rule")]
    #[validate(nested)]
    pub image: RateLimitRule,
    #[serde(default = "default_video_rule")]
    #[validate(nested)]
    pub video: RateLimitRule,
    #[serde(default = "default_feedback_rule")]
    #[validate(nested)]
    pub feedback: RateLimitRule,
}

impl RateLimitConfig {
    pub fn rule(&self, scope: RateScope) -> RateLimitRule {
        match scope {
            RateScope::Text => self.text,
            RateScope::Image => self.image,
            RateScope::Video => self.video,
            RateScope::Feedback => self.feedback,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            text: default_text_rule(),
            image: default_image_rule(),
            video: default_video_rule(),
            feedback: default_feedback_rule(),
        }
    }
}

fn default_text_rule() -> RateLimitRule {
    RateLimitRule::new(20, 60)
}

fn default_image_rule() -> RateLimitRule {
    RateLimitRule::new(10, 60)
}

fn default_video_rule() -> RateLimitRule {
    RateLimitRule::new(3, 300)
}

fn default_feedback_rule() -> RateLimitRule {
    RateLimitRule::new(5, 600)
}
