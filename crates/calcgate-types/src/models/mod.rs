//! Domain models for calcgate.

pub mod config;

pub use config::{
    FeedbackConfig, GatewayConfig, MediaProviderConfig, RateLimitConfig, RateLimitRule,
    RateScope, ServerConfig, TextProviderConfig,
};
