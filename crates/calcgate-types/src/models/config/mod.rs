//! Gateway configuration models.

mod gateway;
mod providers;
mod rate_limit;

pub use gateway::{GatewayConfig, ServerConfig, REDACTED};
pub use providers::{FeedbackConfig, MediaProviderConfig, TextProviderConfig};
pub use rate_limit::{RateLimitConfig, RateLimitRule, RateScope};
