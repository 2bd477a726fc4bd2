//! # calcgate Types
//!
//! Configuration models, wire protocol types, and error definitions for the
//! calcgate request gateway.
//!
//! - **`error`** - Typed configuration errors
//! - **`models`** - Gateway configuration (origins, rate limits, providers)
//! - **`protocol`** - Text-generation and feedback wire types
//!
//! ## Architecture Role
//!
//! ```text
//!        calcgate-types (this crate)
//!               │
//!               ▼
//!        calcgate-core
//!               │
//!               ▼
//!        calcgate-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, Result};

pub use models::{
    FeedbackConfig, GatewayConfig, MediaProviderConfig, RateLimitConfig, RateLimitRule,
    RateScope, ServerConfig, TextProviderConfig,
};
