//! Proxy module - the gateway request path
//!
//! - Origin allow-list and CORS headers
//! - Per-client fixed-window rate limiting
//! - Ordered fallback across text, image and video providers
//! - Feedback relay with honeypot filtering

pub mod common;
pub mod fallback;
pub mod feedback;
pub mod handlers;
pub mod middleware;
pub mod retry;
pub mod server;
pub mod upstream;


pub use middleware::{OriginGuard, RateLimiter};
pub use server::{build_gateway_router, GatewayState, MAX_BODY_BYTES};
