// Middleware module - admission control

pub mod client_ip;
pub mod cors;
pub mod rate_limiter;

pub use client_ip::{extract_client_id, UNKNOWN_CLIENT};
pub use cors::{OriginGuard, ALLOWED_REQUEST_HEADERS};
pub use rate_limiter::{RateDecision, RateLimiter};
