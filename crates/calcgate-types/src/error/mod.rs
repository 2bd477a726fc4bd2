//! Typed error definitions for calcgate.
//!
//! Request-path errors live in `calcgate-core` next to the HTTP mapping; this
//! module only carries the errors that can happen before a server exists.

mod config;

pub use config::ConfigError;

/// Standard Result type using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
