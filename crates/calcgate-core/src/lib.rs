//! # calcgate Core
//!
//! Request admission and provider fallback for the calcgate gateway.
//!
//! ```text
//! calcgate-core/src/
//! ├── error.rs          # GatewayError -> JSON responses
//! ├── modules/config.rs # config file + environment loading
//! └── proxy/
//!     ├── middleware/   # origin guard, client id, fixed-window limiter
//!     ├── retry/        # upstream failure classification
//!     ├── upstream/     # text, media and form-relay clients
//!     ├── fallback/     # ordered text and media fallback
//!     ├── feedback/     # feedback validation and relay
//!     ├── handlers/     # axum handlers for /api/*
//!     └── server.rs     # GatewayState + router
//! ```

// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod modules;
pub mod proxy;

pub use error::{GatewayError, GatewayResult};
pub use modules::config::load_config;
pub use proxy::server::{build_gateway_router, GatewayState};
