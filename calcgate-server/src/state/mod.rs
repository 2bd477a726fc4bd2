//! Application State
//!
//! Composition root: the loaded config plus the gateway components built
//! from it.

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

use calcgate_core::proxy::common::client_builder::build_http_client;
use calcgate_core::proxy::{build_gateway_router, GatewayState, RateLimiter};
use calcgate_types::models::GatewayConfig;

/// Transport ceiling for upstream calls. Video generation is the slowest path.
const UPSTREAM_TIMEOUT_SECS: u64 = 300;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: GatewayConfig,
    pub gateway: GatewayState,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http_client = build_http_client(UPSTREAM_TIMEOUT_SECS).map_err(anyhow::Error::msg)?;
        Self::with_http_client(config, http_client)
    }

    pub fn with_http_client(config: GatewayConfig, http_client: reqwest::Client) -> Result<Self> {
        let rate_limiter = Arc::new(RateLimiter::new());
        let gateway = GatewayState::from_config(&config, http_client, rate_limiter)
            .map_err(anyhow::Error::msg)?;

        Ok(Self { inner: Arc::new(AppStateInner { config, gateway, started_at: Instant::now() }) })
    }

    pub fn build_gateway_router(&self) -> Router {
        build_gateway_router(self.inner.gateway.clone())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }

    /// Live rate-limit counters across all scopes.
    pub fn rate_limit_entries(&self) -> usize {
        self.inner.gateway.rate_limiter.len()
    }
}
