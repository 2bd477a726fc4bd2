use dashmap::DashMap;
use rand::Rng;
use std::time::Duration;

use calcgate_types::models::{RateLimitRule, RateScope};

/// Chance that a check also sweeps stale windows for its `(scope, client)` pair.
pub const DEFAULT_PRUNE_PROBABILITY: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CounterKey {
    scope: &'static str,
    client_id: String,
    window: i64,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Seconds until the current window closes; 0 when allowed.
    pub retry_after_secs: u64,
}

/// Fixed-window request counter keyed by `(scope, client, window index)`.
///
/// Counters live in process memory only: they reset on restart and are not
/// shared between instances. A client can burst up to twice the limit across
/// a window boundary.
pub struct RateLimiter {
    counters: DashMap<CounterKey, u32>,
    prune_probability: f64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_prune_probability(DEFAULT_PRUNE_PROBABILITY)
    }

    pub fn with_prune_probability(probability: f64) -> Self {
        Self { counters: DashMap::new(), prune_probability: probability.clamp(0.0, 1.0) }
    }

    /// Check and count one request for `scope` under `rule`.
    pub fn check_scope(&self, client_id: &str, scope: RateScope, rule: RateLimitRule) -> RateDecision {
        self.check(client_id, scope.as_str(), rule.max_requests, rule.window())
    }

    pub fn check(
        &self,
        client_id: &str,
        scope: &'static str,
        max_requests: u32,
        window: Duration,
    ) -> RateDecision {
        self.check_at(client_id, scope, max_requests, window, chrono::Utc::now().timestamp_millis())
    }

    /// Clock-explicit form of [`RateLimiter::check`].
    pub fn check_at(
        &self,
        client_id: &str,
        scope: &'static str,
        max_requests: u32,
        window: Duration,
        now_ms: i64,
    ) -> RateDecision {
        let window_ms = (window.as_millis() as i64).max(1);
        let window_index = now_ms.div_euclid(window_ms);

        if self.prune_probability > 0.0 && rand::thread_rng().gen_bool(self.prune_probability) {
            self.prune(scope, client_id, window_index);
        }

        let key = CounterKey { scope, client_id: client_id.to_string(), window: window_index };
        let mut count = self.counters.entry(key).or_insert(0);

        if *count >= max_requests {
            let window_end = (window_index + 1) * window_ms;
            let remaining_ms = (window_end - now_ms).max(0) as u64;
            let retry_after_secs = remaining_ms.div_ceil(1000).max(1);
            tracing::warn!(
                "Rate limit hit: scope={}, client={}, count={}, retry_after={}s",
                scope,
                client_id,
                *count,
                retry_after_secs
            );
            return RateDecision { allowed: false, retry_after_secs };
        }

        *count = count.saturating_add(1);
        RateDecision { allowed: true, retry_after_secs: 0 }
    }

    /// Drop every counter for `(scope, client)` outside the current window.
    fn prune(&self, scope: &'static str, client_id: &str, current_window: i64) {
        self.counters.retain(|k, _| {
            k.scope != scope || k.client_id != client_id || k.window == current_window
        });
    }

    /// Number of live counter entries.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
