use regex::{Regex, RegexBuilder};
use std::fmt;

/// Status used for transport and parse failures, which are always retryable.
pub const TRANSPORT_FAILURE_STATUS: u16 = 502;

/// One failed upstream attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status: u16,
    pub message: String,
}

impl UpstreamFailure {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Network error or unusable body. Classified as a server error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, message)
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClassification {
    RateLimited,
    UpstreamServerError,
    ContextTooLong,
    SearchAccessDenied,
    Terminal,
}

impl FailureClassification {
    /// Whether the orchestrator may move on to the next candidate.
    pub fn should_try_next(self) -> bool {
        !matches!(self, FailureClassification::Terminal)
    }
}

pub trait FailureClassifier: Send + Sync {
    fn classify(&self, status: u16, message: &str, search_mode: bool) -> FailureClassification;
}

/// Status-code plus case-insensitive message pattern classifier.
pub struct PatternClassifier {
    rate_limited: Regex,
    context_too_long: Regex,
    search_denied: Regex,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternClassifier {
    #[allow(clippy::expect_used, reason = "patterns are compile-time constants")]
    pub fn new() -> Self {
        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("static classifier pattern")
        };
        Self {
            rate_limited: build(r"rate|limit"),
            context_too_long: build(r"reduce the length|context|too long|maximum context|token limit"),
            search_denied: build(r"forbidden|permission|access|not found|decommission|unavailable"),
        }
    }
}

impl FailureClassifier for PatternClassifier {
    fn classify(&self, status: u16, message: &str, search_mode: bool) -> FailureClassification {
        if status == 429 || self.rate_limited.is_match(message) {
            FailureClassification::RateLimited
        } else if status >= 500 {
            FailureClassification::UpstreamServerError
        } else if status == 413 || self.context_too_long.is_match(message) {
            FailureClassification::ContextTooLong
        } else if search_mode
            && (matches!(status, 401 | 403 | 404) || self.search_denied.is_match(message))
        {
            FailureClassification::SearchAccessDenied
        } else {
            FailureClassification::Terminal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FailureClassification::*;

    fn classify(status: u16, message: &str, search: bool) -> FailureClassification {
        PatternClassifier::new().classify(status, message, search)
    }

    #[test]
    fn test_rate_limited_by_status_or_message() {
        assert_eq!(classify(429, "slow down", false), RateLimited);
        assert_eq!(classify(400, "Rate LIMIT reached for model", false), RateLimited);
    }

    #[test]
    fn test_server_errors_retry() {
        assert_eq!(classify(500, "boom", false), UpstreamServerError);
        assert_eq!(classify(503, "", false), UpstreamServerError);
        assert!(classify(UpstreamFailure::transport("dns").status, "dns", false).should_try_next());
    }

    #[test]
    fn test_context_too_long() {
        assert_eq!(classify(413, "payload", false), ContextTooLong);
        assert_eq!(
            classify(400, "Please reduce the length of the messages", false),
            ContextTooLong
        );
        assert_eq!(classify(400, "exceeds token limit", false), ContextTooLong);
    }

    #[test]
    fn test_search_denied_only_in_search_mode() {
        assert_eq!(classify(403, "nope", true), SearchAccessDenied);
        assert_eq!(classify(400, "model has been decommissioned", true), SearchAccessDenied);
        assert_eq!(classify(403, "nope", false), Terminal);
        assert_eq!(classify(400, "model has been decommissioned", false), Terminal);
    }

    #[test]
    fn test_invalid_key_is_terminal() {
        let c = classify(401, "invalid api key", false);
        assert_eq!(c, Terminal);
        assert!(!c.should_try_next());
    }

    #[test]
    fn test_upstream_failure_display() {
        assert_eq!(UpstreamFailure::new(404, "missing").to_string(), "HTTP 404: missing");
    }
}
