//! Upstream failure classification.
//!
//! Orchestrators only ask "may I advance to the next candidate?"; the
//! patterns behind that answer live behind [`FailureClassifier`].

mod classifier;

pub use classifier::{FailureClassification, FailureClassifier, PatternClassifier, UpstreamFailure};
