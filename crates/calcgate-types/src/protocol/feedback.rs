//! Feedback submission shapes.
//!
//! The `type` field selects the variant. All free-text fields are optional on
//! the wire; clamping and placeholder substitution happen in the relay.

use serde::{Deserialize, Serialize};

/// A feedback form submission, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackSubmission {
    ToolRequest(ToolRequest),
    BugReport(BugReport),
}

impl FeedbackSubmission {
    pub fn description(&self) -> Option<&str> {
        match self {
            FeedbackSubmission::ToolRequest(r) => r.description.as_deref(),
            FeedbackSubmission::BugReport(r) => r.description.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FeedbackSubmission::ToolRequest(_) => "tool_request",
            FeedbackSubmission::BugReport(_) => "bug_report",
        }
    }
}

/// Request for a new calculator/tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequest {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub use_case: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Bug report against an existing calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    #[serde(default)]
    pub calculator: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
