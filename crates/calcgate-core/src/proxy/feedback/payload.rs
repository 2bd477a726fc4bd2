//! Relay payload builders, one per submission variant.

use serde_json::{json, Value};

use calcgate_types::protocol::{BugReport, FeedbackSubmission, ToolRequest};

/// Substituted for absent or blank fields.
pub const PLACEHOLDER: &str = "Not provided";

// Per-field character limits.
const NAME_MAX: usize = 120;
const CATEGORY_MAX: usize = 60;
const DESCRIPTION_MAX: usize = 5000;
const USE_CASE_MAX: usize = 1000;
const EMAIL_MAX: usize = 254;
const PAGE_URL_MAX: usize = 500;
const OBSERVATION_MAX: usize = 2000;
const BROWSER_MAX: usize = 300;

/// Trim, clamp to `max` characters, and default blanks to [`PLACEHOLDER`].
pub fn clamp_field(value: Option<&str>, max: usize) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.chars().take(max).collect(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Relay envelope shared by every variant.
pub struct Envelope<'a> {
    pub access_key: &'a str,
    pub from_name: &'a str,
    pub submitted_at: &'a str,
}

pub fn build_payload(submission: &FeedbackSubmission, envelope: &Envelope<'_>) -> Value {
    match submission {
        FeedbackSubmission::ToolRequest(r) => tool_request_payload(r, envelope),
        FeedbackSubmission::BugReport(r) => bug_report_payload(r, envelope),
    }
}

fn tool_request_payload(r: &ToolRequest, envelope: &Envelope<'_>) -> Value {
    let tool_name = clamp_field(r.tool_name.as_deref(), NAME_MAX);
    json!({
        "access_key": envelope.access_key,
        "from_name": envelope.from_name,
        "subject": format!("Tool request: {}", tool_name),
        "Submission Type": "Tool Request",
        "Tool Name": tool_name,
        "Category": clamp_field(r.category.as_deref(), CATEGORY_MAX),
        "Description": clamp_field(r.description.as_deref(), DESCRIPTION_MAX),
        "Use Case": clamp_field(r.use_case.as_deref(), USE_CASE_MAX),
        "Email": clamp_field(r.email.as_deref(), EMAIL_MAX),
        "Submitted At": envelope.submitted_at,
    })
}

fn bug_report_payload(r: &BugReport, envelope: &Envelope<'_>) -> Value {
    let calculator = clamp_field(r.calculator.as_deref(), NAME_MAX);
    json!({
        "access_key": envelope.access_key,
        "from_name": envelope.from_name,
        "subject": format!("Bug report: {}", calculator),
        "Submission Type": "Bug Report",
        "Calculator": calculator,
        "Page URL": clamp_field(r.page_url.as_deref(), PAGE_URL_MAX),
        "Description": clamp_field(r.description.as_deref(), DESCRIPTION_MAX),
        "Expected Result": clamp_field(r.expected.as_deref(), OBSERVATION_MAX),
        "Actual Result": clamp_field(r.actual.as_deref(), OBSERVATION_MAX),
        "Browser": clamp_field(r.browser.as_deref(), BROWSER_MAX),
        "Email": clamp_field(r.email.as_deref(), EMAIL_MAX),
        "Submitted At": envelope.submitted_at,
    })
}
