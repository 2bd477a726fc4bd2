//! Wire types exchanged with the browser client.

pub mod feedback;
pub mod text;

pub use feedback::{BugReport, FeedbackSubmission, ToolRequest};
pub use text::{ChatTurn, GenerationOptions, TextGenerationRequest, TextGenerationResponse};
