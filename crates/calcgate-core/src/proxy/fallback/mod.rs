//! Ordered-fallback orchestration.
//!
//! Both orchestrators walk a fixed candidate list strictly in order, one
//! upstream call at a time, and stop at the first acceptable answer.

pub mod media;
pub mod text;

pub use media::{parse_media_query, MediaFallback, MediaSuccess};
pub use text::{build_candidates, TextFallback};
