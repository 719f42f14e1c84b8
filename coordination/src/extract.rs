//! Structured-output extraction from free-form model responses.
//!
//! Models wrap their JSON in prose, code fences, or both. The extraction rule
//! is deliberately simple: take the span from the first `{` to the last `}`
//! (greedy, across newlines) and decode it strictly. Anything else is a typed
//! [`ExtractError`] for the caller to map onto its own fallback.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No `{ ... }` span in the response.
    #[error("no JSON object found in response")]
    NoJsonObject,

    /// A span was found but did not decode into the expected shape.
    #[error("invalid JSON object: {0}")]
    InvalidJson(String),
}

/// Greedy first-`{`-to-last-`}` span, or `None` when there is no closing
/// brace after the first opening one.
pub fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Extract and strictly decode the JSON object embedded in `text`.
pub fn extract_json_object<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let span = json_object_span(text).ok_or(ExtractError::NoJsonObject)?;
    serde_json::from_str(span).map_err(|e| ExtractError::InvalidJson(e.to_string()))
}

/// Prose preceding the first `{`, trimmed. Without any brace, the first
/// `fallback_chars` characters of the whole text.
pub fn leading_prose(text: &str, fallback_chars: usize) -> String {
    match text.find('{') {
        Some(idx) => text[..idx].trim().to_string(),
        None => truncate_chars(text, fallback_chars),
    }
}

/// First `max` characters of `text` (character, not byte, boundary).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
