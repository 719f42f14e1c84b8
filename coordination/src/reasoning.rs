//! Root-cause hypothesis produced by the reasoning model.

use serde::{Deserialize, Serialize};

use crate::extract::truncate_chars;

/// Characters of an unparseable response kept as `likely_issue`.
pub const UNPARSED_ISSUE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reasoning {
    #[serde(default)]
    pub likely_issue: String,
    #[serde(default)]
    pub probable_root_cause: String,
    #[serde(default, deserialize_with = "deserialize_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub is_familiar: bool,
    /// Missing from a model reply means "yes": unknown knowledge gaps are fetched.
    #[serde(default = "default_true")]
    pub needs_external_knowledge: bool,
}

fn default_true() -> bool {
    true
}

/// Accepts any JSON number and clamps it into `[0.0, 1.0]`.
pub(crate) fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_confidence(raw))
}

pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

impl Reasoning {
    /// The model answered but without a JSON object.
    pub fn unparsed(response: &str) -> Self {
        Self {
            likely_issue: truncate_chars(response, UNPARSED_ISSUE_CHARS),
            probable_root_cause: "Analysis in progress".to_string(),
            confidence: 0.5,
            is_familiar: false,
            needs_external_knowledge: true,
        }
    }

    /// The model call (or decoding its answer) failed outright.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            likely_issue: "Error during reasoning".to_string(),
            probable_root_cause: error.into(),
            confidence: 0.0,
            is_familiar: false,
            needs_external_knowledge: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_reply_deserializes() {
        let r: Reasoning = serde_json::from_str(
            r#"{"likely_issue":"pool exhausted","probable_root_cause":"leak",
                "confidence":0.8,"is_familiar":true,"needs_external_knowledge":false}"#,
        )
        .unwrap();
        assert_eq!(r.likely_issue, "pool exhausted");
        assert!((r.confidence - 0.8).abs() < f64::EPSILON);
        assert!(r.is_familiar);
        assert!(!r.needs_external_knowledge);
    }

    #[test]
    fn missing_fields_default_toward_fetching() {
        let r: Reasoning = serde_json::from_str(r#"{"likely_issue":"?"}"#).unwrap();
        assert_eq!(r.confidence, 0.0);
        assert!(!r.is_familiar);
        assert!(r.needs_external_knowledge);
        assert!(r.probable_root_cause.is_empty());
    }

    #[test]
    fn confidence_is_clamped() {
        let r: Reasoning = serde_json::from_str(r#"{"confidence": 7}"#).unwrap();
        assert_eq!(r.confidence, 1.0);
        let r: Reasoning = serde_json::from_str(r#"{"confidence": -0.2}"#).unwrap();
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn unparsed_keeps_first_200_chars() {
        let text = "a".repeat(250);
        let r = Reasoning::unparsed(&text);
        assert_eq!(r.likely_issue.len(), 200);
        assert_eq!(r.confidence, 0.5);
        assert_eq!(r.probable_root_cause, "Analysis in progress");
        assert!(r.needs_external_knowledge);
    }

    #[test]
    fn failed_carries_error_text() {
        let r = Reasoning::failed("connection reset");
        assert_eq!(r.likely_issue, "Error during reasoning");
        assert_eq!(r.probable_root_cause, "connection reset");
        assert_eq!(r.confidence, 0.0);
        assert!(r.needs_external_knowledge);
    }
}
