//! Alert Classifier: free text to [`AlertInfo`].
//!
//! Pure keyword matching, no model calls:
//!
//! ```text
//! alert text ─┬─ service   : priority table (substring) → word-boundary regex → unknown-service
//!             ├─ severity  : critical > high > medium > low keyword tables → default medium
//!             ├─ keywords  : fixed term vocabulary, vocabulary order
//!             └─ error_codes: 3-digit 4xx/5xx tokens, occurrence order
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::alert::types::{AlertInfo, KnownService, Service, Severity, SeverityMatch};

static SERVICE_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(payment|billing|checkout|auth|login|database|user|api|core|gateway)\b")
        .unwrap()
});

static ERROR_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:5\d{2}|4\d{2})\b").unwrap());

/// Severity keyword tables, checked in order. The first table with any hit wins.
pub const SEVERITY_KEYWORDS: &[(Severity, &[&str])] = &[
    (
        Severity::Critical,
        &[
            "critical",
            "outage",
            "down",
            "complete failure",
            "data loss",
            "corruption",
            "irreversible",
            "revenue impact",
            "transactions failing",
        ],
    ),
    (
        Severity::High,
        &["high", "spike", "surge", "800%", "massive", "severe"],
    ),
    (
        Severity::Medium,
        &["degradation", "slow", "increased", "elevated"],
    ),
    (Severity::Low, &["minor", "slight", "warning"]),
];

/// Terms surfaced as `keywords`, in output order.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "failure",
    "error",
    "timeout",
    "spike",
    "degradation",
    "outage",
    "login",
    "auth",
    "database",
    "payment",
    "revenue",
];

/// Classify a raw alert. Never fails; an alert matching nothing yields
/// `unknown-service` at default severity with empty keyword lists.
pub fn classify_alert(raw_alert: &str) -> AlertInfo {
    let lower = raw_alert.to_lowercase();

    let service = detect_service(&lower);
    let severity_match = detect_severity(&lower);
    let keywords = KEYWORD_VOCABULARY
        .iter()
        .copied()
        .filter(|term| lower.contains(term))
        .collect();
    let error_codes = extract_error_codes(raw_alert);

    tracing::debug!(
        service = %service,
        severity = %severity_match.severity(),
        "alert classified"
    );

    AlertInfo::new(
        service,
        severity_match,
        keywords,
        error_codes,
        raw_alert.to_string(),
    )
}

/// `lower` must already be lower-cased.
pub fn detect_service(lower: &str) -> Service {
    if let Some(svc) = KnownService::PRIORITY
        .into_iter()
        .find(|svc| lower.contains(svc.as_str()))
    {
        return Service::Known(svc);
    }

    SERVICE_WORD_PATTERN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| KnownService::from_name(m.as_str()))
        .map(Service::Known)
        .unwrap_or(Service::Unknown)
}

/// `lower` must already be lower-cased.
pub fn detect_severity(lower: &str) -> SeverityMatch {
    for (severity, terms) in SEVERITY_KEYWORDS {
        if let Some(term) = terms.iter().copied().find(|t| lower.contains(t)) {
            return SeverityMatch::Keyword {
                severity: *severity,
                term,
            };
        }
    }
    SeverityMatch::Default
}

pub fn extract_error_codes(text: &str) -> Vec<String> {
    ERROR_CODE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
