//! Alert intake: typed alert attributes and the keyword classifier.

pub mod classifier;
pub mod types;

pub use classifier::{classify_alert, KEYWORD_VOCABULARY, SEVERITY_KEYWORDS};
pub use types::{AlertInfo, KnownService, Service, Severity, SeverityMatch};
