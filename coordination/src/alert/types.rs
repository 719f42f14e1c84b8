//! Alert domain types shared by every triage stage.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Services the classifier knows by name, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownService {
    Payment,
    Billing,
    Checkout,
    Auth,
    Login,
    Database,
    User,
    Api,
    Core,
    Gateway,
}

impl KnownService {
    /// Lookup table. Order is significant: the first entry found in the alert wins.
    pub const PRIORITY: [KnownService; 10] = [
        Self::Payment,
        Self::Billing,
        Self::Checkout,
        Self::Auth,
        Self::Login,
        Self::Database,
        Self::User,
        Self::Api,
        Self::Core,
        Self::Gateway,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Billing => "billing",
            Self::Checkout => "checkout",
            Self::Auth => "auth",
            Self::Login => "login",
            Self::Database => "database",
            Self::User => "user",
            Self::Api => "api",
            Self::Core => "core",
            Self::Gateway => "gateway",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|s| s.as_str() == name)
    }
}

/// Service an alert was attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Known(KnownService),
    /// No vocabulary term matched.
    Unknown,
}

impl Service {
    pub const UNKNOWN_NAME: &'static str = "unknown-service";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Known(s) => s.as_str(),
            Self::Unknown => Self::UNKNOWN_NAME,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Service {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Service {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(KnownService::from_name(&name)
            .map(Service::Known)
            .unwrap_or(Service::Unknown))
    }
}

/// Incident severity, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Case-insensitive parse of a severity label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the classifier arrived at a severity.
///
/// `Keyword(Medium)` and `Default` both produce `Severity::Medium`; they are
/// kept apart so callers can tell an explicit "degradation" apart from silence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityMatch {
    Keyword {
        severity: Severity,
        term: &'static str,
    },
    Default,
}

impl SeverityMatch {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Keyword { severity, .. } => *severity,
            Self::Default => Severity::default(),
        }
    }
}

/// Structured attributes extracted from a free-text alert.
///
/// Built once by [`crate::alert::classify_alert`]. Fields are private so no
/// later stage can alter them; in particular `raw_alert` must reach the
/// escalation override exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertInfo {
    service: Service,
    severity: Severity,
    #[serde(skip)]
    severity_match: SeverityMatch,
    keywords: Vec<&'static str>,
    error_codes: Vec<String>,
    raw_alert: String,
}

impl AlertInfo {
    pub(crate) fn new(
        service: Service,
        severity_match: SeverityMatch,
        keywords: Vec<&'static str>,
        error_codes: Vec<String>,
        raw_alert: String,
    ) -> Self {
        Self {
            service,
            severity: severity_match.severity(),
            severity_match,
            keywords,
            error_codes,
            raw_alert,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn severity_match(&self) -> &SeverityMatch {
        &self.severity_match
    }

    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    pub fn error_codes(&self) -> &[String] {
        &self.error_codes
    }

    pub fn raw_alert(&self) -> &str {
        &self.raw_alert
    }
}
