//! Final triage decision and its fail-safe shapes.
//!
//! The JSON field names here are a wire contract consumed outside this
//! workspace: `incident_id, service, severity, status, root_cause,
//! confidence, actions_taken, verification, should_escalate,
//! next_recommendation`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{AlertInfo, Severity};
use crate::reasoning::clamp_confidence;

pub const IMMEDIATE_ESCALATION: &str = "IMMEDIATE HUMAN ESCALATION REQUIRED";

/// `inc-YYYY-MM-DD-HHMM`.
pub fn incident_id_at(now: DateTime<Utc>) -> String {
    now.format("inc-%Y-%m-%d-%H%M").to_string()
}

pub fn generate_incident_id() -> String {
    incident_id_at(Utc::now())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Ongoing,
    Resolved,
    Investigating,
    Error,
}

impl IncidentStatus {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "ongoing" => Some(Self::Ongoing),
            "resolved" => Some(Self::Resolved),
            "investigating" => Some(Self::Investigating),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Resolved => write!(f, "resolved"),
            Self::Investigating => write!(f, "investigating"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub incident_id: String,
    pub service: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub root_cause: String,
    pub confidence: f64,
    pub actions_taken: Vec<String>,
    pub verification: BTreeMap<String, serde_json::Value>,
    pub should_escalate: bool,
    pub next_recommendation: String,
}

impl Decision {
    /// Escalate-by-default decision used whenever the model's answer is unusable.
    pub fn fail_safe(
        alert: &AlertInfo,
        status: IncidentStatus,
        root_cause: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            incident_id: incident_id_at(now),
            service: alert.service().as_str().to_string(),
            severity: Severity::Critical,
            status,
            root_cause: root_cause.into(),
            confidence: 0.0,
            actions_taken: Vec::new(),
            verification: BTreeMap::new(),
            should_escalate: true,
            next_recommendation: IMMEDIATE_ESCALATION.to_string(),
        }
    }

    /// The model replied but no decision could be extracted.
    pub fn unparsed(alert: &AlertInfo, now: DateTime<Utc>) -> Self {
        Self::fail_safe(
            alert,
            IncidentStatus::Ongoing,
            "Analysis failed - potential critical issue",
            now,
        )
    }

    /// The model call failed, or its JSON object did not decode.
    pub fn transport_failed(alert: &AlertInfo, now: DateTime<Utc>) -> Self {
        Self::fail_safe(alert, IncidentStatus::Error, "Decision making failed", now)
    }
}

/// Decision as a model actually writes it: any field may be missing and
/// enum-valued fields may hold labels outside the vocabulary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionReply {
    #[serde(default)]
    pub incident_id: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub actions_taken: Vec<String>,
    #[serde(default)]
    pub verification: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub should_escalate: Option<bool>,
    #[serde(default)]
    pub next_recommendation: Option<String>,
}

impl DecisionReply {
    /// Fill the gaps from the classified alert. Missing `should_escalate`
    /// becomes `true`.
    pub fn into_decision(self, alert: &AlertInfo, now: DateTime<Utc>) -> Decision {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        Decision {
            incident_id: non_empty(self.incident_id).unwrap_or_else(|| incident_id_at(now)),
            service: non_empty(self.service)
                .unwrap_or_else(|| alert.service().as_str().to_string()),
            severity: self
                .severity
                .as_deref()
                .and_then(Severity::from_label)
                .unwrap_or_else(|| alert.severity()),
            status: self
                .status
                .as_deref()
                .and_then(IncidentStatus::from_label)
                .unwrap_or(IncidentStatus::Investigating),
            root_cause: self.root_cause.unwrap_or_default(),
            confidence: self.confidence.map(clamp_confidence).unwrap_or(0.0),
            actions_taken: self.actions_taken,
            verification: self.verification,
            should_escalate: self.should_escalate.unwrap_or(true),
            next_recommendation: self.next_recommendation.unwrap_or_default(),
        }
    }
}
