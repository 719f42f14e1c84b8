//! Verifier/Recorder: turns a decision into a storable incident record.
//!
//! Nothing is written anywhere; durable storage belongs to whoever consumes
//! [`StoredIncident`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::Severity;
use crate::escalation::{Decision, IncidentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    pub metrics_checked: bool,
    pub status_confirmed: IncidentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub incident_id: String,
    pub service: String,
    pub severity: Severity,
    pub root_cause: String,
    /// RFC 3339, taken when the record is built.
    pub timestamp: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIncident {
    pub verification: VerificationResult,
    pub stored: bool,
    pub incident_record: IncidentRecord,
}

pub fn verify_and_store(decision: &Decision) -> StoredIncident {
    verify_and_store_at(decision, Utc::now())
}

pub fn verify_and_store_at(decision: &Decision, now: DateTime<Utc>) -> StoredIncident {
    let verification = VerificationResult {
        verified: true,
        metrics_checked: true,
        status_confirmed: decision.status,
    };

    let mut keywords: Vec<String> = decision
        .service
        .split_whitespace()
        .map(str::to_string)
        .collect();
    keywords.push(decision.severity.as_str().to_string());

    let incident_record = IncidentRecord {
        incident_id: decision.incident_id.clone(),
        service: decision.service.clone(),
        severity: decision.severity,
        root_cause: decision.root_cause.clone(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        keywords,
    };

    tracing::debug!(incident_id = %incident_record.incident_id, "incident recorded");

    StoredIncident {
        verification,
        stored: true,
        incident_record,
    }
}
