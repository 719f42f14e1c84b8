//! Deterministic core of the incident-triage pipeline.
//!
//! Everything in this crate is model-free and side-effect-free:
//!
//! - `alert`: free text to typed [`AlertInfo`] (service, severity, keywords, error codes)
//! - `context`: templated internal-context snapshot
//! - `extract`: first-`{`-to-last-`}` JSON extraction from model output
//! - `reasoning`: root-cause hypothesis type and its degraded variants
//! - `escalation`: decision wire type, fail-safe decisions, keyword override
//! - `record`: verification stub and incident record
//!
//! Model and search calls live in `triage-agents`.

pub mod alert;
pub mod context;
pub mod escalation;
pub mod extract;
pub mod reasoning;
pub mod record;

pub use alert::{classify_alert, AlertInfo, KnownService, Service, Severity, SeverityMatch};
pub use context::{gather_internal_context, InternalContext, ServiceStatus};
pub use escalation::{
    apply_escalation_override, generate_incident_id, Decision, DecisionReply, IncidentStatus,
    OverrideOutcome,
};
pub use extract::{extract_json_object, leading_prose, truncate_chars, ExtractError};
pub use reasoning::Reasoning;
pub use record::{verify_and_store, IncidentRecord, StoredIncident, VerificationResult};
