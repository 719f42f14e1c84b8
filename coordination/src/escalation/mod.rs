//! Escalation decision types and the deterministic override.
//!
//! ```text
//! decision model reply ──► DecisionReply ──► Decision ──► apply_escalation_override ──► Decision
//!          │ (unusable)                         ▲
//!          └──────────► Decision::unparsed ─────┘
//! ```
//!
//! The model's `should_escalate` is advisory. The override is the enforcement
//! point: for high-risk alert text it always wins.

pub mod decision;
pub mod override_policy;

pub use decision::{
    generate_incident_id, incident_id_at, Decision, DecisionReply, IncidentStatus,
    IMMEDIATE_ESCALATION,
};
pub use override_policy::{
    apply_escalation_override, high_risk_terms, OverrideOutcome, CRITICAL_IMPACT_RECOMMENDATION,
    HIGH_RISK_TERMS,
};
