//! Integration tests for the deterministic half of triage.
//!
//! Drives classify → reply decode → override → record without any model,
//! validating that the escalation guarantee holds for whatever the model
//! claims.

use chrono::{TimeZone, Utc};
use coordination::escalation::{
    apply_escalation_override, high_risk_terms, CRITICAL_IMPACT_RECOMMENDATION,
    IMMEDIATE_ESCALATION,
};
use coordination::record::verify_and_store_at;
use coordination::{
    classify_alert, extract_json_object, gather_internal_context, Decision, DecisionReply,
    ExtractError, IncidentStatus, OverrideOutcome, ServiceStatus, Severity,
};

fn decide(alert_text: &str, reply_text: &str) -> (Decision, OverrideOutcome) {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 7, 0).unwrap();
    let alert = classify_alert(alert_text);
    let mut decision = match extract_json_object::<DecisionReply>(reply_text) {
        Ok(reply) => reply.into_decision(&alert, now),
        Err(ExtractError::NoJsonObject) => Decision::unparsed(&alert, now),
        Err(ExtractError::InvalidJson(_)) => {
            return (
                Decision::transport_failed(&alert, now),
                OverrideOutcome::NotTriggered,
            )
        }
    };
    let outcome = apply_escalation_override(&alert, &mut decision);
    (decision, outcome)
}

/// Test: the canonical payment outage is forced to escalate
#[test]
fn test_payment_outage_forced_over_model_refusal() {
    let (decision, outcome) = decide(
        "Payment processing completely down. All transactions failing with 500 errors. Revenue impact.",
        r#"Handled. {"should_escalate": false, "status": "mitigated", "severity": "low"}"#,
    );

    assert!(decision.should_escalate);
    assert_eq!(decision.next_recommendation, CRITICAL_IMPACT_RECOMMENDATION);
    // "mitigated" is outside the status vocabulary
    assert_eq!(decision.status, IncidentStatus::Investigating);
    assert_eq!(decision.severity, Severity::Low);
    assert_eq!(decision.incident_id, "inc-2026-10-19-1407");
    assert_eq!(
        outcome,
        OverrideOutcome::Forced {
            terms: vec!["payment", "transaction", "revenue impact"],
            suppressed_by_model: true,
        }
    );
}

/// Test: the override only inspects alert text, never the model's fields
#[test]
fn test_risk_terms_in_reply_do_not_trigger() {
    let (decision, outcome) = decide(
        "search indexer lagging",
        r#"{"should_escalate": false, "root_cause": "possible data loss in payment ledger"}"#,
    );
    assert!(!decision.should_escalate);
    assert_eq!(outcome, OverrideOutcome::NotTriggered);
}

/// Test: override agrees with an escalating model without flagging suppression
#[test]
fn test_agreeing_model_is_not_marked_suppressed() {
    let (decision, outcome) = decide(
        "Unauthorized access to billing exports",
        r#"{"should_escalate": true, "next_recommendation": "page security"}"#,
    );
    assert!(decision.should_escalate);
    assert_eq!(decision.next_recommendation, CRITICAL_IMPACT_RECOMMENDATION);
    assert!(matches!(
        outcome,
        OverrideOutcome::Forced {
            suppressed_by_model: false,
            ..
        }
    ));
}

/// Test: unusable reply falls back to escalate-by-default
#[test]
fn test_unusable_reply_escalates() {
    let (decision, outcome) = decide("core latency elevated", "model went silent");
    assert!(decision.should_escalate);
    assert_eq!(decision.status, IncidentStatus::Ongoing);
    assert_eq!(decision.next_recommendation, IMMEDIATE_ESCALATION);
    assert_eq!(outcome, OverrideOutcome::NotTriggered);
}

/// Test: undecodable reply is an error decision that still escalates
#[test]
fn test_undecodable_reply_is_error_decision() {
    let (decision, outcome) = decide("billing export failing", r#"{"should_escalate": nope}"#);
    assert!(decision.should_escalate);
    assert_eq!(decision.status, IncidentStatus::Error);
    assert_eq!(decision.root_cause, "Decision making failed");
    assert_eq!(decision.next_recommendation, IMMEDIATE_ESCALATION);
    assert_eq!(outcome, OverrideOutcome::NotTriggered);
}

/// Test: high-risk matching is case-insensitive
#[test]
fn test_high_risk_terms_case_insensitive() {
    assert_eq!(
        high_risk_terms("SECURITY BREACH and Data Loss reported"),
        vec!["data loss", "breach"]
    );
}

/// Test: record reflects the final decision after the override
#[test]
fn test_record_after_override() {
    let (decision, _) = decide(
        "Checkout database corruption detected",
        r#"{"service": "checkout db", "severity": "high", "should_escalate": false,
            "root_cause": "bad migration"}"#,
    );
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 8, 0).unwrap();
    let stored = verify_and_store_at(&decision, now);

    assert!(stored.stored);
    assert!(stored.verification.verified);
    assert!(stored.verification.metrics_checked);
    assert_eq!(stored.verification.status_confirmed, IncidentStatus::Investigating);

    let rec = &stored.incident_record;
    assert_eq!(rec.service, "checkout db");
    assert_eq!(rec.severity, Severity::High);
    assert_eq!(rec.root_cause, "bad migration");
    assert_eq!(rec.keywords, vec!["checkout", "db", "high"]);
    assert_eq!(rec.timestamp, "2026-10-19T14:08:00.000000Z");
    assert!(decision.should_escalate);
}

/// Test: internal context is templated from the classification
#[test]
fn test_context_tracks_classification() {
    let alert = classify_alert("auth timeout failure");
    let ctx = gather_internal_context(&alert);
    assert_eq!(ctx.service_status, ServiceStatus::Operational);
    assert!(ctx.recent_logs.contains("auth"));
    assert!(ctx.similar_incidents.ends_with("failure, timeout, auth"));
}
