//! Deterministic escalation override.
//!
//! Runs after the decision model on every path. If the original alert text
//! mentions any high-risk term, escalation is forced and the recommendation
//! replaced, whatever the model concluded. The scan reads `raw_alert`
//! directly: the classifier's `keywords` use a smaller vocabulary and would
//! miss terms such as "breach" or "checkout".

use crate::alert::AlertInfo;
use crate::escalation::decision::Decision;

pub const HIGH_RISK_TERMS: &[&str] = &[
    "data loss",
    "corruption",
    "irreversible",
    "payment",
    "billing",
    "checkout",
    "transaction",
    "revenue impact",
    "breach",
    "compromise",
    "unauthorized",
];

pub const CRITICAL_IMPACT_RECOMMENDATION: &str =
    "IMMEDIATE HUMAN ESCALATION: Critical business impact detected";

/// Result of one override pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// No high-risk term; the decision is untouched.
    NotTriggered,
    /// Escalation forced. `suppressed_by_model` is set when the model had
    /// decided not to escalate.
    Forced {
        terms: Vec<&'static str>,
        suppressed_by_model: bool,
    },
}

impl OverrideOutcome {
    pub fn is_forced(&self) -> bool {
        matches!(self, Self::Forced { .. })
    }
}

/// High-risk terms present in `raw_alert`, in vocabulary order.
pub fn high_risk_terms(raw_alert: &str) -> Vec<&'static str> {
    let lower = raw_alert.to_lowercase();
    HIGH_RISK_TERMS
        .iter()
        .copied()
        .filter(|term| lower.contains(term))
        .collect()
}

/// Apply the override to `decision` in place.
pub fn apply_escalation_override(alert: &AlertInfo, decision: &mut Decision) -> OverrideOutcome {
    let terms = high_risk_terms(alert.raw_alert());
    if terms.is_empty() {
        return OverrideOutcome::NotTriggered;
    }

    let suppressed_by_model = !decision.should_escalate;
    decision.should_escalate = true;
    decision.next_recommendation = CRITICAL_IMPACT_RECOMMENDATION.to_string();

    tracing::warn!(
        incident_id = %decision.incident_id,
        terms = ?terms,
        suppressed_by_model,
        "escalation override forced"
    );

    OverrideOutcome::Forced {
        terms,
        suppressed_by_model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::classify_alert;
    use crate::escalation::decision::{DecisionReply, IncidentStatus};
    use chrono::Utc;

    fn relaxed_decision(alert: &AlertInfo) -> Decision {
        let reply: DecisionReply = serde_json::from_str(
            r#"{"status":"resolved","should_escalate":false,
                "next_recommendation":"keep monitoring","confidence":0.95}"#,
        )
        .unwrap();
        reply.into_decision(alert, Utc::now())
    }

    #[test]
    fn high_risk_term_forces_escalation_over_model() {
        for text in [
            "Customer data loss after failover",
            "Possible credential compromise on admin panel",
            "UNAUTHORIZED access attempts succeeded",
            "checkout button unresponsive",
            "transaction queue stalled",
            "Security BREACH reported by vendor",
        ] {
            let alert = classify_alert(text);
            let mut d = relaxed_decision(&alert);
            let outcome = apply_escalation_override(&alert, &mut d);
            assert!(outcome.is_forced(), "{text}");
            assert!(d.should_escalate, "{text}");
            assert_eq!(d.next_recommendation, CRITICAL_IMPACT_RECOMMENDATION);
            // Only the escalation fields change.
            assert_eq!(d.status, IncidentStatus::Resolved);
        }
    }

    #[test]
    fn reports_terms_and_suppression() {
        let alert = classify_alert("Payment transactions failing, revenue impact growing");
        let mut d = relaxed_decision(&alert);
        let outcome = apply_escalation_override(&alert, &mut d);
        assert_eq!(
            outcome,
            OverrideOutcome::Forced {
                terms: vec!["payment", "transaction", "revenue impact"],
                suppressed_by_model: true,
            }
        );
    }

    #[test]
    fn already_escalated_is_not_suppressed() {
        let alert = classify_alert("billing export corrupted: corruption in ledger");
        let mut d = Decision::unparsed(&alert, Utc::now());
        let outcome = apply_escalation_override(&alert, &mut d);
        assert!(matches!(
            outcome,
            OverrideOutcome::Forced {
                suppressed_by_model: false,
                ..
            }
        ));
        assert_eq!(d.next_recommendation, CRITICAL_IMPACT_RECOMMENDATION);
    }

    #[test]
    fn no_term_leaves_decision_untouched() {
        let alert = classify_alert("gateway latency elevated");
        let mut d = relaxed_decision(&alert);
        let before = d.clone();
        assert_eq!(
            apply_escalation_override(&alert, &mut d),
            OverrideOutcome::NotTriggered
        );
        assert_eq!(d, before);
    }

    #[test]
    fn scan_uses_raw_text_not_classifier_keywords() {
        // "breach" is outside the classifier's keyword vocabulary.
        let alert = classify_alert("breach detected");
        assert!(alert.keywords().is_empty());
        assert_eq!(high_risk_terms(alert.raw_alert()), vec!["breach"]);
    }
}
