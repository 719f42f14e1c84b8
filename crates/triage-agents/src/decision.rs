//! Decision Maker: final model call plus the deterministic override.
//!
//! ```text
//! prompt ──► model ──┬─ Ok(text) ──► extract JSON ──┬─ DecisionReply ─► Decision ─┐
//!                    │                              └─ no span: Decision::unparsed┤
//!                    │                                                            ▼
//!                    │                                          apply_escalation_override
//!                    │                                                            │
//!                    │           undecodable span ─┐                              │
//!                    └─ Err ───────────────────────┴─► Decision::transport_failed─┤
//!                                                                                 ▼
//!                                                                      DecisionOutcome
//! ```
//!
//! The override runs on the success and no-span paths only. The failed-call
//! decision already escalates and keeps its fixed recommendation.

use chrono::Utc;
use coordination::escalation::apply_escalation_override;
use coordination::{
    extract_json_object, leading_prose, AlertInfo, Decision, DecisionReply, ExtractError,
    InternalContext, OverrideOutcome, Reasoning,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::PipelineError;
use crate::model::ModelClient;
use crate::prompts;

/// Characters of a brace-free reply used as the summary.
pub const SUMMARY_FALLBACK_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    pub summary: String,
    pub decision: Decision,
    #[serde(skip)]
    pub override_outcome: OverrideOutcome,
}

/// Turn a successful model reply into a decision (before the override).
///
/// A reply with no JSON object fails safe to `Decision::unparsed`. A JSON
/// object that does not decode is returned as an error and handled like a
/// failed model call.
pub fn parse_decision(response: &str, alert: &AlertInfo) -> Result<Decision, ExtractError> {
    let now = Utc::now();
    match extract_json_object::<DecisionReply>(response) {
        Ok(reply) => Ok(reply.into_decision(alert, now)),
        Err(ExtractError::NoJsonObject) => {
            warn!("decision reply had no JSON object; failing safe");
            Ok(Decision::unparsed(alert, now))
        }
        Err(e) => Err(e),
    }
}

/// Run the decision stage.
pub async fn make_decision(
    model: &dyn ModelClient,
    alert: &AlertInfo,
    context: &InternalContext,
    reasoning: &Reasoning,
    external_knowledge: Option<&str>,
) -> Result<DecisionOutcome, PipelineError> {
    let prompt = prompts::decision_prompt(alert, context, reasoning, external_knowledge)?;
    debug!(prompt_chars = prompt.len(), "decision prompt built");

    let parsed = match model.invoke(&prompt).await {
        Ok(text) => parse_decision(&text, alert)
            .map(|decision| (leading_prose(&text, SUMMARY_FALLBACK_CHARS), decision))
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    let (summary, decision, override_outcome) = match parsed {
        Ok((summary, mut decision)) => {
            let outcome = apply_escalation_override(alert, &mut decision);
            (summary, decision, outcome)
        }
        Err(e) => {
            warn!(error = %e, "decision stage failed; escalating");
            (
                format!("Error during decision making: {e}"),
                Decision::transport_failed(alert, Utc::now()),
                OverrideOutcome::NotTriggered,
            )
        }
    };

    info!(
        stage = "decide",
        incident_id = %decision.incident_id,
        status = %decision.status,
        should_escalate = decision.should_escalate,
        overridden = override_outcome.is_forced(),
        "decision complete"
    );

    Ok(DecisionOutcome {
        summary,
        decision,
        override_outcome,
    })
}
