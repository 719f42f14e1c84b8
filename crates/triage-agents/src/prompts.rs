//! Prompt builders for the reasoning and decision model calls.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever prompt content changes so
//! logged decisions can be traced back to the wording that produced them.

use coordination::{AlertInfo, InternalContext, Reasoning};
use serde::Serialize;

use crate::errors::PipelineError;

/// Prompt version. Bump on any prompt content change.
pub const PROMPT_VERSION: &str = "1.2.0";

/// Stand-in for the external-knowledge section when the fetcher was skipped.
pub const NO_EXTERNAL_KNOWLEDGE: &str = "No external knowledge available.";

/// Escalation policy as stated to the decision model. Advisory only; the
/// binding rule is `coordination::escalation::apply_escalation_override`.
pub const ESCALATION_POLICY: &str = "\
ESCALATION RULES (these override everything else):
- ESCALATE IMMEDIATELY if any of the following holds:
  - The alert mentions \"data loss\", \"corruption\", \"irreversible\", or \"migration failed\"
  - Payment, billing, checkout, transactions, or revenue are affected
  - Security breach, unauthorized access, or compromise
  - Full outage of a core service (100% failure)
  - Severity is \"critical\" AND status is \"ongoing\"
- Otherwise escalate only if confidence < 0.6 OR the pattern is completely unfamiliar";

fn pretty<T: Serialize>(what: &'static str, value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value).map_err(|e| PipelineError::serialize(what, e))
}

pub fn reasoning_prompt(
    alert: &AlertInfo,
    context: &InternalContext,
) -> Result<String, PipelineError> {
    let alert_json = pretty("alert info", alert)?;
    let context_json = pretty("internal context", context)?;

    Ok(format!(
        "You are an on-call engineer analyzing a production incident.

ALERT INFORMATION:
{alert_json}

INTERNAL CONTEXT:
{context_json}

Work out:
1. What is most likely happening?
2. What is the most probable root cause?
3. How confident are you (0.0-1.0)?
4. Is this a familiar pattern or a new one?

Respond with valid JSON:
{{
  \"likely_issue\": \"brief description\",
  \"probable_root_cause\": \"explanation\",
  \"confidence\": 0.0-1.0,
  \"is_familiar\": true/false,
  \"needs_external_knowledge\": true/false
}}
"
    ))
}

pub fn decision_prompt(
    alert: &AlertInfo,
    context: &InternalContext,
    reasoning: &Reasoning,
    external_knowledge: Option<&str>,
) -> Result<String, PipelineError> {
    let alert_json = pretty("alert info", alert)?;
    let context_json = pretty("internal context", context)?;
    let reasoning_json = pretty("reasoning", reasoning)?;
    let external = external_knowledge.unwrap_or(NO_EXTERNAL_KNOWLEDGE);

    Ok(format!(
        "You are an on-call engineer making the final call on a production incident.

ALERT: {alert_json}
INTERNAL CONTEXT: {context_json}
INITIAL REASONING: {reasoning_json}
EXTERNAL KNOWLEDGE: {external}

Provide:
1. A ONE-PARAGRAPH SUMMARY
2. Valid JSON with exactly these fields:

{{
  \"incident_id\": \"inc-YYYY-MM-DD-HHMM\",
  \"service\": \"service-name\",
  \"severity\": \"critical|high|medium|low\",
  \"status\": \"ongoing|resolved|investigating\",
  \"root_cause\": \"detailed explanation\",
  \"confidence\": 0.0-1.0,
  \"actions_taken\": [\"action1\", \"action2\"],
  \"verification\": {{\"metric\": \"value\"}},
  \"should_escalate\": true/false,
  \"next_recommendation\": \"what to do next\"
}}

{ESCALATION_POLICY}

Output valid JSON only after the summary. No trailing commas.
"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordination::{classify_alert, gather_internal_context};

    #[test]
    fn reasoning_prompt_embeds_alert_and_context() {
        let alert = classify_alert("auth 401 spike");
        let ctx = gather_internal_context(&alert);
        let prompt = reasoning_prompt(&alert, &ctx).unwrap();
        assert!(prompt.contains("\"service\": \"auth\""));
        assert!(prompt.contains("\"error_codes\": [\n    \"401\"\n  ]"));
        assert!(prompt.contains("\"raw_alert\": \"auth 401 spike\""));
        assert!(prompt.contains("Recent logs for auth"));
        assert!(prompt.contains("\"needs_external_knowledge\": true/false"));
    }

    #[test]
    fn decision_prompt_uses_placeholder_when_no_knowledge() {
        let alert = classify_alert("core outage");
        let ctx = gather_internal_context(&alert);
        let reasoning = Reasoning::failed("boom");
        let prompt = decision_prompt(&alert, &ctx, &reasoning, None).unwrap();
        assert!(prompt.contains("EXTERNAL KNOWLEDGE: No external knowledge available."));
        assert!(prompt.contains("Severity is \"critical\" AND status is \"ongoing\""));
        assert!(prompt.contains("\"next_recommendation\": \"what to do next\""));
    }

    #[test]
    fn decision_prompt_includes_fetched_knowledge() {
        let alert = classify_alert("core outage");
        let ctx = gather_internal_context(&alert);
        let reasoning = Reasoning::unparsed("?");
        let prompt =
            decision_prompt(&alert, &ctx, &reasoning, Some("Title: known issue")).unwrap();
        assert!(prompt.contains("EXTERNAL KNOWLEDGE: Title: known issue"));
    }
}
