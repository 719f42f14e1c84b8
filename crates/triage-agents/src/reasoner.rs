//! Reasoner: root-cause hypothesis from the model.
//!
//! ## Fallbacks
//!
//! | Situation                          | Result                                   |
//! |------------------------------------|------------------------------------------|
//! | JSON object decoded                | model's `Reasoning` (confidence clamped) |
//! | reply without any `{...}`          | `Reasoning::unparsed` (confidence 0.5)   |
//! | `{...}` present but not decodable  | `Reasoning::failed` with decode error    |
//! | model call failed                  | `Reasoning::failed` with transport error |
//!
//! Every fallback asks for external knowledge.

use coordination::{extract_json_object, AlertInfo, ExtractError, InternalContext, Reasoning};
use tracing::{debug, info, warn};

use crate::errors::PipelineError;
use crate::model::ModelClient;
use crate::prompts;

/// Interpret a raw model reply.
pub fn parse_reasoning(response: &str) -> Reasoning {
    match extract_json_object::<Reasoning>(response) {
        Ok(reasoning) => reasoning,
        Err(ExtractError::NoJsonObject) => {
            warn!("reasoning reply had no JSON object; using raw text");
            Reasoning::unparsed(response)
        }
        Err(e @ ExtractError::InvalidJson(_)) => {
            warn!(error = %e, "reasoning reply JSON did not decode");
            Reasoning::failed(e.to_string())
        }
    }
}

/// Run the reasoning stage.
///
/// Only prompt construction can fail; model and parse failures come back as
/// degraded `Reasoning` values.
pub async fn reason(
    model: &dyn ModelClient,
    alert: &AlertInfo,
    context: &InternalContext,
) -> Result<Reasoning, PipelineError> {
    let prompt = prompts::reasoning_prompt(alert, context)?;
    debug!(prompt_chars = prompt.len(), "reasoning prompt built");

    let reasoning = match model.invoke(&prompt).await {
        Ok(text) => parse_reasoning(&text),
        Err(e) => {
            warn!(error = %e, "reasoning model call failed");
            Reasoning::failed(e.to_string())
        }
    };

    info!(
        stage = "reason",
        confidence = reasoning.confidence,
        is_familiar = reasoning.is_familiar,
        needs_external_knowledge = reasoning.needs_external_knowledge,
        "reasoning complete"
    );
    Ok(reasoning)
}
