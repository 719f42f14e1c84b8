//! Top-level triage orchestrator.
//!
//! ```text
//! alert ─► reject blank
//!       └► classify ─► gather context ─► reason ─┬─► fetch knowledge ─┬─► decide ─► record
//!                                                └──(not needed)──────┘
//! ```
//!
//! Stages run strictly one after another. Each stage recovers its own model or
//! search failures; anything that still escapes (a `PipelineError`, or the
//! execution budget running out) is turned into an escalate-by-default error
//! payload here, so `run` always returns something a pager can act on.

use std::time::Duration;

use coordination::{
    classify_alert, gather_internal_context, generate_incident_id, verify_and_store, AlertInfo,
    InternalContext, Reasoning, StoredIncident,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, info_span, warn, Instrument};

use crate::config::TriageConfig;
use crate::decision::{make_decision, DecisionOutcome};
use crate::errors::PipelineError;
use crate::knowledge::{fetch_external_knowledge, SearchRequest};
use crate::model::ModelClient;
use crate::prompts::PROMPT_VERSION;
use crate::reasoner::reason;
use crate::search::SearchProvider;

pub const NO_ALERT_MESSAGE: &str = "No alert description provided";

/// Everything produced for one alert.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub alert: AlertInfo,
    pub internal_context: InternalContext,
    pub reasoning: Reasoning,
    pub external_knowledge: Option<String>,
    pub outcome: DecisionOutcome,
    pub stored: StoredIncident,
}

impl TriageReport {
    /// `"<summary>\n\n<pretty decision JSON>"`.
    pub fn render(&self) -> Result<String, PipelineError> {
        let decision_json = serde_json::to_string_pretty(&self.outcome.decision)
            .map_err(|e| PipelineError::serialize("decision", e))?;
        Ok(format!("{}\n\n{}", self.outcome.summary, decision_json))
    }
}

/// Payload for blank input. Returned before any stage runs.
pub fn rejection_payload() -> String {
    json!({ "error": NO_ALERT_MESSAGE }).to_string()
}

/// Escalate-by-default payload for failures that escaped every stage.
pub fn failure_payload(err: &PipelineError) -> String {
    let payload = json!({
        "error": err.to_string(),
        "incident_id": generate_incident_id(),
        "status": "error",
        "should_escalate": true,
    });
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
}

pub struct TriagePipeline {
    model: Box<dyn ModelClient>,
    search: Box<dyn SearchProvider>,
    search_request: SearchRequest,
    budget: Duration,
}

impl TriagePipeline {
    pub fn new(
        model: Box<dyn ModelClient>,
        search: Box<dyn SearchProvider>,
        config: &TriageConfig,
    ) -> Self {
        Self {
            model,
            search,
            search_request: SearchRequest::from(&config.search),
            budget: config.execution_budget(),
        }
    }

    /// Override the execution budget (useful for tests).
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Entry point: alert text in, rendered decision or JSON error out.
    pub async fn run(&self, alert_description: &str) -> String {
        if alert_description.trim().is_empty() {
            warn!("rejecting blank alert");
            return rejection_payload();
        }

        let result = match tokio::time::timeout(self.budget, self.triage(alert_description)).await
        {
            Ok(result) => result,
            Err(_) => Err(PipelineError::BudgetExceeded(self.budget.as_secs())),
        };

        match result.and_then(|report| report.render()) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(error = %e, "triage pipeline failed; escalating by default");
                failure_payload(&e)
            }
        }
    }

    /// Run all stages and keep every intermediate result.
    ///
    /// Input is trimmed first; blank input is the caller's responsibility
    /// (see [`TriagePipeline::run`]).
    pub async fn triage(&self, alert_description: &str) -> Result<TriageReport, PipelineError> {
        let span = info_span!("triage", prompt_version = PROMPT_VERSION);
        async move {
            let alert = classify_alert(alert_description.trim());
            info!(
                stage = "classify",
                service = %alert.service(),
                severity = %alert.severity(),
                keywords = ?alert.keywords(),
                error_codes = ?alert.error_codes(),
                "alert classified"
            );

            let internal_context = gather_internal_context(&alert);

            let reasoning = reason(self.model.as_ref(), &alert, &internal_context).await?;

            let external_knowledge = fetch_external_knowledge(
                self.search.as_ref(),
                self.search_request,
                &alert,
                &reasoning,
            )
            .await;

            let outcome = make_decision(
                self.model.as_ref(),
                &alert,
                &internal_context,
                &reasoning,
                external_knowledge.as_deref(),
            )
            .await?;

            let stored = verify_and_store(&outcome.decision);
            info!(
                stage = "record",
                incident_id = %stored.incident_record.incident_id,
                escalate = outcome.decision.should_escalate,
                "incident recorded"
            );

            Ok(TriageReport {
                alert,
                internal_context,
                reasoning,
                external_knowledge,
                outcome,
                stored,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModelClient;
    use crate::search::MockSearchProvider;

    fn config() -> TriageConfig {
        let mut cfg = TriageConfig::default();
        cfg.search.num_results = 5;
        cfg.execution_budget_secs = 300;
        cfg
    }

    #[tokio::test]
    async fn blank_input_touches_no_boundary() {
        let mut model = MockModelClient::new();
        model.expect_invoke().times(0);
        let mut search = MockSearchProvider::new();
        search.expect_search().times(0);
        let pipeline = TriagePipeline::new(Box::new(model), Box::new(search), &config());

        for input in ["", "   ", "\n\t "] {
            let out = pipeline.run(input).await;
            let v: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(v, json!({ "error": "No alert description provided" }));
        }
    }

    #[tokio::test]
    async fn input_is_trimmed_before_classification() {
        let mut model = MockModelClient::new();
        model
            .expect_invoke()
            .returning(|_| Ok("{\"needs_external_knowledge\": false}".to_string()));
        let search = MockSearchProvider::new();
        let pipeline = TriagePipeline::new(Box::new(model), Box::new(search), &config());

        let report = pipeline.triage("  auth down  \n").await.unwrap();
        assert_eq!(report.alert.raw_alert(), "auth down");
        assert!(report.external_knowledge.is_none());
    }

    #[test]
    fn failure_payload_escalates() {
        let out = failure_payload(&PipelineError::BudgetExceeded(300));
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["should_escalate"], true);
        assert_eq!(v["error"], "execution budget of 300s exceeded");
        assert!(v["incident_id"].as_str().unwrap().starts_with("inc-"));
    }
}
