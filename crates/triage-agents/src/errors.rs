//! Error taxonomy for the triage agents.
//!
//! | Error            | Raised by                     | Crosses a stage boundary? |
//! |------------------|-------------------------------|---------------------------|
//! | `TransportError` | `ModelClient`, `SearchProvider` | no (stage recovers)     |
//! | `PipelineError`  | orchestrator internals        | yes, caught by `run`      |
//! | `ConfigError`    | `TriageConfig::validate`      | binary edge only          |
//!
//! There is no retry classification: a failed call is converted into a
//! degraded, escalation-biased value exactly once.

use thiserror::Error;

/// Failure at the model or search boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The required credential was not supplied.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Provider rejected the credential.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network / connection / timeout failure.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success HTTP status.
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider's envelope (not the model's text) could not be decoded.
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// An error that escaped every stage-local fallback.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("execution budget of {0}s exceeded")]
    BudgetExceeded(u64),
}

impl PipelineError {
    pub fn serialize(what: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize { what, source }
    }
}

#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_messages() {
        assert_eq!(
            TransportError::MissingCredential("EXA_API_KEY").to_string(),
            "missing credential: EXA_API_KEY is not set"
        );
        let err = TransportError::Status {
            status: 429,
            body: "slow down".into(),
        };
        assert_eq!(err.to_string(), "provider returned 429: slow down");
    }

    #[test]
    fn budget_message() {
        assert_eq!(
            PipelineError::BudgetExceeded(300).to_string(),
            "execution budget of 300s exceeded"
        );
    }
}
