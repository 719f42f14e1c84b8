//! Runtime configuration for model, search, and execution budget.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Environment variables (`TRIAGE_MODEL`, `GROQ_API_KEY`, ...)
//! 2. Built-in defaults (Llama 3.3 70B on Groq, Exa neural search, 300 s budget)

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::search::SearchMode;

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_MODEL_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TEMPERATURE: f64 = 0.1;
const DEFAULT_SEARCH_URL: &str = "https://api.exa.ai/search";
const DEFAULT_SEARCH_RESULTS: usize = 5;
const DEFAULT_EXECUTION_BUDGET_SECS: u64 = 300;

const ENV_MODEL: &str = "TRIAGE_MODEL";
const ENV_MODEL_BASE_URL: &str = "TRIAGE_MODEL_BASE_URL";
pub const ENV_MODEL_API_KEY: &str = "GROQ_API_KEY";
const ENV_TEMPERATURE: &str = "TRIAGE_TEMPERATURE";
const ENV_SEARCH_URL: &str = "TRIAGE_SEARCH_URL";
pub const ENV_SEARCH_API_KEY: &str = "EXA_API_KEY";
const ENV_SEARCH_RESULTS: &str = "TRIAGE_SEARCH_RESULTS";
const ENV_EXECUTION_BUDGET: &str = "TRIAGE_EXECUTION_BUDGET_SECS";

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// OpenAI-compatible chat endpoint used for both reasoning and decision calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: env::var(ENV_MODEL_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_MODEL_BASE_URL.to_string()),
            model: env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: env::var(ENV_MODEL_API_KEY).ok(),
            temperature: env_or(ENV_TEMPERATURE, DEFAULT_TEMPERATURE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub num_results: usize,
    pub mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: env::var(ENV_SEARCH_URL).unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string()),
            api_key: env::var(ENV_SEARCH_API_KEY).ok(),
            num_results: env_or(ENV_SEARCH_RESULTS, DEFAULT_SEARCH_RESULTS),
            mode: SearchMode::Neural,
        }
    }
}

/// Top-level configuration consumed by the pipeline and the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    pub model: ModelConfig,
    pub search: SearchConfig,
    /// Wall-clock budget for one alert, end to end.
    pub execution_budget_secs: u64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            search: SearchConfig::default(),
            execution_budget_secs: env_or(ENV_EXECUTION_BUDGET, DEFAULT_EXECUTION_BUDGET_SECS),
        }
    }
}

impl TriageConfig {
    /// Build from environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn execution_budget(&self) -> Duration {
        Duration::from_secs(self.execution_budget_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.model.temperature) {
            return Err(ConfigError(format!(
                "temperature must be in [0, 1], got {}",
                self.model.temperature
            )));
        }
        if self.model.model.trim().is_empty() {
            return Err(ConfigError("model name must not be empty".to_string()));
        }
        if self.search.num_results == 0 {
            return Err(ConfigError("search num_results must be > 0".to_string()));
        }
        if self.execution_budget_secs == 0 {
            return Err(ConfigError("execution budget must be > 0".to_string()));
        }
        Ok(())
    }
}
