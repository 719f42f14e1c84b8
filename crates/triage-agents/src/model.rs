//! Language-model boundary.
//!
//! Stages only ever see `ModelClient`: a prompt goes in, free text comes out.
//! The trait exists so tests can inject canned responses without an inference
//! endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::config::{ModelConfig, ENV_MODEL_API_KEY};
use crate::errors::TransportError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a single-turn prompt; return the model's raw text.
    async fn invoke(&self, prompt: &str) -> Result<String, TransportError>;
}

/// Production implementation backed by a Rig OpenAI-compatible client
/// (Groq by default).
pub struct RigModelClient {
    client: openai::CompletionsClient,
    model: String,
    temperature: f64,
}

impl RigModelClient {
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .with_context(|| format!("{ENV_MODEL_API_KEY} must be set for the model client"))?;

        let client = openai::CompletionsClient::builder()
            .api_key(api_key)
            .base_url(&config.base_url)
            .build()
            .with_context(|| format!("Failed to build model client ({})", config.base_url))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ModelClient for RigModelClient {
    async fn invoke(&self, prompt: &str) -> Result<String, TransportError> {
        let agent = self
            .client
            .agent(&self.model)
            .temperature(self.temperature)
            .build();

        let prompt = prompt.to_string();
        agent
            .prompt(&prompt)
            .await
            .map_err(|e| classify_prompt_error(&e.to_string()))
    }
}

fn classify_prompt_error(message: &str) -> TransportError {
    let lower = message.to_lowercase();
    if lower.contains("401") || lower.contains("unauthorized") || lower.contains("invalid api key")
    {
        TransportError::Auth(message.to_string())
    } else {
        TransportError::Request(message.to_string())
    }
}
