//! External search boundary.
//!
//! `SearchProvider` hides the search vendor; `ExaSearch` is the production
//! implementation over Exa's HTTP API.

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::{SearchConfig, ENV_SEARCH_API_KEY};
use crate::errors::TransportError;

/// Retrieval strategy requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Neural,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neural => write!(f, "neural"),
        }
    }
}

/// One ranked result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: String,
    pub snippet: Option<String>,
    pub text: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchHit>, TransportError>;
}

// ── Exa ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaRequest<'a> {
    query: &'a str,
    num_results: usize,
    #[serde(rename = "type")]
    mode: SearchMode,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaContents {
    text: bool,
    highlights: ExaHighlights,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaHighlights {
    num_sentences: u32,
}

#[derive(Debug, Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
struct ExaResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    highlights: Vec<String>,
}

impl From<ExaResult> for SearchHit {
    fn from(r: ExaResult) -> Self {
        Self {
            title: r.title,
            url: r.url,
            snippet: r.highlights.into_iter().next(),
            text: r.text,
        }
    }
}

pub struct ExaSearch {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl ExaSearch {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for ExaSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchHit>, TransportError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TransportError::MissingCredential(ENV_SEARCH_API_KEY))?;

        let body = ExaRequest {
            query,
            num_results,
            mode,
            contents: ExaContents {
                text: true,
                highlights: ExaHighlights { num_sentences: 3 },
            },
        };

        let resp = self
            .http
            .post(&self.url)
            .header("x-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransportError::Auth(format!("search provider returned {status}")));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ExaResponse = resp.json().await?;
        Ok(parsed.results.into_iter().map(SearchHit::from).collect())
    }
}
