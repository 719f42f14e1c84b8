//! Knowledge Fetcher: external search when internal knowledge runs out.
//!
//! Skipped entirely unless the reasoner set `needs_external_knowledge`.
//! Search failures never propagate: they become part of the knowledge text
//! the decision model reads.

use coordination::{truncate_chars, AlertInfo, Reasoning};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::search::{SearchHit, SearchMode, SearchProvider};

pub const MAX_QUERY_CHARS: usize = 200;
pub const ROOT_CAUSE_QUERY_CHARS: usize = 50;
pub const QUERY_KEYWORDS: usize = 3;
pub const SNIPPET_CHARS: usize = 400;
pub const NO_RESULTS: &str = "No relevant external knowledge found.";

/// Parameters forwarded to the search boundary.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest {
    pub num_results: usize,
    pub mode: SearchMode,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            num_results: 5,
            mode: SearchMode::Neural,
        }
    }
}

impl From<&SearchConfig> for SearchRequest {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            num_results: cfg.num_results,
            mode: cfg.mode,
        }
    }
}

/// `service kw1 kw2 kw3 <root cause prefix>`, capped at 200 characters.
pub fn build_query(alert: &AlertInfo, reasoning: &Reasoning) -> String {
    let service = alert.service().as_str();
    let mut parts: Vec<String> = vec![service.to_string()];
    parts.extend(
        alert
            .keywords()
            .iter()
            .take(QUERY_KEYWORDS)
            .map(|k| k.to_string()),
    );
    if !reasoning.probable_root_cause.is_empty() {
        parts.push(truncate_chars(
            &reasoning.probable_root_cause,
            ROOT_CAUSE_QUERY_CHARS,
        ));
    }

    let query = join_capped(parts);
    if query.is_empty() {
        format!("{service} outage root cause")
    } else {
        query
    }
}

/// Space-join the non-empty parts, capped at [`MAX_QUERY_CHARS`].
fn join_capped(parts: Vec<String>) -> String {
    let joined = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined, MAX_QUERY_CHARS)
}

fn format_hit(hit: &SearchHit) -> String {
    let body = hit
        .snippet
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(hit.text.as_deref())
        .unwrap_or("");
    format!(
        "Title: {}\nURL: {}\nSnippet: {}",
        hit.title.as_deref().unwrap_or(""),
        hit.url,
        truncate_chars(body, SNIPPET_CHARS)
    )
}

/// Render hits as `Title/URL/Snippet` blocks separated by a blank line.
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }
    hits.iter().map(format_hit).collect::<Vec<_>>().join("\n\n")
}

/// Run the knowledge stage. `None` means the stage was skipped.
pub async fn fetch_external_knowledge(
    search: &dyn SearchProvider,
    request: SearchRequest,
    alert: &AlertInfo,
    reasoning: &Reasoning,
) -> Option<String> {
    if !reasoning.needs_external_knowledge {
        debug!("internal knowledge sufficient; skipping external search");
        return None;
    }

    let query = build_query(alert, reasoning);
    debug!(query = %query, "external search query");

    let knowledge = match search
        .search(&query, request.num_results, request.mode)
        .await
    {
        Ok(hits) => {
            info!(stage = "knowledge", hits = hits.len(), "external search complete");
            format_hits(&hits)
        }
        Err(e) => {
            warn!(error = %e, "external search failed");
            format!("Exa search failed: {e}")
        }
    };
    Some(knowledge)
}
