// src/ingest/enrich.rs
//! Content-fetch boundary. The fetcher itself (HTTP, HTML extraction) lives
//! outside this crate; this module decides which articles to try and how a
//! fetched body is applied.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ingest::types::Article;
use crate::relevance::anon_hash;
use crate::text::{collapse_whitespace, truncate_with_ellipsis};
use crate::urls::UrlCanonicalizer;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentConfig {
    /// Fetch attempts per run.
    #[serde(default = "default_max_to_fetch")]
    pub max_to_fetch: usize,
    /// Body budget in characters; longer bodies are cut and get `...`.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Shorter bodies count as a failed fetch.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

fn default_max_to_fetch() -> usize {
    25
}
fn default_max_chars() -> usize {
    1500
}
fn default_min_chars() -> usize {
    100
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_to_fetch: default_max_to_fetch(),
            max_chars: default_max_chars(),
            min_chars: default_min_chars(),
        }
    }
}

/// Fetches readable body text for an article URL. `Ok(None)` means nothing usable.
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_body(&self, url: &str) -> Result<Option<String>>;
}

/// Apply a fetched body. Returns false (article untouched) if it is too short.
pub fn apply_body(article: &mut Article, body: &str, cfg: &EnrichmentConfig) -> bool {
    let text = collapse_whitespace(body);
    if text.chars().count() < cfg.min_chars {
        return false;
    }
    article.summary = truncate_with_ellipsis(&text, cfg.max_chars);
    article.enriched = true;
    true
}

/// Try the first `max_to_fetch` fetchable, not yet enriched articles.
/// Fetch errors leave the article as it was. Returns how many were enriched.
pub async fn enrich_articles(
    articles: &mut [Article],
    fetcher: &dyn ContentFetcher,
    canonicalizer: &UrlCanonicalizer,
    cfg: &EnrichmentConfig,
) -> usize {
    let mut attempted = 0usize;
    let mut enriched = 0usize;

    for article in articles.iter_mut() {
        if attempted >= cfg.max_to_fetch {
            break;
        }
        if article.enriched || !canonicalizer.is_fetchable(&article.url) {
            continue;
        }
        attempted += 1;

        match fetcher.fetch_body(&article.url).await {
            Ok(Some(body)) => {
                if apply_body(article, &body, cfg) {
                    enriched += 1;
                } else {
                    debug!(target: "triage", id = %anon_hash(&article.url), "fetched body too short");
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(target: "triage", error = ?e, id = %anon_hash(&article.url), "content fetch failed");
            }
        }
    }

    info!(target: "triage", attempted, enriched, "content enrichment");
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_rejected() {
        let mut a = Article::new("t", "https://a.test/1", "A");
        assert!(!apply_body(&mut a, "too short", &EnrichmentConfig::default()));
        assert!(!a.enriched);
        assert_eq!(a.summary, "");
    }

    #[test]
    fn long_bodies_are_truncated_with_marker() {
        let mut a = Article::new("t", "https://a.test/1", "A");
        let body = "word ".repeat(1000);
        assert!(apply_body(&mut a, &body, &EnrichmentConfig::default()));
        assert!(a.enriched);
        assert!(a.summary.ends_with("..."));
        assert_eq!(a.summary.chars().count(), 1500 + 3);
    }
}
