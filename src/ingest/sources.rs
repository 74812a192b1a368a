// src/ingest/sources.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::ingest::types::{Article, ArticleSource};

/// Decode a JSON array of article objects. Each element is decoded on its
/// own; elements that do not decode are skipped with a warning.
pub fn parse_articles(json: &str) -> Result<Vec<Article>> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(json).context("article file must be a JSON array")?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Article>(item) {
            Ok(a) => out.push(a),
            Err(e) => {
                warn!(target: "triage", index, error = %e, "skipping malformed article record");
            }
        }
    }
    Ok(out)
}

/// Articles exported to a JSON file by an upstream fetcher.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("json")
            .to_string();
        Self { path, name }
    }
}

#[async_trait]
impl ArticleSource for JsonFileSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading articles from {}", self.path.display()))?;
        parse_articles(&content)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
