// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Selection tier recorded on kept articles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Enriched,
    CasualtyHeadline,
    Other,
}

/// One feed item. Missing or `null` text fields decode as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, alias = "link", deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, alias = "published", deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    /// Set by the content fetcher only.
    #[serde(default)]
    pub enriched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_relevant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn mark_enriched(mut self) -> Self {
        self.enriched = true;
        self
    }
}

fn null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Unix(i64),
}

/// Accepts RFC 3339, RFC 2822 (RSS `pubDate`) or unix seconds; anything else is `None`.
fn lenient_timestamp<'de, D>(d: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(d).unwrap_or(None);
    Ok(match raw {
        Some(RawTimestamp::Text(s)) => parse_timestamp(&s),
        Some(RawTimestamp::Unix(secs)) => DateTime::from_timestamp(secs, 0),
        None => None,
    })
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Upstream feed retrieval. Implementations live outside this crate
/// (HTTP, RSS parsing); the pipeline only consumes their output.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
    fn name(&self) -> &str;
}
