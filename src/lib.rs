// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod dedup;
pub mod handoff;
pub mod ingest;
pub mod relevance;
pub mod select;
pub mod source_priority;
pub mod text;
pub mod urls;

// ---- Re-exports for stable public API ----
pub use crate::config::TriageConfig;
pub use crate::dedup::Deduplicator;
pub use crate::handoff::render_digest;
pub use crate::ingest::enrich::ContentFetcher;
pub use crate::ingest::types::{Article, ArticleSource, Category};
pub use crate::ingest::{gather, Triage, TriageOutcome};
pub use crate::relevance::RelevanceFilter;
pub use crate::select::ArticleSelector;
pub use crate::source_priority::SourcePriority;
pub use crate::urls::UrlCanonicalizer;
