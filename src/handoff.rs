// src/handoff.rs
//! Plain-text digest of the selected articles, the block the summarization
//! stage receives as its user content.

use std::fmt::Write as _;

use crate::ingest::types::Article;
use crate::text::{collapse_whitespace, strip_markup, truncate_with_ellipsis};

pub const DEFAULT_SUMMARY_CHARS: usize = 1500;

/// Numbered entries, one blank line apart:
///
/// ```text
/// [1] (Reuters) Title
/// Published: 2026-06-14T08:30:00Z
/// Summary text...
/// ```
pub fn render_digest(articles: &[Article], max_summary_chars: usize) -> String {
    let mut out = String::new();
    for (i, a) in articles.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let source = if a.source.trim().is_empty() {
            "unknown"
        } else {
            a.source.trim()
        };
        let _ = writeln!(out, "[{}] ({}) {}", i + 1, source, collapse_whitespace(&a.title));
        if let Some(ts) = a.published_at {
            let _ = writeln!(
                out,
                "Published: {}",
                ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            );
        }
        let summary = collapse_whitespace(&strip_markup(&a.summary));
        if !summary.is_empty() {
            let _ = writeln!(out, "{}", truncate_with_ellipsis(&summary, max_summary_chars));
        }
    }
    out
}
