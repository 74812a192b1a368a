//! # Source Priority
//!
//! A total order over known news sources, used only as the deduplication
//! tie-break (never to reject an article).
//!
//! - Ordered list in config: position 0 is the most trusted source.
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Aliases map alternative spellings/domains to a listed source.
//! - Fallback order: aliases → exact match → whole-word substring → unknown.
//! - Unknown sources rank last (`len` of the list).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcePriorityConfig {
    /// Highest priority first.
    #[serde(default = "default_order")]
    pub order: Vec<String>,
    /// Alias → listed source name.
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,
}

impl Default for SourcePriorityConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            aliases: default_aliases(),
        }
    }
}

fn default_order() -> Vec<String> {
    [
        "IDF Spokesperson",
        "Times of Israel",
        "Jerusalem Post",
        "Ynetnews",
        "Reuters",
        "BBC",
        "Al Jazeera",
        "i24 News",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_aliases() -> HashMap<String, String> {
    [
        ("idf", "IDF Spokesperson"),
        ("israel defense forces", "IDF Spokesperson"),
        ("toi", "Times of Israel"),
        ("timesofisrael.com", "Times of Israel"),
        ("jpost", "Jerusalem Post"),
        ("jpost.com", "Jerusalem Post"),
        ("ynet", "Ynetnews"),
        ("ynetnews.com", "Ynetnews"),
        ("reuters.com", "Reuters"),
        ("bbc.com", "BBC"),
        ("bbc.co.uk", "BBC"),
        ("aljazeera", "Al Jazeera"),
        ("aljazeera.com", "Al Jazeera"),
        ("i24news", "i24 News"),
    ]
    .iter()
    .map(|(a, c)| (a.to_string(), c.to_string()))
    .collect()
}

#[derive(Debug, Clone)]
pub struct SourcePriority {
    /// Normalized name → rank. Duplicates keep their first position.
    ranks: HashMap<String, usize>,
    /// Normalized names in rank order, for the substring fallback.
    order: Vec<String>,
    aliases: HashMap<String, String>,
}

impl SourcePriority {
    pub fn new(cfg: &SourcePriorityConfig) -> Self {
        let mut ranks = HashMap::new();
        let mut order = Vec::new();
        for name in &cfg.order {
            let n = normalize(name);
            if n.is_empty() || ranks.contains_key(&n) {
                continue;
            }
            ranks.insert(n.clone(), order.len());
            order.push(n);
        }
        let aliases = cfg
            .aliases
            .iter()
            .map(|(a, c)| (normalize(a), normalize(c)))
            .filter(|(a, _)| !a.is_empty())
            .collect();
        Self {
            ranks,
            order,
            aliases,
        }
    }

    /// Rank reserved for sources not in the list.
    pub fn unknown_rank(&self) -> usize {
        self.order.len()
    }

    /// Lower is better. Total over all strings.
    pub fn rank(&self, source: &str) -> usize {
        let s = normalize(source);
        if s.is_empty() {
            return self.unknown_rank();
        }

        // 1) Alias resolution.
        if let Some(&r) = self.aliases.get(&s).and_then(|c| self.ranks.get(c)) {
            return r;
        }

        // 2) Exact match.
        if let Some(&r) = self.ranks.get(&s) {
            return r;
        }

        // 3) Whole-word substring, best rank first ("BBC World" → "bbc").
        let padded = format!(" {s} ");
        for (r, name) in self.order.iter().enumerate() {
            if padded.contains(&format!(" {name} ")) {
                return r;
            }
        }

        // 4) Unknown.
        self.unknown_rank()
    }
}

impl Default for SourcePriority {
    fn default() -> Self {
        Self::new(&SourcePriorityConfig::default())
    }
}

/// Lowercase, replace punctuation/dashes with spaces, collapse spaces.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();

    for ch in ['—', '–', '-', '_', '/', '\\'] {
        out = out.replace(ch, " ");
    }
    out = out.replace(['\n', '\r', '\t', '.', ',', '‚', '’', '\'', '@'], " ");

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
