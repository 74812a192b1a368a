// src/select.rs
//! Budgeted, tiered selection of the articles handed to the summarizer.
//!
//! Tiers are filled in the order of `TIER_RULES`:
//! enriched (never truncated) → casualty headlines → everything else,
//! the last two bounded by whatever is left of `max_count`.
//! Tiers partition the input; order inside a tier is input order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::ingest::types::{Article, Category};
use crate::text::{tokenize, TermSet};

pub const DEFAULT_MAX_COUNT: usize = 80;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionConfig {
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default = "default_casualty_keywords")]
    pub casualty_keywords: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            casualty_keywords: default_casualty_keywords(),
        }
    }
}

fn default_max_count() -> usize {
    DEFAULT_MAX_COUNT
}

fn default_casualty_keywords() -> Vec<String> {
    [
        "killed",
        "dead",
        "death toll",
        "deaths",
        "died",
        "wounded",
        "injured",
        "injuries",
        "casualties",
        "fatalities",
        "hurt",
        "slain",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Take the whole tier, even past `max_count`.
    Unlimited,
    /// Take up to `max_count - already_selected`.
    Remaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRule {
    pub category: Category,
    pub budget: Budget,
}

pub const TIER_RULES: [TierRule; 3] = [
    TierRule {
        category: Category::Enriched,
        budget: Budget::Unlimited,
    },
    TierRule {
        category: Category::CasualtyHeadline,
        budget: Budget::Remaining,
    },
    TierRule {
        category: Category::Other,
        budget: Budget::Remaining,
    },
];

#[derive(Debug, Clone)]
pub struct ArticleSelector {
    casualty: TermSet,
    max_count: usize,
}

impl ArticleSelector {
    pub fn new(cfg: &SelectionConfig) -> Self {
        Self {
            casualty: TermSet::new(&cfg.casualty_keywords),
            max_count: cfg.max_count,
        }
    }

    /// Configured budget.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Tier an article belongs to. Enrichment wins over casualty terms.
    pub fn classify(&self, article: &Article) -> Category {
        if article.enriched {
            return Category::Enriched;
        }
        let tokens = tokenize(&format!("{} {}", article.title, article.summary));
        if self.casualty.matches(&tokens) {
            Category::CasualtyHeadline
        } else {
            Category::Other
        }
    }

    pub fn select(&self, articles: Vec<Article>, max_count: usize) -> Vec<Article> {
        let total = articles.len();
        let mut tiers: HashMap<Category, Vec<Article>> = HashMap::new();
        for a in articles {
            tiers.entry(self.classify(&a)).or_default().push(a);
        }

        let mut out: Vec<Article> = Vec::new();
        for rule in TIER_RULES {
            let members = tiers.remove(&rule.category).unwrap_or_default();
            let take = match rule.budget {
                Budget::Unlimited => members.len(),
                Budget::Remaining => max_count.saturating_sub(out.len()),
            };
            out.extend(members.into_iter().take(take).map(|mut a| {
                a.category = Some(rule.category);
                a
            }));
        }

        let count = |c: Category| out.iter().filter(|a| a.category == Some(c)).count();
        info!(
            target: "triage",
            total,
            max_count,
            selected = out.len(),
            enriched = count(Category::Enriched),
            casualty = count(Category::CasualtyHeadline),
            other = count(Category::Other),
            "selection"
        );
        out
    }

    /// `select` with the configured budget.
    pub fn select_default(&self, articles: Vec<Article>) -> Vec<Article> {
        self.select(articles, self.max_count)
    }
}

impl Default for ArticleSelector {
    fn default() -> Self {
        Self::new(&SelectionConfig::default())
    }
}
