// src/relevance.rs
//! Relevance gate: an article passes on a high-priority term alone, or on an
//! actor term co-occurring with an event term.
//!
//! Matching runs on `text::tokenize(title + " " + summary)`, so it is
//! case-insensitive and ignores markup. Missing text simply fails the gate.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ingest::types::Article;
use crate::text::{tokenize, TermSet};

/// Term lists for the relevance gate. Each list defaults to the built-in seed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevanceConfig {
    #[serde(default = "default_actors")]
    pub actors: Vec<String>,
    #[serde(default = "default_events")]
    pub events: Vec<String>,
    #[serde(default = "default_high_priority")]
    pub high_priority: Vec<String>,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            actors: default_actors(),
            events: default_events(),
            high_priority: default_high_priority(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_actors() -> Vec<String> {
    strings(&[
        "iran",
        "iranian",
        "irgc",
        "islamic republic",
        "israel",
        "israeli",
        "idf",
        "iaf",
        "hezbollah",
        "houthi",
        "houthis",
        "hamas",
        "islamic jihad",
        "tehran",
        "khamenei",
    ])
}

fn default_events() -> Vec<String> {
    strings(&[
        "strike",
        "strikes",
        "struck",
        "attack",
        "attacks",
        "attacked",
        "missile",
        "missiles",
        "ballistic",
        "rocket",
        "rockets",
        "drone",
        "drones",
        "uav",
        "shahed",
        "intercept",
        "intercepts",
        "intercepted",
        "interception",
        "iron dome",
        "arrow",
        "david's sling",
        "air defense",
        "air defence",
        "casualties",
        "killed",
        "injured",
        "wounded",
        "dead",
        "pilot",
        "pilots",
        "aircrew",
        "alert",
        "siren",
        "sirens",
        "home front command",
        "retaliation",
        "retaliatory",
        "escalation",
        "ceasefire",
        "truce",
        "de-escalation",
        "nuclear",
        "enrichment",
        "natanz",
        "fordow",
    ])
}

fn default_high_priority() -> Vec<String> {
    strings(&[
        "iaf pilot",
        "israeli air force pilot",
        "iran attacks israel",
        "iran attack israel",
        "iran strikes israel",
        "israel strikes iran",
        "israel attack iran",
        "ballistic missile israel",
        "iron dome activation",
        "iron dome intercept*",
        "israeli pilot",
        "nevatim",
        "ramon air base",
        "ramat david",
        "hatzerim",
        "palmachim",
        "tel nof",
        "ovda",
        "iran war",
        "iran retaliat*",
        "missile tel aviv",
        "missile haifa",
        "missile jerusalem",
        "siren tel aviv",
        "siren haifa",
        "houthi israel",
        "strait of hormuz",
    ])
}

/// Result of a relevance evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relevance {
    pub relevant: bool,
    /// Terms that matched (as configured), at most one per list.
    pub matched: Vec<String>,
    pub reasons: Vec<String>,
}

/// Compiled relevance gate.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    actors: TermSet,
    events: TermSet,
    high_priority: TermSet,
}

impl RelevanceFilter {
    pub fn new(cfg: &RelevanceConfig) -> Self {
        Self {
            actors: TermSet::new(&cfg.actors),
            events: TermSet::new(&cfg.events),
            high_priority: TermSet::new(&cfg.high_priority),
        }
    }

    /// Evaluate free text against the three term sets.
    pub fn evaluate(&self, text: &str) -> Relevance {
        let tokens = tokenize(text);
        let mut rel = Relevance::default();

        if let Some(term) = self.high_priority.first_match(&tokens) {
            rel.relevant = true;
            rel.matched.push(term.to_string());
            rel.reasons.push("high_priority".into());
            return rel;
        }

        let actor = self.actors.first_match(&tokens);
        let event = self.events.first_match(&tokens);
        rel.matched.extend(actor.into_iter().chain(event).map(str::to_string));

        let reason = match (actor, event) {
            (Some(_), Some(_)) => {
                rel.relevant = true;
                "actor+event"
            }
            (Some(_), None) => "actor_only",
            (None, Some(_)) => "event_only",
            (None, None) => "no_terms",
        };
        rel.reasons.push(reason.into());
        rel
    }

    pub fn evaluate_article(&self, article: &Article) -> Relevance {
        self.evaluate(&format!("{} {}", article.title, article.summary))
    }

    pub fn is_relevant(&self, article: &Article) -> bool {
        self.evaluate_article(article).relevant
    }

    /// Mark every article and keep the relevant ones, in order.
    pub fn filter_relevant(&self, articles: Vec<Article>) -> Vec<Article> {
        let total = articles.len();
        let kept: Vec<Article> = articles
            .into_iter()
            .filter_map(|mut a| {
                let rel = self.evaluate_article(&a);
                a.is_relevant = Some(rel.relevant);
                if !rel.relevant {
                    debug!(
                        target: "triage",
                        id = %anon_hash(&a.url),
                        reasons = ?rel.reasons,
                        "dropped: not relevant"
                    );
                }
                rel.relevant.then_some(a)
            })
            .collect();
        info!(target: "triage", passed = kept.len(), total, "relevance filter");
        kept
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(&RelevanceConfig::default())
    }
}

/// Short, stable fingerprint used in logs instead of raw text or URLs.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
