// src/dedup.rs
//! Near-duplicate collapsing across sources.
//!
//! Two passes:
//! 1. Exact: articles sharing a canonical URL key form one group.
//! 2. Fuzzy: group representatives whose title-token Jaccard similarity is
//!    strictly above the threshold are clustered with a disjoint-set,
//!    merging pairs in descending similarity order. Clusters are connected
//!    components, so the result does not depend on input order.
//!
//! Each group/cluster keeps one article: best source priority, then earliest
//! `published_at` (missing timestamps last), then first seen. Survivors are
//! emitted in their own input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use crate::ingest::types::Article;
use crate::relevance::anon_hash;
use crate::source_priority::SourcePriority;
use crate::text::{jaccard, token_set};
use crate::urls::UrlCanonicalizer;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DedupConfig {
    /// Titles are duplicates iff Jaccard similarity is strictly greater.
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Disjoint-set over article indices (path halving + union by size).
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if `a` and `b` were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

#[derive(Debug, Clone)]
pub struct Deduplicator {
    canonicalizer: UrlCanonicalizer,
    priority: SourcePriority,
    threshold: f64,
}

impl Deduplicator {
    pub fn new(canonicalizer: UrlCanonicalizer, priority: SourcePriority, cfg: &DedupConfig) -> Self {
        let threshold = if cfg.similarity_threshold.is_finite() {
            cfg.similarity_threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_SIMILARITY_THRESHOLD
        };
        Self {
            canonicalizer,
            priority,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn deduplicate(&self, articles: Vec<Article>) -> Vec<Article> {
        let total = articles.len();
        if total == 0 {
            return articles;
        }
        let ranks: Vec<usize> = articles.iter().map(|a| self.priority.rank(&a.source)).collect();
        let keys: Vec<String> = articles
            .iter()
            .map(|a| self.canonicalizer.canonicalize(&a.url))
            .collect();
        let better = |a: usize, b: usize| -> Ordering {
            ranks[a]
                .cmp(&ranks[b])
                .then_with(|| cmp_published(&articles[a], &articles[b]))
                .then(a.cmp(&b))
        };

        // (1) canonical URL groups; empty keys never group.
        let mut group_of_key: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            let slot = if key.is_empty() {
                None
            } else {
                group_of_key.get(key.as_str()).copied()
            };
            match slot {
                Some(g) => groups[g].push(i),
                None => {
                    if !key.is_empty() {
                        group_of_key.insert(key.as_str(), groups.len());
                    }
                    groups.push(vec![i]);
                }
            }
        }
        let reps: Vec<usize> = groups
            .iter()
            .map(|members| elect(members, &better))
            .collect();
        for (members, &rep) in groups.iter().zip(&reps) {
            for &m in members.iter().filter(|&&m| m != rep) {
                debug!(
                    target: "triage",
                    dropped = %anon_hash(&keys[m]),
                    kept_source = %articles[rep].source,
                    "duplicate by url"
                );
            }
        }

        // (2) title clusters over the URL representatives.
        let titles: Vec<HashSet<String>> = reps.iter().map(|&i| token_set(&articles[i].title)).collect();
        let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
        for a in 0..reps.len() {
            for b in (a + 1)..reps.len() {
                let sim = jaccard(&titles[a], &titles[b]);
                if sim > self.threshold {
                    pairs.push((sim, a, b));
                }
            }
        }
        pairs.sort_by(|x, y| y.0.total_cmp(&x.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));

        let mut sets = DisjointSet::new(reps.len());
        for &(sim, a, b) in &pairs {
            if sets.union(a, b) {
                debug!(
                    target: "triage",
                    a = %anon_hash(&keys[reps[a]]),
                    b = %anon_hash(&keys[reps[b]]),
                    sim,
                    "duplicate by title"
                );
            }
        }

        // BTreeMap keyed by root keeps iteration deterministic.
        let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (local, &global) in reps.iter().enumerate() {
            clusters.entry(sets.find(local)).or_default().push(global);
        }
        let mut survivors: Vec<usize> = clusters
            .values()
            .map(|members| elect(members, &better))
            .collect();
        survivors.sort_unstable();

        let mut slots: Vec<Option<Article>> = articles.into_iter().map(Some).collect();
        let out: Vec<Article> = survivors.iter().filter_map(|&i| slots[i].take()).collect();

        info!(
            target: "triage",
            total,
            url_groups = reps.len(),
            kept = out.len(),
            "deduplication"
        );
        out
    }
}

fn elect<F>(members: &[usize], better: &F) -> usize
where
    F: Fn(usize, usize) -> Ordering,
{
    members
        .iter()
        .copied()
        .min_by(|&a, &b| better(a, b))
        .unwrap_or_default()
}

/// Earlier first; a present timestamp beats a missing one.
fn cmp_published(a: &Article, b: &Article) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
