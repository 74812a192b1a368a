// src/ingest/mod.rs
pub mod enrich;
pub mod sources;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::config::TriageConfig;
use crate::dedup::Deduplicator;
use crate::ingest::enrich::{enrich_articles, ContentFetcher, EnrichmentConfig};
use crate::ingest::types::{Article, ArticleSource};
use crate::relevance::RelevanceFilter;
use crate::select::ArticleSelector;
use crate::source_priority::SourcePriority;
use crate::urls::UrlCanonicalizer;

/// One-time metrics registration (so series show up once a recorder is installed).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("triage_input_total", "Articles handed to the triage pipeline.");
        describe_counter!(
            "triage_relevant_total",
            "Articles that passed the relevance filter."
        );
        describe_counter!(
            "triage_dedup_removed_total",
            "Articles collapsed into another as duplicates."
        );
        describe_counter!(
            "triage_selected_total",
            "Articles selected for summarization."
        );
        describe_counter!(
            "triage_enriched_total",
            "Articles whose body was fetched during triage."
        );
        describe_counter!("triage_source_errors_total", "Article source failures.");
        describe_gauge!("triage_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Fetch from every source in order. A failing source is logged and skipped.
pub async fn gather(sources: &[Box<dyn ArticleSource>]) -> Vec<Article> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for s in sources {
        match s.fetch_articles().await {
            Ok(mut v) => {
                info!(target: "triage", source = s.name(), count = v.len(), "source fetched");
                raw.append(&mut v);
            }
            Err(e) => {
                warn!(target: "triage", error = ?e, source = s.name(), "source error; skipping");
                counter!("triage_source_errors_total").increment(1);
            }
        }
    }
    raw
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriageOutcome {
    /// Selected articles, tier by tier.
    pub articles: Vec<Article>,
    pub input: usize,
    pub relevant: usize,
    pub deduplicated: usize,
    pub enriched: usize,
}

/// The three triage stages wired from one config.
#[derive(Debug, Clone)]
pub struct Triage {
    relevance: RelevanceFilter,
    canonicalizer: UrlCanonicalizer,
    dedup: Deduplicator,
    selector: ArticleSelector,
    enrichment: EnrichmentConfig,
}

impl Triage {
    pub fn new(cfg: &TriageConfig) -> Self {
        let canonicalizer = UrlCanonicalizer::new(&cfg.urls);
        let priority = SourcePriority::new(&cfg.sources);
        Self {
            relevance: RelevanceFilter::new(&cfg.relevance),
            dedup: Deduplicator::new(canonicalizer.clone(), priority, &cfg.dedup),
            canonicalizer,
            selector: ArticleSelector::new(&cfg.selection),
            enrichment: cfg.enrichment.clone(),
        }
    }

    pub fn relevance(&self) -> &RelevanceFilter {
        &self.relevance
    }

    pub fn canonicalizer(&self) -> &UrlCanonicalizer {
        &self.canonicalizer
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.dedup
    }

    pub fn selector(&self) -> &ArticleSelector {
        &self.selector
    }

    /// Relevance filter → dedup → selection.
    pub fn run(&self, articles: Vec<Article>) -> TriageOutcome {
        let (deduped, mut outcome) = self.filter_and_dedup(articles);
        outcome.articles = self.selector.select_default(deduped);
        record(&outcome);
        outcome
    }

    /// Like `run`, with body enrichment between dedup and selection.
    pub async fn run_with_fetcher(
        &self,
        articles: Vec<Article>,
        fetcher: &dyn ContentFetcher,
    ) -> TriageOutcome {
        let (mut deduped, mut outcome) = self.filter_and_dedup(articles);
        outcome.enriched =
            enrich_articles(&mut deduped, fetcher, &self.canonicalizer, &self.enrichment).await;
        outcome.articles = self.selector.select_default(deduped);
        record(&outcome);
        outcome
    }

    fn filter_and_dedup(&self, articles: Vec<Article>) -> (Vec<Article>, TriageOutcome) {
        ensure_metrics_described();
        let input = articles.len();
        let relevant = self.relevance.filter_relevant(articles);
        let relevant_count = relevant.len();
        let deduped = self.dedup.deduplicate(relevant);
        let outcome = TriageOutcome {
            input,
            relevant: relevant_count,
            deduplicated: deduped.len(),
            ..TriageOutcome::default()
        };
        (deduped, outcome)
    }
}

impl Default for Triage {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}

fn record(outcome: &TriageOutcome) {
    counter!("triage_input_total").increment(outcome.input as u64);
    counter!("triage_relevant_total").increment(outcome.relevant as u64);
    counter!("triage_dedup_removed_total")
        .increment(outcome.relevant.saturating_sub(outcome.deduplicated) as u64);
    counter!("triage_enriched_total").increment(outcome.enriched as u64);
    counter!("triage_selected_total").increment(outcome.articles.len() as u64);
    let now = chrono::Utc::now().timestamp().max(0);
    gauge!("triage_last_run_ts").set(now as f64);

    info!(
        target: "triage",
        input = outcome.input,
        relevant = outcome.relevant,
        deduplicated = outcome.deduplicated,
        enriched = outcome.enriched,
        selected = outcome.articles.len(),
        "triage run"
    );
}
