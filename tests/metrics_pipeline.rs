// tests/metrics_pipeline.rs
#![cfg(feature = "strict-metrics")]
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusBuilder;
use news_triage::{gather, Article, ArticleSource, Triage};

struct DownFeed;

#[async_trait]
impl ArticleSource for DownFeed {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        Err(anyhow!("timeout"))
    }
    fn name(&self) -> &str {
        "down"
    }
}

#[tokio::test]
async fn metrics_exposed_after_run() {
    // Install a local recorder for the test
    let handle = PrometheusBuilder::new().install_recorder().expect("recorder");

    let sources: Vec<Box<dyn ArticleSource>> = vec![Box::new(DownFeed)];
    let _ = gather(&sources).await;

    let articles = vec![
        Article::new("Iran fires missiles at Israel", "https://reuters.com/1", "Reuters"),
        Article::new("Iran fires rockets at Israel", "https://bbc.com/1", "BBC"),
        Article::new("Weather in London", "https://bbc.com/2", "BBC"),
    ];
    let out = Triage::default().run(articles);
    assert_eq!(out.articles.len(), 1);

    // Scrape metrics text and check series presence by substring
    let text = handle.render();
    for needle in [
        "triage_input_total 3",
        "triage_relevant_total 2",
        "triage_dedup_removed_total 1",
        "triage_selected_total 1",
        "triage_source_errors_total 1",
        "triage_last_run_ts",
    ] {
        assert!(text.contains(needle), "missing '{needle}'\n{text}");
    }
}
