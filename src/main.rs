//! news-triage: binary entrypoint
//! Reads exported article files, runs relevance → dedup → selection and
//! prints the selection as JSON, or as the summarizer digest with `--digest`.
//!
//! Usage: `news-triage <articles.json>... [--digest]`

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_triage::handoff::{render_digest, DEFAULT_SUMMARY_CHARS};
use news_triage::ingest::sources::JsonFileSource;
use news_triage::{gather, ArticleSource, Triage, TriageConfig};

const USAGE: &str = "usage: news-triage <articles.json>... [--digest]";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info,warn"));

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; TRIAGE_* overrides can live there.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut digest = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--digest" => digest = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ => paths.push(arg),
        }
    }
    if paths.is_empty() {
        bail!("{USAGE}");
    }

    let cfg = TriageConfig::load_default()?;
    let triage = Triage::new(&cfg);

    let sources: Vec<Box<dyn ArticleSource>> = paths
        .iter()
        .map(|p| Box::new(JsonFileSource::new(p)) as Box<dyn ArticleSource>)
        .collect();
    let articles = gather(&sources).await;
    let outcome = triage.run(articles);
    info!(
        target: "triage",
        selected = outcome.articles.len(),
        max_count = triage.selector().max_count(),
        "done"
    );

    if digest {
        print!("{}", render_digest(&outcome.articles, DEFAULT_SUMMARY_CHARS));
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome.articles)?);
    }
    Ok(())
}
