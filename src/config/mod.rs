// src/config/mod.rs
//! Triage configuration.
//!
//! One TOML (or JSON) document with a section per stage. Every section and
//! every field is optional; missing values fall back to the built-in lists.
//!
//! Load order for `load_default`:
//! 1) `$TRIAGE_CONFIG_PATH` (must exist if set)
//! 2) `config/triage.toml`
//! 3) built-in defaults
//!
//! Then `TRIAGE_MAX_COUNT` / `TRIAGE_DUP_THRESHOLD` override the file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::dedup::{DedupConfig, DEFAULT_SIMILARITY_THRESHOLD};
use crate::ingest::enrich::EnrichmentConfig;
use crate::relevance::RelevanceConfig;
use crate::select::SelectionConfig;
use crate::source_priority::SourcePriorityConfig;
use crate::urls::UrlConfig;

pub const ENV_CONFIG_PATH: &str = "TRIAGE_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/triage.toml";
pub const ENV_MAX_COUNT: &str = "TRIAGE_MAX_COUNT";
pub const ENV_DUP_THRESHOLD: &str = "TRIAGE_DUP_THRESHOLD";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    #[serde(default)]
    pub relevance: RelevanceConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub urls: UrlConfig,
    #[serde(default)]
    pub sources: SourcePriorityConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl TriageConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: TriageConfig = toml::from_str(s).context("parsing triage TOML")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut cfg: TriageConfig = serde_json::from_str(s).context("parsing triage JSON")?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load from an explicit path; `.json` is read as JSON, anything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading triage config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Env path → `config/triage.toml` → defaults, then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            info!(target: "triage", path = %pb.display(), "loading triage config");
            Self::load_from(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                info!(target: "triage", path = %pb.display(), "loading triage config");
                Self::load_from(&pb)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(ENV_MAX_COUNT) {
            match parse_count_env(&raw) {
                Some(n) => self.selection.max_count = n,
                None => warn!(target: "triage", value = %raw, "ignoring invalid {ENV_MAX_COUNT}"),
            }
        }
        if let Ok(raw) = std::env::var(ENV_DUP_THRESHOLD) {
            match parse_threshold_env(&raw) {
                Some(t) => self.dedup.similarity_threshold = t,
                None => {
                    warn!(target: "triage", value = %raw, "ignoring invalid {ENV_DUP_THRESHOLD}")
                }
            }
        }
    }

    /// Harden values that deserialize fine but make no sense.
    pub fn sanitize(&mut self) {
        let t = self.dedup.similarity_threshold;
        self.dedup.similarity_threshold = if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            DEFAULT_SIMILARITY_THRESHOLD
        };
        if self.enrichment.min_chars > self.enrichment.max_chars {
            self.enrichment.min_chars = self.enrichment.max_chars;
        }
        for list in [
            &mut self.relevance.actors,
            &mut self.relevance.events,
            &mut self.relevance.high_priority,
            &mut self.selection.casualty_keywords,
            &mut self.urls.tracking_params,
            &mut self.urls.tracking_param_prefixes,
            &mut self.urls.non_fetchable_domains,
            &mut self.sources.order,
        ] {
            clean_list(list);
        }
    }
}

fn parse_threshold_env(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_count_env(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Trim entries and drop blanks, keeping order.
fn clean_list(items: &mut Vec<String>) {
    items.retain_mut(|it| {
        let t = it.trim();
        if t.len() != it.len() {
            *it = t.to_string();
        }
        !it.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = TriageConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, TriageConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = TriageConfig::from_toml_str(
            r#"
[selection]
max_count = 10

[relevance]
actors = [" Hezbollah ", ""]
"#,
        )
        .unwrap();
        assert_eq!(cfg.selection.max_count, 10);
        assert_eq!(
            cfg.selection.casualty_keywords,
            SelectionConfig::default().casualty_keywords
        );
        assert_eq!(cfg.relevance.actors, vec!["Hezbollah".to_string()]);
        assert_eq!(cfg.relevance.events, RelevanceConfig::default().events);
    }

    #[test]
    fn threshold_is_clamped() {
        let cfg = TriageConfig::from_toml_str("[dedup]\nsimilarity_threshold = 4.5").unwrap();
        assert_eq!(cfg.dedup.similarity_threshold, 1.0);
    }

    #[test]
    fn env_parsers() {
        assert_eq!(parse_threshold_env(" 0.75 "), Some(0.75));
        assert_eq!(parse_threshold_env("-1"), Some(0.0));
        assert_eq!(parse_threshold_env("NaN"), None);
        assert_eq!(parse_threshold_env("high"), None);
        assert_eq!(parse_count_env("40"), Some(40));
        assert_eq!(parse_count_env("-3"), None);
    }

    #[test]
    fn json_config_is_accepted() {
        let cfg = TriageConfig::from_json_str(r#"{"enrichment": {"max_to_fetch": 5}}"#).unwrap();
        assert_eq!(cfg.enrichment.max_to_fetch, 5);
        assert_eq!(cfg.enrichment.max_chars, 1500);
    }
}
