// src/urls.rs
//! URL canonicalization (dedup comparison key) and the fetchability predicate
//! consulted by the external content fetcher.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write as _;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrlConfig {
    /// Exact query parameter names dropped from the key (case-insensitive).
    #[serde(default = "default_tracking_params")]
    pub tracking_params: Vec<String>,
    /// Any parameter starting with one of these is dropped too (e.g. `utm_`).
    #[serde(default = "default_tracking_param_prefixes")]
    pub tracking_param_prefixes: Vec<String>,
    /// Hosts (and their subdomains) that never serve extractable article text.
    #[serde(default = "default_non_fetchable_domains")]
    pub non_fetchable_domains: Vec<String>,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            tracking_params: default_tracking_params(),
            tracking_param_prefixes: default_tracking_param_prefixes(),
            non_fetchable_domains: default_non_fetchable_domains(),
        }
    }
}

fn default_tracking_params() -> Vec<String> {
    [
        "fbclid", "gclid", "dclid", "msclkid", "mc_cid", "mc_eid", "ref", "ref_src", "igshid",
        "_ga", "ocid", "cmpid", "smid",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_tracking_param_prefixes() -> Vec<String> {
    vec!["utm_".to_string()]
}

fn default_non_fetchable_domains() -> Vec<String> {
    [
        "twitter.com",
        "x.com",
        "t.co",
        "facebook.com",
        "instagram.com",
        "youtube.com",
        "youtu.be",
        "tiktok.com",
        "t.me",
        "news.google.com",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    tracking: HashSet<String>,
    prefixes: Vec<String>,
    blocked_domains: Vec<String>,
}

impl UrlCanonicalizer {
    pub fn new(cfg: &UrlConfig) -> Self {
        Self {
            tracking: lowered(&cfg.tracking_params).into_iter().collect(),
            prefixes: lowered(&cfg.tracking_param_prefixes),
            blocked_domains: lowered(&cfg.non_fetchable_domains)
                .into_iter()
                .map(|d| strip_www(&d).to_string())
                .collect(),
        }
    }

    fn is_tracking(&self, key: &str) -> bool {
        let k = key.to_ascii_lowercase();
        self.tracking.contains(&k) || self.prefixes.iter().any(|p| k.starts_with(p.as_str()))
    }

    /// Comparison key: `host[:port]/path[?residual-query]`, no scheme, no
    /// fragment, no trailing slash, tracking parameters removed.
    pub fn canonicalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        match Url::parse(trimmed) {
            Ok(parsed) if parsed.host_str().is_some() => self.key_from_parsed(&parsed),
            _ => self.fallback_key(trimmed),
        }
    }

    fn key_from_parsed(&self, u: &Url) -> String {
        let host = u.host_str().unwrap_or_default().to_ascii_lowercase();
        let mut key = strip_www(&host).to_string();
        if let Some(port) = u.port() {
            let _ = write!(key, ":{port}");
        }
        key.push_str(u.path().trim_end_matches('/'));

        let kept: Vec<(String, String)> = u
            .query_pairs()
            .filter(|(k, _)| !self.is_tracking(k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        if !kept.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept)
                .finish();
            key.push('?');
            key.push_str(&query);
        }
        key
    }

    /// Best effort for strings `url` refuses (bare hosts, `//host/path`):
    /// lowercase, drop scheme and fragment, same tracking-parameter rules.
    fn fallback_key(&self, raw: &str) -> String {
        let lower = raw.to_lowercase();
        let no_fragment = lower.split('#').next().unwrap_or_default();
        let no_scheme = no_fragment
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(no_fragment);
        let no_scheme = no_scheme.strip_prefix("//").unwrap_or(no_scheme);
        let (path, query) = no_scheme.split_once('?').unwrap_or((no_scheme, ""));

        let mut key = strip_www(path).trim_end_matches('/').to_string();
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| !self.is_tracking(pair.split('=').next().unwrap_or_default()))
            .collect();
        if !kept.is_empty() {
            key.push('?');
            key.push_str(&kept.join("&"));
        }
        key
    }

    /// False for empty, unparseable or non-http(s) URLs and for blocked hosts.
    pub fn is_fetchable(&self, raw: &str) -> bool {
        let Ok(u) = Url::parse(raw.trim()) else {
            return false;
        };
        if !matches!(u.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = u.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let host = strip_www(&host);
        !self.blocked_domains.iter().any(|d| {
            host == d.as_str()
                || host
                    .strip_suffix(d.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

impl Default for UrlCanonicalizer {
    fn default() -> Self {
        Self::new(&UrlConfig::default())
    }
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
