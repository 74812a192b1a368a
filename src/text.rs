// src/text.rs
//! Text normalization shared by relevance matching, casualty detection and
//! title similarity.
//!
//! - `strip_markup`: HTML entity decode, drop comments and tags, keep inner text.
//! - `tokenize`: lowercase tokens split on non-alphanumeric boundaries (order kept).
//! - `token_set` / `jaccard`: set view used by the deduplicator.
//! - `TermSet`: compiled keyword/phrase list matched against a token sequence.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashSet;

fn re_tags() -> &'static Regex {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z!][^>]*>").expect("tag regex"))
}

fn re_comments() -> &'static Regex {
    static RE_COMMENTS: OnceCell<Regex> = OnceCell::new();
    RE_COMMENTS.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"))
}

/// Remove markup but keep the text between tags.
///
/// Entities are decoded first: feed summaries are often double-encoded
/// (`&lt;b&gt;Iran&lt;/b&gt;`), and those tags must go too. Tags are replaced
/// by a space so `<p>a</p><p>b</p>` yields two words.
pub fn strip_markup(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let no_comments = re_comments().replace_all(&decoded, " ");
    re_tags().replace_all(&no_comments, " ").into_owned()
}

/// Normalize `text` into lowercase tokens. Stop words are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_markup(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Jaccard index |A∩B| / |A∪B|. Either side empty → 0.0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Title similarity on normalized token sets.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    jaccard(&token_set(a), &token_set(b))
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `max_chars` characters, appending `...` when something was cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[derive(Debug, Clone)]
struct Term {
    raw: String,
    tokens: Vec<String>,
    /// Trailing `*` in config: last token matches as a prefix.
    prefix_last: bool,
}

impl Term {
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let prefix_last = trimmed.ends_with('*');
        let tokens = tokenize(trimmed.trim_end_matches('*'));
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_lowercase(),
            tokens,
            prefix_last,
        })
    }

    fn occurs_in(&self, haystack: &[String]) -> bool {
        let n = self.tokens.len();
        haystack.len() >= n && haystack.windows(n).any(|w| self.matches_window(w))
    }

    fn matches_window(&self, window: &[String]) -> bool {
        let last = self.tokens.len() - 1;
        self.tokens
            .iter()
            .zip(window)
            .enumerate()
            .all(|(i, (want, got))| {
                if i == last && self.prefix_last {
                    got.starts_with(want.as_str())
                } else {
                    got == want
                }
            })
    }
}

/// A compiled list of keywords / phrases.
///
/// A phrase matches when its tokens occur contiguously in the text tokens,
/// so `"iron dome"` never matches `"iron ... dome"` and `"dead"` never
/// matches `"deadline"`.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<Term>,
}

impl TermSet {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .filter_map(|t| Term::parse(t.as_ref()))
            .filter(|t| seen.insert(t.raw.clone()))
            .collect();
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// First configured term found in `tokens`, as written in config (lowercased).
    pub fn first_match(&self, tokens: &[String]) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.occurs_in(tokens))
            .map(|t| t.raw.as_str())
    }

    pub fn matches(&self, tokens: &[String]) -> bool {
        self.first_match(tokens).is_some()
    }
}
