// tests/dedup_scenarios.rs
// Duplicate collapsing across sources: URL groups, title clusters, tie-breaks.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use news_triage::dedup::{DedupConfig, Deduplicator};
use news_triage::text::title_similarity;
use news_triage::{Article, SourcePriority, UrlCanonicalizer};

fn dedup() -> Deduplicator {
    Deduplicator::new(
        UrlCanonicalizer::default(),
        SourcePriority::default(),
        &DedupConfig::default(),
    )
}

fn art(title: &str, source: &str, url: &str) -> Article {
    Article::new(title, url, source)
}

fn sources(v: &[Article]) -> Vec<&str> {
    v.iter().map(|a| a.source.as_str()).collect()
}

#[test]
fn similarity_reference_values() {
    assert_eq!(
        title_similarity("Iran fires missiles at Israel", "Iran fires missiles at Israel"),
        1.0
    );
    assert!(title_similarity("Weather in London today", "Stock market crashes hard") < 0.2);
    assert!(title_similarity("Iran fires missiles at Israel", "Iran fires rockets at Israel") > 0.6);
    assert!(
        title_similarity(
            "Iran fires missiles at Israel",
            "Israel strikes back at Iran nuclear facilities"
        ) < 0.6
    );
}

#[test]
fn similar_titles_keep_higher_priority_source() {
    let out = dedup().deduplicate(vec![
        art("Iran fires rockets at Israel", "BBC", "https://bbc.com/1"),
        art("Iran fires missiles at Israel", "Reuters", "https://reuters.com/1"),
    ]);
    assert_eq!(sources(&out), vec!["Reuters"]);
    assert_eq!(out[0].title, "Iran fires missiles at Israel");
}

#[test]
fn distinct_stories_survive() {
    let out = dedup().deduplicate(vec![
        art("Iran fires missiles at Israel", "Reuters", "https://reuters.com/1"),
        art("Israel economy grows 5% this quarter", "BBC", "https://bbc.com/2"),
    ]);
    assert_eq!(out.len(), 2);
}

#[test]
fn tracking_params_do_not_split_a_story() {
    let out = dedup().deduplicate(vec![
        art("Story", "Source A", "https://example.com/1?utm_source=twitter"),
        art("Story", "Source B", "https://www.example.com/1/?utm_source=facebook#top"),
    ]);
    assert_eq!(sources(&out), vec!["Source A"]);
}

#[test]
fn tracking_params_group_and_priority_picks_the_version() {
    let out = dedup().deduplicate(vec![
        art("Rocket hits Haifa port", "BBC", "https://www.bbc.com/news/haifa?utm_source=rss"),
        art("Haifa port struck overnight", "IDF Spokesperson", "https://bbc.com/news/haifa?utm_medium=social"),
    ]);
    assert_eq!(sources(&out), vec!["IDF Spokesperson"]);
    assert_eq!(out[0].title, "Haifa port struck overnight");
}

#[test]
fn scheme_less_links_group_with_tracking_params() {
    let out = dedup().deduplicate(vec![
        art("Sirens in the north", "BBC", "example.com/story?utm_source=rss"),
        art("Northern alert lifted", "Reuters", "example.com/story"),
    ]);
    assert_eq!(sources(&out), vec!["Reuters"]);
}

#[test]
fn different_events_about_same_actors_both_survive() {
    let out = dedup().deduplicate(vec![
        art("Iran fires missiles at Israel", "Reuters", "https://reuters.com/1"),
        art("Israel strikes back at Iran", "BBC", "https://bbc.com/2"),
    ]);
    assert_eq!(out.len(), 2);
}

#[test]
fn same_url_prefers_ranked_source_over_unknown() {
    let out = dedup().deduplicate(vec![
        art("Iran strikes", "Random Blog", "https://example.com/1"),
        art("Iran strikes", "Times of Israel", "https://example.com/1"),
    ]);
    assert_eq!(sources(&out), vec!["Times of Israel"]);
}

#[test]
fn earlier_timestamp_breaks_priority_tie() {
    let early = Utc.with_ymd_and_hms(2026, 6, 14, 6, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2026, 6, 14, 9, 0, 0).unwrap();
    let out = dedup().deduplicate(vec![
        art("Sirens sound across central Israel", "Reuters", "https://r.test/late").published(late),
        art("Sirens sound across central Israel", "Reuters", "https://r.test/early").published(early),
    ]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://r.test/early");
}

#[test]
fn dedup_is_idempotent() {
    let input = vec![
        art("Iran fires missiles at Israel", "Reuters", "https://reuters.com/1"),
        art("Iran fires rockets at Israel", "BBC", "https://bbc.com/1"),
        art("Hezbollah drone hits Galilee", "Ynetnews", "https://ynet.test/2"),
        art("Hezbollah drone hits Galilee", "Al Jazeera", "https://ynet.test/2?utm_medium=x"),
    ];
    let once = dedup().deduplicate(input);
    let twice = dedup().deduplicate(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn survivors_do_not_depend_on_input_order() {
    let base = vec![
        art("Iran fires missiles at Israel", "Reuters", "https://reuters.com/1"),
        art("Iran fires rockets at Israel", "BBC", "https://bbc.com/1"),
        art("Iran fires rockets at Israel today", "Al Jazeera", "https://aj.test/1"),
        art("Houthi drone intercepted near Eilat", "Times of Israel", "https://toi.test/9"),
        art("Houthi drone intercepted near Eilat", "i24 News", "https://i24.test/9"),
        art("Weather in London today", "BBC", "https://bbc.com/w"),
    ];
    let mut expected: Vec<(String, String)> = dedup()
        .deduplicate(base.clone())
        .into_iter()
        .map(|a| (a.source, a.url))
        .collect();
    expected.sort();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut shuffled = base.clone();
        shuffled.shuffle(&mut rng);
        let mut got: Vec<(String, String)> = dedup()
            .deduplicate(shuffled)
            .into_iter()
            .map(|a| (a.source, a.url))
            .collect();
        got.sort();
        assert_eq!(got, expected);
    }
}

#[test]
fn empty_and_single_inputs() {
    assert!(dedup().deduplicate(Vec::new()).is_empty());
    let one = dedup().deduplicate(vec![art("Iran attacks", "Test", "https://example.com/1")]);
    assert_eq!(one.len(), 1);
}
