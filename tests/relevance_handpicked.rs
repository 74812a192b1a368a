// tests/relevance_handpicked.rs
// Hand-picked headlines run through the relevance gate with the built-in term lists.

use news_triage::relevance::RelevanceFilter;
use news_triage::Article;

fn art(title: &str, summary: &str) -> Article {
    Article::new(title, "", "Test").with_summary(summary)
}

fn relevant(title: &str) -> bool {
    RelevanceFilter::default().is_relevant(&art(title, ""))
}

#[test]
fn high_priority_terms_pass_alone() {
    assert!(relevant("IAF pilot safe after mission over Iran"));
    assert!(relevant("Nevatim air base on high alert"));
    assert!(relevant("Iron Dome intercepting barrage over Ashkelon"));
}

#[test]
fn actor_with_event_passes() {
    assert!(relevant("Iran launches missiles at Israel"));
    assert!(relevant("Hezbollah fires rockets into northern Israel"));
    assert!(relevant("Houthi drone intercepted near Eilat"));
    assert!(relevant("Iran and Israel agree to ceasefire"));
    assert!(relevant("IRAN LAUNCHES MISSILES AT ISRAEL"));
}

#[test]
fn actor_or_event_alone_fails() {
    assert!(!relevant("Iran's economy grows 3% in Q4"));
    assert!(!relevant("North Korea tests ballistic missile"));
    assert!(!relevant("Tech stocks rise on Wall Street"));
}

#[test]
fn summary_and_markup_are_considered() {
    let f = RelevanceFilter::default();
    assert!(f.is_relevant(&art(
        "Breaking news",
        "<b>Iran</b> <a href='#'>strike</a> on <i>Israel</i>"
    )));
    assert!(f.is_relevant(&art(
        "Breaking: Major escalation",
        "Iran attacked Israel with drones"
    )));
}

#[test]
fn empty_text_is_not_relevant() {
    let r = RelevanceFilter::default().evaluate_article(&art("", ""));
    assert!(!r.relevant);
    assert!(r.matched.is_empty());
}

#[test]
fn batch_filter_keeps_order_and_marks_flag() {
    let out = RelevanceFilter::default().filter_relevant(vec![
        art("Iran strikes Israel", ""),
        art("Weather forecast for NYC", ""),
        art("Hezbollah rockets hit Haifa", ""),
    ]);
    let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Iran strikes Israel", "Hezbollah rockets hit Haifa"]);
    assert!(out.iter().all(|a| a.is_relevant == Some(true)));

    assert!(RelevanceFilter::default().filter_relevant(Vec::new()).is_empty());
}
