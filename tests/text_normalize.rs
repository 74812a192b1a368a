// tests/text_normalize.rs
use news_triage::text::{strip_markup, tokenize, TermSet};

#[test]
fn feed_summary_markup_is_reduced_to_words() {
    let summary = r#"<div class="x"><img src="a.jpg"/><p>IDF: 3 <b>killed</b>,&nbsp;12 wounded</p><!-- ad --></div>"#;
    assert_eq!(tokenize(summary), vec!["idf", "3", "killed", "12", "wounded"]);
    assert!(!strip_markup(summary).contains('<'));
}

#[test]
fn non_latin_text_tokenizes() {
    assert_eq!(tokenize("אזעקות בתל אביב"), vec!["אזעקות", "בתל", "אביב"]);
}

#[test]
fn punctuation_splits_tokens() {
    assert_eq!(tokenize("Iran's drones/again!"), vec!["iran", "s", "drones", "again"]);
}

#[test]
fn phrases_match_across_markup_and_case() {
    let set = TermSet::new(["home front command"]);
    assert!(set.matches(&tokenize("<p>Home Front</p> Command issues guidance")));
    assert!(!set.matches(&tokenize("Home front, the command said")));
}
