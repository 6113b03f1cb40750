use super::*;
use crate::types::SnippetSource;

fn news(text: &str) -> RawSnippet {
    RawSnippet::new(text, SnippetSource::News)
}

fn acme_tech() -> EntityContext {
    EntityContext::new("Acme", None, Some("technology"), None).expect("valid context")
}

fn long_tail(prefix: &str, tail: &str) -> String {
    let mut text = prefix.to_string();
    while text.chars().count() < FINGERPRINT_PREFIX_CHARS {
        text.push('.');
    }
    text.push_str(tail);
    text
}

#[test]
fn empty_batch_returns_empty_candidates() {
    assert!(filter_relevant(Vec::new(), &acme_tech()).is_empty());
}

#[test]
fn keeps_relevant_and_drops_unrelated() {
    let ctx = acme_tech();
    let kept = filter_relevant(
        vec![
            news("Acme launches new AI product today announcing strong results"),
            news("Random unrelated text about weather"),
        ],
        &ctx,
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(
        kept[0].snippet.text,
        "Acme launches new AI product today announcing strong results"
    );
    assert!(kept[0].relevance >= 13, "name + sector, got {}", kept[0].relevance);
}

#[test]
fn identical_prefixes_keep_first_arrival() {
    let ctx = acme_tech();
    let first = long_tail("Acme wins award. Great quarter", " for shareholders");
    let second = long_tail("ACME WINS AWARD. GREAT QUARTER", " for everyone");
    let kept = filter_relevant(vec![news(&first), news(&second)], &ctx);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].snippet.text, first);
}

#[test]
fn differing_prefixes_are_distinct_even_with_shared_tail() {
    let ctx = acme_tech();
    let a = long_tail("Acme wins award", " identical tail");
    let b = long_tail("Acme loses award", " identical tail");
    let kept = filter_relevant(vec![news(&a), news(&b)], &ctx);
    assert_eq!(kept.len(), 2);
}

#[test]
fn length_alone_is_not_enough() {
    let ctx = acme_tech();
    let text = "x".repeat(150);
    assert_eq!(relevance_score(&text, &ctx), LONG_TEXT);
    assert!(filter_relevant(vec![news(&text)], &ctx).is_empty());
}

#[test]
fn sector_keyword_alone_is_not_enough_but_with_length_it_is() {
    let ctx = acme_tech();
    assert_eq!(relevance_score("new software release", &ctx), SECTOR_MATCH);
    let long = format!("new software release {}", "detail ".repeat(20));
    assert_eq!(relevance_score(&long, &ctx), SECTOR_MATCH + LONG_TEXT);
    assert_eq!(filter_relevant(vec![news(&long)], &ctx).len(), 1);
}

#[test]
fn sector_bonus_awarded_once() {
    let ctx = acme_tech();
    assert_eq!(
        relevance_score("tech software digital innovation", &ctx),
        SECTOR_MATCH
    );
}

#[test]
fn leadership_match_scores() {
    let ctx = EntityContext::new("Acme", Some("Jane Doe"), None, None).unwrap();
    assert_eq!(relevance_score("jane doe speaks at summit", &ctx), LEADERSHIP_MATCH);
    assert_eq!(
        relevance_score("Jane Doe says Acme is growing", &ctx),
        LEADERSHIP_MATCH + NAME_MATCH
    );
}

#[test]
fn unknown_sector_has_no_keywords() {
    assert!(sector_keywords("underwater basket weaving").is_empty());
    assert_eq!(sector_keywords("  Aviation "), &["airline", "flight", "aircraft", "airport", "aviation"]);
}

#[test]
fn ranks_by_score_and_preserves_arrival_order_for_ties() {
    let ctx = EntityContext::new("Acme", Some("Jane Doe"), None, None).unwrap();
    let kept = filter_relevant(
        vec![
            news("Acme one"),
            news("Jane Doe and Acme two"),
            news("Acme three"),
            news("Jane Doe four"),
        ],
        &ctx,
    );
    let texts: Vec<&str> = kept.iter().map(|c| c.snippet.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Jane Doe and Acme two", "Acme one", "Acme three", "Jane Doe four"]
    );
}

#[test]
fn truncates_to_max_candidates_keeping_highest() {
    let ctx = EntityContext::new("Acme", Some("Jane Doe"), None, None).unwrap();
    let mut batch: Vec<RawSnippet> = (0..30).map(|i| news(&format!("Acme item {i}"))).collect();
    batch.push(news("Jane Doe leads Acme"));
    let kept = filter_relevant(batch, &ctx);
    assert_eq!(kept.len(), MAX_CANDIDATES);
    assert_eq!(kept[0].snippet.text, "Jane Doe leads Acme");
    assert_eq!(kept[1].snippet.text, "Acme item 0");
    assert_eq!(kept[24].snippet.text, "Acme item 23");
}

#[test]
fn filtering_is_idempotent() {
    let ctx = acme_tech();
    let batch = vec![
        news("Acme posts record revenue"),
        news("Weather is nice"),
        news("acme posts record revenue"),
        news("New AI software from Acme gets rave reviews from every analyst who tried it out this week, impressive"),
    ];
    let once = filter_relevant(batch, &ctx);
    let again = filter_relevant(once.iter().map(|c| c.snippet.clone()).collect(), &ctx);
    assert_eq!(once, again);
}

#[test]
fn fingerprint_is_case_insensitive() {
    assert_eq!(fingerprint("Acme Rises"), fingerprint("acme rises"));
    assert_ne!(fingerprint("Acme rises"), fingerprint("Acme falls"));
}
