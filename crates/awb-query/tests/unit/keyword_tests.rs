//! Tests for residual keyword extraction

use awb_query::{QueryParser, extract_keywords};
use awb_query::constants::STOP_WORDS;

#[test]
fn test_stop_words_and_short_tokens_are_dropped() {
    let query = QueryParser::new().parse("Show me all the workers who are in QA, ok?");

    for term in &query.search_terms {
        assert!(term.chars().count() > 2, "short token kept: {term}");
        assert!(!STOP_WORDS.contains(&term.as_str()), "stop word kept: {term}");
    }
    assert!(query.search_terms.is_empty());
}

#[test]
fn test_punctuation_is_stripped_and_order_kept() {
    assert_eq!(
        extract_keywords("Urgent: billing-migration, urgent!"),
        vec!["urgent", "billingmigration"]
    );
}

#[test]
fn test_keywords_are_lowercase() {
    assert_eq!(extract_keywords("Berlin LONDON"), vec!["berlin", "london"]);
}
