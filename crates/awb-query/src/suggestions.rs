//! Example Query Suggestions
//!
//! Skill- and category-driven queries built from the snapshot, followed by
//! the curated list. Case-insensitive duplicates are dropped.

use crate::constants::{
    CATEGORY_SUGGESTIONS, CURATED_SUGGESTIONS, SKILL_SUGGESTIONS, SUGGESTION_LIMIT,
};
use awb_domain::normalize;
use awb_domain::Snapshot;

/// Example queries for the operator, at most eight
pub fn generate_suggestions(snapshot: &Snapshot) -> Vec<String> {
    let skills = first_distinct(
        snapshot
            .workers
            .iter()
            .filter_map(|w| w.skills.as_ref())
            .flat_map(normalize::string_list),
        SKILL_SUGGESTIONS,
    );
    let categories = first_distinct(
        snapshot
            .tasks
            .iter()
            .filter_map(|t| t.category.as_ref())
            .filter_map(normalize::text),
        CATEGORY_SUGGESTIONS,
    );

    let candidates = skills
        .into_iter()
        .map(|skill| format!("Workers with {skill} skills"))
        .chain(categories.into_iter().map(|category| format!("Tasks in {category}")))
        .chain(CURATED_SUGGESTIONS.iter().map(|s| (*s).to_string()));

    let mut suggestions: Vec<String> = Vec::new();
    for candidate in candidates {
        if suggestions.len() == SUGGESTION_LIMIT {
            break;
        }
        if !suggestions.iter().any(|s| s.eq_ignore_ascii_case(&candidate)) {
            suggestions.push(candidate);
        }
    }
    suggestions
}

/// First `limit` non-blank values, case-insensitively distinct
fn first_distinct<I: Iterator<Item = String>>(values: I, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if seen.len() == limit {
            break;
        }
        let value = value.trim().to_string();
        if !value.is_empty() && !seen.iter().any(|s| s.eq_ignore_ascii_case(&value)) {
            seen.push(value);
        }
    }
    seen
}
