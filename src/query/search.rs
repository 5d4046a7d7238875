//! Name and number search over directory entries.

use std::collections::HashSet;

use serde::Serialize;

use crate::directory::number::digits_only;
use crate::models::{DirectoryEntry, SearchResult};
use crate::query::text::{contains_ignore_case, tokens_prefix_match};

/// How a result matched, derived from the result and its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Blank query: the entry is listed, nothing to highlight.
    All,
    /// The whole query occurs in the display name.
    Name,
    /// Every query token prefixes a name token.
    Initials,
    /// The query's digits occur in `matched_number`.
    Number,
}

impl MatchKind {
    pub fn of(result: &SearchResult) -> Self {
        if result.matched_query.is_empty() {
            MatchKind::All
        } else if result.matched_number.is_some() {
            MatchKind::Number
        } else if contains_ignore_case(&result.entry.display_name, &result.matched_query) {
            MatchKind::Name
        } else {
            MatchKind::Initials
        }
    }
}

/// Search `directory` for `query`.
///
/// A blank query lists every entry unhighlighted. Otherwise each entry is checked
/// for a name match, then for each number whose digits contain the query's digits,
/// then (if the name did not already match) for a token-prefix match. One entry can
/// produce several results; duplicates by `(entry id, matched number)` are dropped,
/// keeping the first. Results follow directory order.
pub fn search(query: &str, directory: &[DirectoryEntry]) -> Vec<SearchResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return dedup(directory.iter().map(|entry| SearchResult {
            entry: entry.clone(),
            matched_query: String::new(),
            matched_number: None,
        }));
    }

    let query_digits = digits_only(trimmed);
    let mut results = Vec::new();

    for entry in directory {
        let name_match = contains_ignore_case(&entry.display_name, trimmed);
        if name_match {
            results.push(hit(entry, trimmed, None));
        }

        if !query_digits.is_empty() {
            for number in &entry.phone_numbers {
                if digits_only(number).contains(&query_digits) {
                    results.push(hit(entry, trimmed, Some(number)));
                }
            }
        }

        if !name_match && tokens_prefix_match(&entry.display_name, trimmed) {
            results.push(hit(entry, trimmed, None));
        }
    }

    dedup(results)
}

fn hit(entry: &DirectoryEntry, query: &str, number: Option<&String>) -> SearchResult {
    SearchResult {
        entry: entry.clone(),
        matched_query: query.to_string(),
        matched_number: number.cloned(),
    }
}

fn dedup<I: IntoIterator<Item = SearchResult>>(results: I) -> Vec<SearchResult> {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert((r.entry.id.clone(), r.matched_number.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, numbers: &[&str]) -> DirectoryEntry {
        DirectoryEntry {
            id: id.to_string(),
            display_name: name.to_string(),
            photo_reference: None,
            phone_numbers: numbers.iter().map(|n| n.to_string()).collect(),
            is_favorite: false,
        }
    }

    fn directory() -> Vec<DirectoryEntry> {
        vec![
            entry("1", "John Smith", &["+14155550100"]),
            entry("2", "Jane Doe", &["(415) 555-0199", "+44 20 7946 0958"]),
            entry("3", "No Number", &[]),
        ]
    }

    #[test]
    fn empty_query_returns_everything_unhighlighted() {
        let dir = directory();
        for q in ["", "   ", "\t\n"] {
            let results = search(q, &dir);
            assert_eq!(results.len(), dir.len());
            assert!(results.iter().all(|r| r.matched_number.is_none()));
            assert!(results.iter().all(|r| r.matched_query.is_empty()));
            assert!(results.iter().all(|r| MatchKind::of(r) == MatchKind::All));
        }
    }

    #[test]
    fn name_substring_is_case_insensitive() {
        let dir = vec![entry("1", "John Smith", &[])];
        let results = search("john", &dir);
        assert_eq!(results.len(), 1);
        assert!(results[0].matched_number.is_none());
        assert_eq!(results[0].matched_query, "john");
        assert_eq!(MatchKind::of(&results[0]), MatchKind::Name);
    }

    #[test]
    fn query_is_trimmed() {
        let results = search("  smith  ", &directory());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_query, "smith");
    }

    #[test]
    fn number_substring_match() {
        let dir = vec![entry("1", "", &["+14155550100"])];
        let results = search("5550100", &dir);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_number.as_deref(), Some("+14155550100"));
        assert_eq!(MatchKind::of(&results[0]), MatchKind::Number);
    }

    #[test]
    fn number_match_ignores_formatting_in_query_and_entry() {
        let results = search("+1 (415) 555", &directory());
        let numbers: Vec<&str> = results.iter().filter_map(|r| r.matched_number.as_deref()).collect();
        assert_eq!(numbers, vec!["+14155550100"]);

        let results = search("415-555", &directory());
        let ids: Vec<&str> = results.iter().map(|r| r.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn one_result_per_matching_number() {
        let dir = vec![entry("1", "Multi", &["5550100", "5550101", "9990000"])];
        let results = search("555010", &dir);
        let numbers: Vec<&str> = results.iter().filter_map(|r| r.matched_number.as_deref()).collect();
        assert_eq!(numbers, vec!["5550100", "5550101"]);
    }

    #[test]
    fn initials_match_in_any_order() {
        let dir = vec![entry("1", "John Smith", &[])];
        assert_eq!(search("jo sm", &dir).len(), 1);
        assert_eq!(search("sm jo", &dir).len(), 1);
        assert_eq!(search("xy sm", &dir).len(), 0);
        assert_eq!(MatchKind::of(&search("sm jo", &dir)[0]), MatchKind::Initials);
    }

    #[test]
    fn name_and_initials_do_not_double_up() {
        // "smith" matches both as a substring and as a token prefix.
        let dir = vec![entry("1", "John Smith", &[])];
        assert_eq!(search("smith", &dir).len(), 1);
    }

    #[test]
    fn name_and_number_yield_separate_results() {
        let dir = vec![entry("1", "Agent 007", &["+1 007 555 0000", "0070"])];
        let results = search("007", &dir);
        assert_eq!(results.len(), 3);
        assert!(results[0].matched_number.is_none());
        assert_eq!(results[1].matched_number.as_deref(), Some("+1 007 555 0000"));
        assert_eq!(results[2].matched_number.as_deref(), Some("0070"));
    }

    #[test]
    fn result_keys_are_unique() {
        let dir = vec![
            entry("1", "Cal Call", &["+15550001", "+155500012"]),
            entry("1", "Cal Call", &["+15550001", "+155500012"]),
        ];
        for q in ["call", "5550001", "ca ca", ""] {
            let results = search(q, &dir);
            let mut keys: Vec<_> = results.iter().map(|r| r.key()).collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), total, "duplicate keys for query {:?}", q);
        }
    }

    #[test]
    fn regex_special_characters_are_literal() {
        let dir = vec![entry("1", "a.b (c) [d] *e+ ?f", &["123"])];
        assert_eq!(search(".*", &dir).len(), 0);
        assert_eq!(search("(c)", &dir).len(), 1);
        assert_eq!(search("[d]", &dir).len(), 1);
        assert_eq!(search("\\", &dir).len(), 0);
        assert_eq!(search("*e+", &dir).len(), 1);
    }

    #[test]
    fn no_digit_query_skips_number_matching() {
        let dir = vec![entry("1", "Zed", &["5550100"])];
        assert!(search("abc", &dir).is_empty());
    }

    #[test]
    fn entry_without_numbers_found_by_name() {
        let results = search("no num", &directory());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.id, "3");
    }

    #[test]
    fn unicode_input_never_panics() {
        let dir = vec![entry("1", "Ærøskøbing İstanbul", &["+45 12"])];
        for q in ["ÆR", "i̇st", "ß", "😀", "٣"] {
            let _ = search(q, &dir);
        }
        assert_eq!(search("ærø", &dir).len(), 1);
    }
}
