//! Literal, case-insensitive text matching helpers.
//!
//! Nothing here compiles user input into a pattern; every comparison is a plain
//! substring or prefix test.

use std::ops::Range;

/// Case-insensitive substring check.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whitespace-separated, non-blank tokens.
pub fn tokens(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// True when every query token is a case-insensitive prefix of at least one name
/// token ("jo sm" matches "John Smith"). A query with no tokens never matches.
pub fn tokens_prefix_match(name: &str, query: &str) -> bool {
    let query_tokens: Vec<String> = tokens(query).iter().map(|t| t.to_lowercase()).collect();
    if query_tokens.is_empty() {
        return false;
    }
    let name_tokens: Vec<String> = tokens(name).iter().map(|t| t.to_lowercase()).collect();
    query_tokens
        .iter()
        .all(|q| name_tokens.iter().any(|n| n.starts_with(q.as_str())))
}

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    // Lowercase char by char, remembering which source byte each lowered char came from.
    let mut lowered = String::with_capacity(haystack.len());
    let mut origin: Vec<usize> = Vec::with_capacity(haystack.len());
    for (idx, ch) in haystack.char_indices() {
        for lc in ch.to_lowercase() {
            let start = lowered.len();
            lowered.push(lc);
            origin.extend(std::iter::repeat_n(idx, lowered.len() - start));
        }
    }
    let needle: String = needle.chars().flat_map(char::to_lowercase).collect();

    let pos = lowered.find(&needle)?;
    let start = origin[pos];
    let last = origin[pos + needle.len() - 1];
    let end = last + haystack[last..].chars().next().map_or(0, char::len_utf8);
    Some(start..end)
}

/// Byte ranges in `name` covered by the query tokens under a prefix match: for each
/// query token, the first name token it prefixes.
pub fn token_prefix_ranges(name: &str, query: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for q in tokens(query) {
        let found = name_token_ranges(name).into_iter().find_map(|tok| {
            let text = &name[tok.clone()];
            find_ignore_case(text, q)
                .filter(|r| r.start == 0)
                .map(|r| tok.start..tok.start + r.end)
        });
        if let Some(r) = found {
            if !ranges.contains(&r) {
                ranges.push(r);
            }
        }
    }
    ranges.sort_by_key(|r| r.start);
    ranges
}

fn name_token_ranges(name: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, ch) in name.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                out.push(s..idx);
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(s..name.len());
    }
    out
}

/// Byte range in a raw phone number covering the digits that match `digits`.
///
/// Formatting characters between matched digits fall inside the range: "5550" in
/// "(415) 555-0100" covers "555-0".
pub fn digit_span(number: &str, digits: &str) -> Option<Range<usize>> {
    if digits.is_empty() {
        return None;
    }
    let positions: Vec<(usize, char)> = number
        .char_indices()
        .filter(|(_, c)| c.is_ascii_digit())
        .collect();
    let only: String = positions.iter().map(|(_, c)| *c).collect();
    let first = only.find(digits)?;
    let last = first + digits.len() - 1;
    Some(positions[first].0..positions[last].0 + 1)
}
