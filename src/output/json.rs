use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::models::{CallLogEntry, CallerRef, ContactDetails, DirectoryEntry, SearchResult};
use crate::query::dates::{DateSection, format_duration};
use crate::query::search::MatchKind;

/// Serialize any serializable value to pretty JSON string.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Format a list of directory entries as JSON.
pub fn format_contacts(entries: &[&DirectoryEntry]) -> String {
    to_json(&entries)
}

/// Format a single contact as JSON.
pub fn format_contact_detail(details: &ContactDetails) -> String {
    to_json(details)
}

#[derive(Debug, Serialize)]
pub struct SearchResultJson<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub is_favorite: bool,
    pub phone_numbers: &'a [String],
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_number: Option<&'a str>,
}

/// Wrapper for search response with metadata.
#[derive(Debug, Serialize)]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub total_matches: usize,
    pub results: Vec<SearchResultJson<'a>>,
}

/// Format search results as JSON with metadata.
pub fn format_search_results(results: &[SearchResult], query: &str) -> String {
    let json_results: Vec<SearchResultJson> = results
        .iter()
        .map(|r| SearchResultJson {
            id: &r.entry.id,
            name: &r.entry.display_name,
            is_favorite: r.entry.is_favorite,
            phone_numbers: &r.entry.phone_numbers,
            match_kind: MatchKind::of(r),
            matched_number: r.matched_number.as_deref(),
        })
        .collect();

    to_json(&SearchResponse {
        query: query.trim(),
        total_matches: json_results.len(),
        results: json_results,
    })
}

/// A call with its day section and pre-formatted duration.
#[derive(Debug, Serialize)]
pub struct CallJson<'a> {
    #[serde(flatten)]
    pub call: &'a CallLogEntry,
    pub section: DateSection,
    pub duration: String,
}

impl<'a> CallJson<'a> {
    pub fn new(call: &'a CallLogEntry, now: DateTime<Utc>, tz: &FixedOffset) -> Self {
        CallJson {
            call,
            section: DateSection::of(call.timestamp, now, tz),
            duration: format_duration(call.duration_seconds),
        }
    }
}

/// Format the recent calls list as JSON.
pub fn format_calls(calls: &[CallLogEntry], now: DateTime<Utc>, tz: &FixedOffset) -> String {
    let json: Vec<CallJson> = calls.iter().map(|c| CallJson::new(c, now, tz)).collect();
    to_json(&json)
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse<'a> {
    pub number: &'a str,
    pub caller: Option<&'a CallerRef>,
    pub calls: Vec<CallJson<'a>>,
}

/// Format one number's call history, with the caller it resolves to.
pub fn format_history(
    number: &str,
    caller: Option<&CallerRef>,
    calls: &[CallLogEntry],
    now: DateTime<Utc>,
    tz: &FixedOffset,
) -> String {
    to_json(&HistoryResponse {
        number,
        caller,
        calls: calls.iter().map(|c| CallJson::new(c, now, tz)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CallDirection;
    use serde_json::Value;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn search_results_carry_match_kind() {
        let entry = DirectoryEntry {
            id: "1".to_string(),
            display_name: "Ann Lee".to_string(),
            phone_numbers: vec!["+15551230000".to_string()],
            ..Default::default()
        };
        let results = vec![
            SearchResult {
                entry: entry.clone(),
                matched_query: "555".to_string(),
                matched_number: Some("+15551230000".to_string()),
            },
            SearchResult {
                entry,
                matched_query: "ann".to_string(),
                matched_number: None,
            },
        ];

        let json: Value = serde_json::from_str(&format_search_results(&results, " 555 ")).unwrap();
        assert_eq!(json["query"], "555");
        assert_eq!(json["total_matches"], 2);
        assert_eq!(json["results"][0]["match"], "number");
        assert_eq!(json["results"][0]["matched_number"], "+15551230000");
        assert_eq!(json["results"][1]["match"], "name");
        assert!(json["results"][1].get("matched_number").is_none());
    }

    #[test]
    fn calls_are_flattened_with_section() {
        let now = DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let calls = vec![CallLogEntry {
            id: "c1".to_string(),
            linked_entry_id: None,
            photo_reference: None,
            display_name: None,
            number: "5550001".to_string(),
            direction: CallDirection::AnsweredExternally,
            timestamp: now - chrono::Duration::hours(1),
            duration_seconds: 75,
        }];

        let json: Value = serde_json::from_str(&format_calls(&calls, now, &utc())).unwrap();
        assert_eq!(json[0]["id"], "c1");
        assert_eq!(json[0]["direction"], "answered_externally");
        assert_eq!(json[0]["section"], "today");
        assert_eq!(json[0]["duration"], "1:15");
        assert!(json[0]["linked_entry_id"].is_null());
    }
}
