//! Domain types for dialbook.
//!
//! Raw rows (`DirectoryRow`, `CallLogRow`) are what the data source hands over; the
//! annotated values (`DirectoryEntry`, `CallLogEntry`, `SearchResult`) are what the
//! directory and query layers produce for rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Source rows
// ============================================================================

/// One row from the directory source.
///
/// A source may deliver an entry row without a number, and then one row per phone
/// number carrying only the entry id. Every attribute except `id` is optional so
/// partial rows can be expressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRow {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_reference: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// One row from the call-log source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallLogRow {
    pub id: String,
    #[serde(default)]
    pub cached_name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub raw_type: Option<i64>,
    pub timestamp_millis: i64,
    #[serde(default)]
    pub duration_seconds: i64,
}

// ============================================================================
// Directory
// ============================================================================

/// An addressable identity: a contact with its phone numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
    pub phone_numbers: Vec<String>,
    pub is_favorite: bool,
}

impl DirectoryEntry {
    /// Copy of this entry with the favorite flag replaced.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        DirectoryEntry {
            is_favorite,
            ..self.clone()
        }
    }
}

/// The lighter projection of an entry used to annotate a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerRef {
    pub entry_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
}

// ============================================================================
// Call log
// ============================================================================

/// Direction (or disposition) of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
    Blocked,
    Voicemail,
    AnsweredExternally,
    Unknown,
}

impl CallDirection {
    pub const INCOMING_CODE: i64 = 1;
    pub const OUTGOING_CODE: i64 = 2;
    pub const MISSED_CODE: i64 = 3;
    pub const VOICEMAIL_CODE: i64 = 4;
    pub const REJECTED_CODE: i64 = 5;
    pub const BLOCKED_CODE: i64 = 6;
    pub const ANSWERED_EXTERNALLY_CODE: i64 = 7;

    /// Map a raw call-log type code. Anything unrecognized (or missing) is `Unknown`.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(Self::INCOMING_CODE) => CallDirection::Incoming,
            Some(Self::OUTGOING_CODE) => CallDirection::Outgoing,
            Some(Self::MISSED_CODE) => CallDirection::Missed,
            Some(Self::VOICEMAIL_CODE) => CallDirection::Voicemail,
            Some(Self::REJECTED_CODE) => CallDirection::Rejected,
            Some(Self::BLOCKED_CODE) => CallDirection::Blocked,
            Some(Self::ANSWERED_EXTERNALLY_CODE) => CallDirection::AnsweredExternally,
            _ => CallDirection::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallDirection::Incoming => "incoming",
            CallDirection::Outgoing => "outgoing",
            CallDirection::Missed => "missed",
            CallDirection::Rejected => "rejected",
            CallDirection::Blocked => "blocked",
            CallDirection::Voicemail => "voicemail",
            CallDirection::AnsweredExternally => "answered elsewhere",
            CallDirection::Unknown => "unknown",
        }
    }
}

/// A historical call, annotated with the directory entry its number resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallLogEntry {
    pub id: String,
    pub linked_entry_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
    /// Linked entry's name, else the source's cached name.
    pub display_name: Option<String>,
    pub number: String,
    pub direction: CallDirection,
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: u64,
}

// ============================================================================
// Search
// ============================================================================

/// One search hit. `matched_number` is set when the hit came from that number
/// rather than the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub entry: DirectoryEntry,
    pub matched_query: String,
    pub matched_number: Option<String>,
}

impl SearchResult {
    /// Identity of the row in a result list. An entry can appear once per number plus
    /// once for its name, so the id alone is not unique.
    pub fn key(&self) -> (&str, Option<&str>) {
        (self.entry.id.as_str(), self.matched_number.as_deref())
    }
}

/// Full view of one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
    pub phone_numbers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_known_codes() {
        assert_eq!(CallDirection::from_code(Some(1)), CallDirection::Incoming);
        assert_eq!(CallDirection::from_code(Some(2)), CallDirection::Outgoing);
        assert_eq!(CallDirection::from_code(Some(3)), CallDirection::Missed);
        assert_eq!(CallDirection::from_code(Some(4)), CallDirection::Voicemail);
        assert_eq!(CallDirection::from_code(Some(5)), CallDirection::Rejected);
        assert_eq!(CallDirection::from_code(Some(6)), CallDirection::Blocked);
        assert_eq!(CallDirection::from_code(Some(7)), CallDirection::AnsweredExternally);
    }

    #[test]
    fn direction_unrecognized_code_is_unknown() {
        assert_eq!(CallDirection::from_code(Some(99)), CallDirection::Unknown);
        assert_eq!(CallDirection::from_code(Some(-1)), CallDirection::Unknown);
        assert_eq!(CallDirection::from_code(None), CallDirection::Unknown);
    }

    #[test]
    fn direction_serializes_snake_case() {
        let json = serde_json::to_string(&CallDirection::AnsweredExternally).unwrap();
        assert_eq!(json, "\"answered_externally\"");
    }

    #[test]
    fn with_favorite_leaves_original_untouched() {
        let entry = DirectoryEntry {
            id: "1".to_string(),
            display_name: "Ann Lee".to_string(),
            phone_numbers: vec!["+15551230000".to_string()],
            ..Default::default()
        };
        let starred = entry.with_favorite(true);
        assert!(starred.is_favorite);
        assert!(!entry.is_favorite);
        assert_eq!(starred.phone_numbers, entry.phone_numbers);
    }

    #[test]
    fn search_result_key_distinguishes_numbers() {
        let entry = DirectoryEntry {
            id: "1".to_string(),
            ..Default::default()
        };
        let by_name = SearchResult {
            entry: entry.clone(),
            matched_query: "a".to_string(),
            matched_number: None,
        };
        let by_number = SearchResult {
            entry,
            matched_query: "5".to_string(),
            matched_number: Some("555".to_string()),
        };
        assert_ne!(by_name.key(), by_number.key());
        assert_eq!(by_number.key(), ("1", Some("555")));
    }
}
