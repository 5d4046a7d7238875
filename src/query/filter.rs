use crate::directory::DirectoryIndex;
use crate::models::{CallDirection, CallLogEntry};

/// Which calls the recents view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CallFilter {
    #[default]
    All,
    Missed,
    /// Calls linked to a directory entry.
    Contacts,
    /// Calls linked to a favorite entry.
    #[value(alias = "favorites")]
    Favourites,
    /// Calls from numbers not in the directory.
    Unknown,
}

impl CallFilter {
    pub fn matches(&self, call: &CallLogEntry, index: &DirectoryIndex) -> bool {
        match self {
            CallFilter::All => true,
            CallFilter::Missed => call.direction == CallDirection::Missed,
            CallFilter::Contacts => call.linked_entry_id.is_some(),
            CallFilter::Favourites => call
                .linked_entry_id
                .as_deref()
                .and_then(|id| index.get(id))
                .is_some_and(|e| e.is_favorite),
            CallFilter::Unknown => call.linked_entry_id.is_none(),
        }
    }
}

/// Keep the calls `filter` admits, in order.
pub fn apply(calls: Vec<CallLogEntry>, filter: CallFilter, index: &DirectoryIndex) -> Vec<CallLogEntry> {
    calls.into_iter().filter(|c| filter.matches(c, index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{build_index, enrich};
    use crate::models::{CallLogRow, DirectoryRow};

    fn fixture() -> (DirectoryIndex, Vec<CallLogEntry>) {
        let index = build_index(vec![
            DirectoryRow {
                id: "fav".to_string(),
                display_name: Some("Favorite Person".to_string()),
                is_favorite: Some(true),
                phone_number: Some("5550001".to_string()),
                ..Default::default()
            },
            DirectoryRow {
                id: "plain".to_string(),
                display_name: Some("Plain Person".to_string()),
                phone_number: Some("5550002".to_string()),
                ..Default::default()
            },
        ]);
        let rows = vec![
            CallLogRow {
                id: "c1".to_string(),
                number: Some("5550001".to_string()),
                raw_type: Some(CallDirection::MISSED_CODE),
                timestamp_millis: 4,
                ..Default::default()
            },
            CallLogRow {
                id: "c2".to_string(),
                number: Some("5550002".to_string()),
                raw_type: Some(CallDirection::INCOMING_CODE),
                timestamp_millis: 3,
                ..Default::default()
            },
            CallLogRow {
                id: "c3".to_string(),
                number: Some("5559999".to_string()),
                raw_type: Some(CallDirection::MISSED_CODE),
                timestamp_millis: 2,
                ..Default::default()
            },
        ];
        let calls = enrich(rows, &index);
        (index, calls)
    }

    fn ids(calls: &[CallLogEntry]) -> Vec<&str> {
        calls.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn all_keeps_everything() {
        let (index, calls) = fixture();
        assert_eq!(ids(&apply(calls, CallFilter::All, &index)), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn missed_only() {
        let (index, calls) = fixture();
        assert_eq!(ids(&apply(calls, CallFilter::Missed, &index)), vec!["c1", "c3"]);
    }

    #[test]
    fn contacts_vs_unknown() {
        let (index, calls) = fixture();
        assert_eq!(ids(&apply(calls.clone(), CallFilter::Contacts, &index)), vec!["c1", "c2"]);
        assert_eq!(ids(&apply(calls, CallFilter::Unknown, &index)), vec!["c3"]);
    }

    #[test]
    fn favourites_only() {
        let (index, calls) = fixture();
        assert_eq!(ids(&apply(calls, CallFilter::Favourites, &index)), vec!["c1"]);
    }
}
