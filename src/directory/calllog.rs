//! Call-log enrichment: attach directory identity to each call by number lookup.

use chrono::{DateTime, Utc};
use log::debug;

use super::index::DirectoryIndex;
use super::number::{digits_only, same_number};
use crate::models::{CallDirection, CallLogEntry, CallLogRow};

/// Annotate every call-log row against the index.
///
/// A row whose number resolves to no entry is still emitted, unlinked. The result is
/// ordered most recent first; rows with equal timestamps keep their source order.
pub fn enrich(rows: Vec<CallLogRow>, index: &DirectoryIndex) -> Vec<CallLogEntry> {
    let mut linked = 0usize;
    let mut entries: Vec<CallLogEntry> = rows
        .into_iter()
        .map(|row| {
            let entry = enrich_row(row, index);
            if entry.linked_entry_id.is_some() {
                linked += 1;
            }
            entry
        })
        .collect();

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        "Enriched {} call log rows ({} linked to the directory)",
        entries.len(),
        linked
    );
    entries
}

/// Same as [`enrich`], restricted to calls with `target_number`.
///
/// A target without any digits matches nothing.
pub fn enrich_for_number(
    rows: Vec<CallLogRow>,
    target_number: &str,
    index: &DirectoryIndex,
) -> Vec<CallLogEntry> {
    if digits_only(target_number).is_empty() {
        return Vec::new();
    }
    let matching: Vec<CallLogRow> = rows
        .into_iter()
        .filter(|row| {
            row.number
                .as_deref()
                .is_some_and(|n| same_number(n, target_number))
        })
        .collect();
    enrich(matching, index)
}

fn enrich_row(row: CallLogRow, index: &DirectoryIndex) -> CallLogEntry {
    let number = row.number.unwrap_or_default();
    let entry = index.lookup(&number);

    let display_name = entry
        .map(|e| e.display_name.clone())
        .filter(|name| !name.is_empty())
        .or_else(|| row.cached_name.filter(|name| !name.trim().is_empty()));

    CallLogEntry {
        id: row.id,
        linked_entry_id: entry.map(|e| e.id.clone()),
        photo_reference: entry.and_then(|e| e.photo_reference.clone()),
        display_name,
        direction: CallDirection::from_code(row.raw_type),
        timestamp: timestamp_from_millis(row.timestamp_millis),
        duration_seconds: row.duration_seconds.max(0) as u64,
        number,
    }
}

/// Out-of-range timestamps collapse to the Unix epoch rather than failing the row.
fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
