//! In-memory join of directory rows into entries plus a number → entry reverse index.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::number::{digits_only, normalize};
use crate::models::{CallerRef, DirectoryEntry, DirectoryRow};

/// Immutable snapshot of the directory.
///
/// Entries keep the order their ids were first seen in the source rows. The reverse
/// index maps each normalized number to the id of the entry that owns it. When two
/// entries claim the same number, the entry later in first-seen order wins, not the
/// entry whose number row came last.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    entries: Vec<DirectoryEntry>,
    by_id: HashMap<String, usize>,
    by_number: HashMap<String, String>,
    by_digits: HashMap<String, String>,
}

/// Entry being assembled from one or more rows.
struct Pending {
    id: String,
    display_name: Option<String>,
    photo_reference: Option<String>,
    is_favorite: Option<bool>,
    numbers: Vec<String>,
    seen: HashSet<String>,
}

impl Pending {
    fn new(id: String) -> Self {
        Pending {
            id,
            display_name: None,
            photo_reference: None,
            is_favorite: None,
            numbers: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Entry-level attributes: the first non-blank value sticks, later rows can only
    /// fill gaps. Numbers accumulate without duplicates.
    fn absorb(&mut self, row: DirectoryRow) {
        if self.display_name.is_none() {
            self.display_name = row.display_name.filter(|n| !n.trim().is_empty());
        }
        if self.photo_reference.is_none() {
            self.photo_reference = row.photo_reference.filter(|p| !p.is_empty());
        }
        if self.is_favorite.is_none() {
            self.is_favorite = row.is_favorite;
        }
        if let Some(number) = row.phone_number {
            if digits_only(&number).is_empty() {
                return;
            }
            let key = normalize(&number);
            if self.seen.insert(key) {
                self.numbers.push(number);
            }
        }
    }

    fn finish(self) -> DirectoryEntry {
        DirectoryEntry {
            id: self.id,
            display_name: self.display_name.unwrap_or_default(),
            photo_reference: self.photo_reference,
            phone_numbers: self.numbers,
            is_favorite: self.is_favorite.unwrap_or(false),
        }
    }
}

/// Build the index in a single pass over the rows.
///
/// Rows may arrive in any order and an entry may be spread over several rows (one
/// per phone number). An entry with no numbers is still indexed by id. Numbers
/// with no digits at all are skipped.
pub fn build_index<I>(rows: I) -> DirectoryIndex
where
    I: IntoIterator<Item = DirectoryRow>,
{
    let mut pending: Vec<Pending> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut row_count = 0usize;

    for row in rows {
        row_count += 1;
        let slot = match by_id.get(&row.id) {
            Some(&slot) => slot,
            None => {
                by_id.insert(row.id.clone(), pending.len());
                pending.push(Pending::new(row.id.clone()));
                pending.len() - 1
            }
        };
        pending[slot].absorb(row);
    }

    let entries: Vec<DirectoryEntry> = pending.into_iter().map(Pending::finish).collect();

    let mut by_number = HashMap::new();
    let mut by_digits = HashMap::new();
    for entry in &entries {
        for number in &entry.phone_numbers {
            by_number.insert(normalize(number), entry.id.clone());
            by_digits.insert(digits_only(number), entry.id.clone());
        }
    }

    debug!(
        "Built directory index: {} rows -> {} entries, {} numbers",
        row_count,
        entries.len(),
        by_number.len()
    );

    DirectoryIndex {
        entries,
        by_id,
        by_number,
        by_digits,
    }
}

impl DirectoryIndex {
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of normalized numbers in the reverse index.
    pub fn number_count(&self) -> usize {
        self.by_number.len()
    }

    pub fn get(&self, id: &str) -> Option<&DirectoryEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Find the entry owning `number`.
    ///
    /// The exact normalized form is tried first; failing that, a number that differs
    /// only by a leading `+` resolves to the same entry.
    pub fn lookup(&self, number: &str) -> Option<&DirectoryEntry> {
        let key = normalize(number);
        if key.is_empty() {
            return None;
        }
        self.by_number
            .get(&key)
            .or_else(|| self.by_digits.get(&digits_only(number)))
            .and_then(|id| self.get(id))
    }

    /// The projection attached to call-log rows: who called, and their photo.
    pub fn caller_for(&self, number: &str) -> Option<CallerRef> {
        self.lookup(number).map(|entry| CallerRef {
            entry_id: entry.id.clone(),
            name: entry.display_name.clone(),
            photo_reference: entry.photo_reference.clone(),
        })
    }

    pub fn favorites(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter().filter(|e| e.is_favorite)
    }
}
