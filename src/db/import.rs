//! Load a device export (contacts + call log as JSON) into the store.

use anyhow::{Context, Result};
use log::{debug, warn};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// A full dump of a device's contacts and call log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceExport {
    #[serde(default)]
    pub contacts: Vec<ExportContact>,
    #[serde(default)]
    pub calls: Vec<ExportCall>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportContact {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_uri: Option<String>,
    #[serde(default)]
    pub starred: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportCall {
    pub id: String,
    #[serde(default)]
    pub cached_name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(rename = "type", default)]
    pub call_type: Option<i64>,
    /// Epoch milliseconds.
    pub date: i64,
    /// Seconds.
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub phone_numbers: usize,
    pub calls: usize,
    pub skipped: usize,
}

/// Parse an export file.
pub fn read_export(path: &std::path::Path) -> Result<DeviceExport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid export file {}", path.display()))
}

/// Write `export` into the store in one transaction.
///
/// With `replace`, existing contacts and calls are removed first. Otherwise rows
/// are upserted by id and an imported contact's numbers replace its stored ones.
/// Rows with a blank id are skipped.
pub fn import_export(conn: &mut Connection, export: &DeviceExport, replace: bool) -> Result<ImportStats> {
    let tx = conn.transaction()?;
    let mut stats = ImportStats::default();

    if replace {
        tx.execute_batch("DELETE FROM phone_numbers; DELETE FROM contacts; DELETE FROM call_log;")?;
    }

    for contact in &export.contacts {
        if contact.id.trim().is_empty() {
            warn!("Skipping contact without an id");
            stats.skipped += 1;
            continue;
        }
        tx.execute(
            "INSERT INTO contacts (id, display_name, photo_uri, starred, email)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                display_name = excluded.display_name,
                photo_uri = excluded.photo_uri,
                starred = excluded.starred,
                email = excluded.email",
            params![
                contact.id,
                contact.name,
                contact.photo_uri,
                contact.starred.unwrap_or(false) as i64,
                contact.email,
            ],
        )?;
        tx.execute("DELETE FROM phone_numbers WHERE contact_id = ?1", [&contact.id])?;
        for number in &contact.numbers {
            tx.execute(
                "INSERT INTO phone_numbers (contact_id, number) VALUES (?1, ?2)",
                params![contact.id, number],
            )?;
            stats.phone_numbers += 1;
        }
        stats.contacts += 1;
    }

    for call in &export.calls {
        if call.id.trim().is_empty() {
            warn!("Skipping call log row without an id");
            stats.skipped += 1;
            continue;
        }
        tx.execute(
            "INSERT OR REPLACE INTO call_log (id, cached_name, number, type, date, duration)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                call.id,
                call.cached_name,
                call.number,
                call.call_type,
                call.date,
                call.duration,
            ],
        )?;
        stats.calls += 1;
    }

    tx.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('last_import_at', ?1)",
        [chrono::Utc::now().to_rfc3339()],
    )?;

    tx.commit().context("Failed to commit import")?;
    debug!(
        "Imported {} contacts ({} numbers), {} calls, skipped {}",
        stats.contacts, stats.phone_numbers, stats.calls, stats.skipped
    );
    Ok(stats)
}
