use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::db::schema::get_schema_version;
use crate::models::CallDirection;

#[derive(Debug, Serialize)]
pub struct DbInfo {
    // Directory stats
    pub total_contacts: i64,
    pub favorite_contacts: i64,
    pub contacts_without_numbers: i64,
    pub total_phone_numbers: i64,

    // Call log stats
    pub total_calls: i64,
    pub missed_calls: i64,
    pub earliest_call: Option<DateTime<Utc>>,
    pub latest_call: Option<DateTime<Utc>>,
    pub last_import_at: Option<String>,

    // Database info
    pub db_path: PathBuf,
    pub db_size_bytes: u64,
    pub schema_version: usize,
}

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<i64> {
    conn.query_row(sql, [], |row| row.get(0))
}

pub fn get_info(conn: &Connection, db_path: &Path) -> Result<DbInfo> {
    let total_contacts = count(conn, "SELECT COUNT(*) FROM contacts")?;
    let favorite_contacts = count(conn, "SELECT COUNT(*) FROM contacts WHERE starred = 1")?;
    let contacts_without_numbers = count(
        conn,
        "SELECT COUNT(*) FROM contacts c
         WHERE NOT EXISTS (SELECT 1 FROM phone_numbers p WHERE p.contact_id = c.id)",
    )?;
    let total_phone_numbers = count(conn, "SELECT COUNT(*) FROM phone_numbers")?;

    let total_calls = count(conn, "SELECT COUNT(*) FROM call_log")?;
    let missed_calls: i64 = conn.query_row(
        "SELECT COUNT(*) FROM call_log WHERE type = ?1",
        [CallDirection::MISSED_CODE],
        |row| row.get(0),
    )?;

    let (earliest, latest): (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(date), MAX(date) FROM call_log",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let last_import_at: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = 'last_import_at'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let db_size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let schema_version = get_schema_version(conn).unwrap_or(0);

    Ok(DbInfo {
        total_contacts,
        favorite_contacts,
        contacts_without_numbers,
        total_phone_numbers,
        total_calls,
        missed_calls,
        earliest_call: earliest.and_then(DateTime::<Utc>::from_timestamp_millis),
        latest_call: latest.and_then(DateTime::<Utc>::from_timestamp_millis),
        last_import_at,
        db_path: db_path.to_path_buf(),
        db_size_bytes,
        schema_version,
    })
}
