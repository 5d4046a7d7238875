use log::debug;
use rusqlite::Connection;

use crate::models::CallLogRow;

/// Every call-log row, newest first. Ordering here is cosmetic; enrichment sorts again.
pub fn fetch_call_log_rows(conn: &Connection) -> rusqlite::Result<Vec<CallLogRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, cached_name, number, type, date, duration FROM call_log
         ORDER BY date DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CallLogRow {
                id: row.get(0)?,
                cached_name: row.get(1)?,
                number: row.get(2)?,
                raw_type: row.get(3)?,
                timestamp_millis: row.get(4)?,
                duration_seconds: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!("Fetched {} call log rows", rows.len());
    Ok(rows)
}
