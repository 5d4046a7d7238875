//! Schema helpers for inspection and test databases.

use anyhow::Result;
use rusqlite::Connection;

use crate::db::migrations;

/// Get the current schema version.
pub fn get_schema_version(conn: &Connection) -> Result<usize> {
    migrations::get_schema_version(conn)
}

/// An in-memory database with the full schema, for tests.
#[cfg(test)]
pub fn in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    migrations::migrate_in_place(&mut conn)?;
    Ok(conn)
}
