use anyhow::Result;
use log::debug;
use rusqlite::Connection;

use crate::db::migrations;

/// Get the default database path inside the data directory.
pub fn default_db_path() -> Result<std::path::PathBuf> {
    let data_dir = crate::platform::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("dialbook.db"))
}

/// Open or create the dialbook database at the default location.
/// Uses the migration system to ensure the schema is up-to-date.
pub fn open_or_create_db() -> Result<Connection> {
    let db_path = default_db_path()?;
    open_db_at_path(&db_path)
}

/// Open a database at a specific path.
/// Uses the migration system to ensure the schema is up-to-date.
pub fn open_db_at_path(path: &std::path::Path) -> Result<Connection> {
    debug!("Opening database at {}", path.display());
    let conn = migrations::open_and_migrate(path)?;
    let version = migrations::get_schema_version(&conn).unwrap_or(0);
    debug!("Database opened (schema version {})", version);
    Ok(conn)
}
