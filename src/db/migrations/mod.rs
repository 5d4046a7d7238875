//! Database migration system using rusqlite_migration.
//!
//! Migrations are embedded SQL files run in order to bring the store up to the
//! current schema version, tracked in the `user_version` pragma.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use rusqlite_migration::{Migrations, SchemaVersion, M};

const MIGRATION_SOURCES: &[&str] = &[
    include_str!("v001_initial_schema.sql"),
    include_str!("v002_metadata.sql"),
];

/// All migrations, in order. Each one brings the schema from version N to N+1.
fn migrations() -> Migrations<'static> {
    Migrations::new(MIGRATION_SOURCES.iter().map(|sql| M::up(sql)).collect())
}

/// Schema version once every migration has been applied.
pub fn latest_version() -> usize {
    MIGRATION_SOURCES.len()
}

/// Open the database, running any pending migrations.
/// Backs up the database before applying migrations if it already has a schema.
pub fn open_and_migrate(db_path: &Path) -> Result<Connection> {
    let db_exists = db_path.exists();

    let mut conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let m = migrations();
    let current_version = m
        .current_version(&conn)
        .context("Failed to check current schema version")?;

    let needs_migration = match current_version {
        SchemaVersion::NoneSet => true,
        SchemaVersion::Inside(v) => v.get() < latest_version(),
        SchemaVersion::Outside(_) => false,
    };

    if needs_migration && db_exists && !matches!(current_version, SchemaVersion::NoneSet) {
        backup_database(db_path)?;
        info!("Applying database migration(s) to {}", db_path.display());
    } else if needs_migration && !db_exists {
        info!("Creating new database at {}", db_path.display());
    }

    m.to_latest(&mut conn)
        .context("Failed to apply database migrations")?;
    enable_foreign_keys(&conn)?;

    Ok(conn)
}

/// Bring an already-open connection (e.g. in-memory) to the latest schema.
pub fn migrate_in_place(conn: &mut Connection) -> Result<()> {
    migrations()
        .to_latest(conn)
        .context("Failed to apply database migrations")?;
    enable_foreign_keys(conn)
}

fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .context("Failed to enable foreign keys")
}

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> Result<usize> {
    let version = migrations()
        .current_version(conn)
        .context("Failed to get schema version")?;

    Ok(match version {
        SchemaVersion::NoneSet => 0,
        SchemaVersion::Inside(v) => v.get(),
        SchemaVersion::Outside(v) => v.get(),
    })
}

/// Copy the database file aside before migrating it.
fn backup_database(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        return Ok(());
    }

    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let backup_path = db_path.with_extension(format!("db.backup.{}", timestamp));

    std::fs::copy(db_path, &backup_path)
        .with_context(|| format!("Failed to backup database to {}", backup_path.display()))?;

    info!("Backed up database to {}", backup_path.display());
    Ok(())
}
