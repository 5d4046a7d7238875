pub mod contacts;
pub mod history;
pub mod import;
pub mod info;
pub mod recents;
pub mod search;
pub mod settings;

use anyhow::{Result, bail};
use log::debug;
use rusqlite::Connection;

use crate::db::source::SqliteSource;
use crate::directory::{DirectoryIndex, load_index};
use crate::output::format::LoadState;

/// Settle a load for rendering: a value, or one user-facing error.
pub fn settle<T>(state: LoadState<T>, what: &str) -> Result<T> {
    match state {
        LoadState::Success(value) => Ok(value),
        LoadState::Error(message) => bail!("Failed to load {}: {}", what, message),
        LoadState::Loading => bail!("{} is still loading", what),
    }
}

/// Build a fresh directory index from the store.
pub fn load_directory(conn: &Connection) -> Result<DirectoryIndex> {
    let index = settle(LoadState::from_result(load_index(&SqliteSource(conn))), "contacts")?;
    debug!("Loaded {} contacts, {} numbers", index.len(), index.number_count());
    Ok(index)
}
