//! The boundary between the directory core and whatever holds the raw rows.

use thiserror::Error;

use super::calllog::{enrich, enrich_for_number};
use super::index::{build_index, DirectoryIndex};
use crate::models::{CallLogEntry, CallLogRow, DirectoryRow};

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory source unavailable: {0}")]
    Unavailable(String),

    #[error("Directory query failed: {0}")]
    Query(rusqlite::Error),
}

impl From<rusqlite::Error> for DirectoryError {
    /// A store that is busy, locked or cannot be opened is unavailable; anything
    /// else is a failed query.
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen) => {
                DirectoryError::Unavailable(err.to_string())
            }
            _ => DirectoryError::Query(err),
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A bulk reader of directory and call-log rows.
///
/// Each method fetches everything in one go. Implementations must not hand back a
/// partial result on failure.
pub trait DirectorySource {
    /// All directory rows: entry rows and per-number rows, in any order.
    fn directory_rows(&self) -> DirectoryResult<Vec<DirectoryRow>>;

    /// All call-log rows.
    fn call_log_rows(&self) -> DirectoryResult<Vec<CallLogRow>>;
}

/// Fetch the directory and build a fresh index.
pub fn load_index<S: DirectorySource + ?Sized>(source: &S) -> DirectoryResult<DirectoryIndex> {
    Ok(build_index(source.directory_rows()?))
}

/// Fetch the call log and enrich it against `index`, optionally for one number only.
pub fn load_call_log<S: DirectorySource + ?Sized>(
    source: &S,
    index: &DirectoryIndex,
    number: Option<&str>,
) -> DirectoryResult<Vec<CallLogEntry>> {
    let rows = source.call_log_rows()?;
    Ok(match number {
        Some(n) => enrich_for_number(rows, n, index),
        None => enrich(rows, index),
    })
}
