use rusqlite::Connection;

use crate::db::calls::fetch_call_log_rows;
use crate::db::contacts::fetch_directory_rows;
use crate::directory::source::DirectoryResult;
use crate::directory::DirectorySource;
use crate::models::{CallLogRow, DirectoryRow};

/// Reads directory and call-log rows out of the local store.
pub struct SqliteSource<'a>(pub &'a Connection);

impl DirectorySource for SqliteSource<'_> {
    fn directory_rows(&self) -> DirectoryResult<Vec<DirectoryRow>> {
        Ok(fetch_directory_rows(self.0)?)
    }

    fn call_log_rows(&self) -> DirectoryResult<Vec<CallLogRow>> {
        Ok(fetch_call_log_rows(self.0)?)
    }
}
