use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use crate::db::import::{import_export, read_export};
use crate::output::format::OutputMode;
use crate::output::json::to_json;

pub fn run(conn: &mut Connection, file: &Path, replace: bool, mode: OutputMode) -> Result<()> {
    let export = read_export(file)?;
    let stats = import_export(conn, &export, replace)?;

    match mode {
        OutputMode::Json => println!("{}", to_json(&stats)),
        OutputMode::Tty => {
            println!(
                "Imported {} contacts ({} numbers) and {} calls.",
                stats.contacts, stats.phone_numbers, stats.calls
            );
            if stats.skipped > 0 {
                println!("Skipped {} rows without an id.", stats.skipped);
            }
        }
    }

    Ok(())
}
