use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::Connection;

use crate::cli::context::RunContext;
use crate::db::source::SqliteSource;
use crate::directory::load_call_log;
use crate::directory::number::digits_only;
use crate::output::format::{LoadState, OutputMode};

pub fn run(conn: &Connection, number: &str, ctx: &RunContext) -> Result<()> {
    if digits_only(number).is_empty() {
        bail!("\"{}\" is not a phone number", number);
    }

    let now = Utc::now();
    let index = super::load_directory(conn)?;
    let caller = index.caller_for(number);
    let calls = super::settle(
        LoadState::from_result(load_call_log(&SqliteSource(conn), &index, Some(number))),
        "call log",
    )?;

    match ctx.output_mode {
        OutputMode::Json => {
            println!(
                "{}",
                crate::output::json::format_history(number, caller.as_ref(), &calls, now, &ctx.tz)
            );
        }
        OutputMode::Tty => {
            println!(
                "{}",
                crate::output::table::format_caller_header(number, caller.as_ref(), &ctx.settings)
            );
            println!();
            if calls.is_empty() {
                println!("No calls with this number.");
                return Ok(());
            }
            super::recents::print_sections(&calls, now, ctx);
        }
    }

    Ok(())
}
