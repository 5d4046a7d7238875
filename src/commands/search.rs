use anyhow::Result;
use rusqlite::Connection;

use crate::cli::context::RunContext;
use crate::output::format::{OutputMode, empty_message};
use crate::query::search::search;

pub fn run(conn: &Connection, query: &str, ctx: &RunContext) -> Result<()> {
    let index = super::load_directory(conn)?;
    let results = search(query, index.entries());

    match ctx.output_mode {
        OutputMode::Json => {
            println!("{}", crate::output::json::format_search_results(&results, query));
        }
        OutputMode::Tty => {
            if results.is_empty() {
                let shown = if index.is_empty() { None } else { Some(query) };
                println!("{}", empty_message(shown, "contacts"));
                return Ok(());
            }
            for result in &results {
                println!("{}", crate::output::table::format_search_result(result, &ctx.settings));
            }
        }
    }

    Ok(())
}
