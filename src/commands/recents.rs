use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::cli::context::RunContext;
use crate::db::source::SqliteSource;
use crate::directory::load_call_log;
use crate::models::CallLogEntry;
use crate::output::format::{LoadState, OutputMode};
use crate::query::dates::{DateRange, build_date_range, group_by_section, parse_absolute};
use crate::query::filter::{self, CallFilter};

pub struct RecentsOptions<'a> {
    pub filter: CallFilter,
    pub limit: usize,
    pub date: Option<&'a str>,
    pub since: Option<&'a str>,
    pub until: Option<&'a str>,
}

pub fn run(conn: &Connection, opts: &RecentsOptions, ctx: &RunContext) -> Result<()> {
    let now = Utc::now();
    let range = date_range(opts, now, ctx)?;

    let index = super::load_directory(conn)?;
    let calls = super::settle(
        LoadState::from_result(load_call_log(&SqliteSource(conn), &index, None)),
        "call log",
    )?;

    let mut calls = filter::apply(calls, opts.filter, &index);
    if let Some(range) = &range {
        calls.retain(|c| range.contains(&c.timestamp));
    }
    if opts.limit > 0 {
        calls.truncate(opts.limit);
    }

    match ctx.output_mode {
        OutputMode::Json => {
            println!("{}", crate::output::json::format_calls(&calls, now, &ctx.tz));
        }
        OutputMode::Tty => {
            if calls.is_empty() {
                println!("{}", empty_message(opts.filter));
                return Ok(());
            }
            print_sections(&calls, now, ctx);
        }
    }

    Ok(())
}

/// Calls grouped under day headings.
pub fn print_sections(calls: &[CallLogEntry], now: DateTime<Utc>, ctx: &RunContext) {
    for (i, (section, members)) in group_by_section(calls, now, &ctx.tz).into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", crate::output::table::format_section_header(section));
        for call in members {
            println!("{}", crate::output::table::format_call_row(call, now, &ctx.tz, &ctx.settings));
        }
    }
}

fn date_range(opts: &RecentsOptions, now: DateTime<Utc>, ctx: &RunContext) -> Result<Option<DateRange>> {
    if let Some(term) = opts.date {
        if crate::query::dates::parse_relative(term, now, &ctx.tz).is_none() {
            bail!(
                "Unknown date \"{}\". Use today, yesterday, this-week or last-week",
                term
            );
        }
    }
    for value in [opts.since, opts.until].into_iter().flatten() {
        if parse_absolute(value, &ctx.tz).is_none() {
            bail!("Invalid date \"{}\". Use YYYY-MM-DD or an RFC 3339 timestamp", value);
        }
    }
    Ok(build_date_range(opts.since, opts.until, opts.date, now, &ctx.tz))
}

fn empty_message(filter: CallFilter) -> &'static str {
    match filter {
        CallFilter::All => "No calls yet.",
        CallFilter::Missed => "No missed calls.",
        CallFilter::Contacts => "No calls from contacts.",
        CallFilter::Favourites => "No calls from favourites.",
        CallFilter::Unknown => "No calls from unknown numbers.",
    }
}
