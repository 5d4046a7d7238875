use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::Connection;

use crate::cli::context::RunContext;
use crate::db::info::{DbInfo, get_info};
use crate::output::format::OutputMode;
use crate::output::json::to_json;

/// Run info command
pub fn run(conn: &Connection, db_path: &Path, ctx: &RunContext) -> Result<()> {
    let info = get_info(conn, db_path)?;

    match ctx.output_mode {
        OutputMode::Json => println!("{}", to_json(&info)),
        OutputMode::Tty => print_tty(&info, &ctx.tz),
    }

    Ok(())
}

fn print_tty(info: &DbInfo, tz: &FixedOffset) {
    println!("\x1b[1mDirectory\x1b[0m");
    println!("\x1b[2m─────────\x1b[0m");

    println!(
        "Contacts:        \x1b[1m{}\x1b[0m",
        format_number(info.total_contacts)
    );
    println!("  Favorites:     {}", format_number(info.favorite_contacts));
    println!(
        "  No number:     {}",
        format_number(info.contacts_without_numbers)
    );
    println!("Phone numbers:   {}", format_number(info.total_phone_numbers));

    println!();
    println!("\x1b[1mCall log\x1b[0m");
    println!("\x1b[2m────────\x1b[0m");

    println!(
        "Calls:           \x1b[1m{}\x1b[0m",
        format_number(info.total_calls)
    );

    let missed_pct = if info.total_calls > 0 {
        (info.missed_calls as f64 / info.total_calls as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Missed:        {} ({:.1}%)",
        format_number(info.missed_calls),
        missed_pct
    );

    if let (Some(earliest), Some(latest)) = (&info.earliest_call, &info.latest_call) {
        println!(
            "  Date Range:    {} to {}",
            format_date(earliest, tz),
            format_date(latest, tz)
        );
    }

    if let Some(imported) = &info.last_import_at {
        let shown = DateTime::parse_from_rfc3339(imported)
            .map(|dt| format_date(&dt.with_timezone(&Utc), tz))
            .unwrap_or_else(|_| imported.clone());
        println!("Last import:     {}", shown);
    }

    println!();
    println!("\x1b[1mDatabase\x1b[0m");
    println!("\x1b[2m────────\x1b[0m");

    println!("Path:           {}", info.db_path.display());
    println!("Size:           {}", format_size(info.db_size_bytes));
    println!("Schema version: {}", info.schema_version);
}

fn format_number(n: i64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn format_date(dt: &DateTime<Utc>, tz: &FixedOffset) -> String {
    dt.with_timezone(tz).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn format_date_uses_offset() {
        let dt = DateTime::parse_from_rfc3339("2026-01-01T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_date(&dt, &plus_two), "2026-01-02");
    }
}
