use std::ops::Range;

use chrono::{DateTime, FixedOffset, Utc};
use colored::{ColoredString, Colorize};

use crate::models::{CallDirection, CallLogEntry, CallerRef, ContactDetails, DirectoryEntry, SearchResult};
use crate::output::avatar::badge;
use crate::query::dates::{DateSection, format_duration};
use crate::query::search::MatchKind;
use crate::query::text::{digit_span, find_ignore_case, token_prefix_ranges};
use crate::settings::{AvatarStyle, DialerLayout, Settings, Theme};

/// Colour the given byte ranges of `text` as matches. Ranges must lie on char
/// boundaries and be sorted.
pub fn highlight(text: &str, ranges: &[Range<usize>], theme: Theme) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for r in ranges {
        if r.start < cursor || r.end > text.len() {
            continue;
        }
        out.push_str(&text[cursor..r.start]);
        out.push_str(&match_style(&text[r.clone()], theme).to_string());
        cursor = r.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn match_style(s: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => s.yellow().bold(),
        Theme::Light => s.blue().bold(),
        Theme::System => s.bold().underline(),
    }
}

fn favorite_mark(is_favorite: bool) -> String {
    if is_favorite {
        " ★".yellow().to_string()
    } else {
        String::new()
    }
}

fn name_or_placeholder(name: &str) -> &str {
    if name.trim().is_empty() { "(no name)" } else { name }
}

/// Format a directory entry for TTY list display.
pub fn format_contact_row(entry: &DirectoryEntry, settings: &Settings) -> String {
    let name = name_or_placeholder(&entry.display_name);
    let head = format!(
        "{} {}{} {}",
        badge(name, settings.avatar_style, settings.theme),
        name.bold(),
        favorite_mark(entry.is_favorite),
        format!("[{}]", entry.id).dimmed()
    );

    match settings.dialer_layout {
        DialerLayout::Compact => {
            if entry.phone_numbers.is_empty() {
                head
            } else {
                format!("{}  {}", head, entry.phone_numbers.join(", ").dimmed())
            }
        }
        DialerLayout::Standard => {
            let mut lines = vec![head];
            for number in &entry.phone_numbers {
                lines.push(format!("    {}", number.dimmed()));
            }
            lines.join("\n")
        }
    }
}

/// Format a contact detail view for TTY.
pub fn format_contact_detail(details: &ContactDetails, settings: &Settings) -> String {
    let mut lines = Vec::new();

    let name = name_or_placeholder(&details.name);
    lines.push(format!(
        "{} {}{}",
        badge(name, settings.avatar_style, settings.theme),
        name.bold(),
        favorite_mark(details.is_favorite)
    ));
    lines.push("─".repeat(name.chars().count() + 3));
    lines.push(format!("{}    {}", "ID:".dimmed(), details.id));

    if let Some(email) = &details.email {
        lines.push(format!("{} {}", "Email:".dimmed(), email));
    }
    if let Some(photo) = &details.photo_reference {
        lines.push(format!("{} {}", "Photo:".dimmed(), photo.dimmed()));
    }

    lines.push(String::new());
    if details.phone_numbers.is_empty() {
        lines.push("No phone numbers.".dimmed().to_string());
    } else {
        lines.push("Numbers:".dimmed().to_string());
        for number in &details.phone_numbers {
            lines.push(format!("  {} {}", "•".dimmed(), number));
        }
    }

    lines.join("\n")
}

/// Format a search hit, highlighting whatever matched.
pub fn format_search_result(result: &SearchResult, settings: &Settings) -> String {
    let entry = &result.entry;
    let name = name_or_placeholder(&entry.display_name);
    let query = result.matched_query.as_str();

    let name_ranges: Vec<Range<usize>> = match MatchKind::of(result) {
        MatchKind::Name => find_ignore_case(&entry.display_name, query).into_iter().collect(),
        MatchKind::Initials => token_prefix_ranges(&entry.display_name, query),
        MatchKind::All | MatchKind::Number => Vec::new(),
    };
    let name_text = if entry.display_name.trim().is_empty() {
        name.dimmed().to_string()
    } else {
        highlight(name, &name_ranges, settings.theme)
    };

    let number_text = match &result.matched_number {
        Some(number) => {
            let digits = crate::directory::number::digits_only(query);
            let span: Vec<Range<usize>> = digit_span(number, &digits).into_iter().collect();
            highlight(number, &span, settings.theme)
        }
        None => entry
            .phone_numbers
            .first()
            .map(|n| n.dimmed().to_string())
            .unwrap_or_default(),
    };

    format!(
        "{} {}{}  {}",
        badge(name, settings.avatar_style, settings.theme),
        name_text,
        favorite_mark(entry.is_favorite),
        number_text
    )
}

/// Format a day section heading.
pub fn format_section_header(section: DateSection) -> String {
    section.title().bold().underline().to_string()
}

fn direction_glyph(direction: CallDirection) -> ColoredString {
    match direction {
        CallDirection::Incoming => "↙".green(),
        CallDirection::Outgoing => "↗".cyan(),
        CallDirection::Missed => "↙".red().bold(),
        CallDirection::Rejected | CallDirection::Blocked => "⊘".red(),
        CallDirection::Voicemail => "✉".blue(),
        CallDirection::AnsweredExternally => "⇄".dimmed(),
        CallDirection::Unknown => "?".dimmed(),
    }
}

fn format_call_time(call: &CallLogEntry, now: DateTime<Utc>, tz: &FixedOffset) -> String {
    let local = call.timestamp.with_timezone(tz);
    match DateSection::of(call.timestamp, now, tz) {
        DateSection::Today | DateSection::Yesterday => local.format("%H:%M").to_string(),
        DateSection::Older => local.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Format a call-log entry for TTY display.
pub fn format_call_row(
    call: &CallLogEntry,
    now: DateTime<Utc>,
    tz: &FixedOffset,
    settings: &Settings,
) -> String {
    let name = call.display_name.as_deref().unwrap_or("Unknown");
    let name_text = if call.direction == CallDirection::Missed {
        name.red().bold().to_string()
    } else {
        name.bold().to_string()
    };
    let number = if call.number.is_empty() {
        "(no number)".to_string()
    } else {
        call.number.clone()
    };
    let when = format_call_time(call, now, tz).dimmed().to_string();
    let duration = format_duration(call.duration_seconds);
    let direction = format!("{} {}", direction_glyph(call.direction), call.direction.label().dimmed());

    match settings.dialer_layout {
        DialerLayout::Compact => {
            let mut line = format!("{} {} {} {}", when, direction_glyph(call.direction), name_text, number.dimmed());
            if !duration.is_empty() {
                line.push_str(&format!(" {}", duration.dimmed()));
            }
            line
        }
        DialerLayout::Standard => {
            let style = if call.linked_entry_id.is_some() {
                settings.avatar_style
            } else {
                AvatarStyle::Icon
            };
            let head = format!(
                "{} {}  {}",
                badge(name, style, settings.theme),
                name_text,
                when
            );
            let mut detail = format!("    {} {}", direction, number.dimmed());
            if !duration.is_empty() {
                detail.push_str(&format!("  {}", duration));
            }
            format!("{}\n{}", head, detail)
        }
    }
}

/// Header for a single number's call history.
pub fn format_caller_header(number: &str, caller: Option<&CallerRef>, settings: &Settings) -> String {
    match caller {
        Some(c) => format!(
            "{} {} {}",
            badge(&c.name, settings.avatar_style, settings.theme),
            c.name.bold(),
            format!("[{}]  {}", c.entry_id, number).dimmed()
        ),
        None => format!("{} {}", "Unknown caller".bold(), number.dimmed()),
    }
}

/// Format settings as `key = value` lines.
pub fn format_settings(settings: &Settings) -> String {
    settings
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{:<14} {}", key.dimmed(), value.bold()))
        .collect::<Vec<_>>()
        .join("\n")
}
