use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::models::CallLogEntry;

/// Day bucket a call falls into, relative to "now" in the user's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSection {
    Today,
    Yesterday,
    Older,
}

impl DateSection {
    pub fn title(&self) -> &'static str {
        match self {
            DateSection::Today => "Today",
            DateSection::Yesterday => "Yesterday",
            DateSection::Older => "Older",
        }
    }

    pub fn of(ts: DateTime<Utc>, now: DateTime<Utc>, tz: &FixedOffset) -> Self {
        let today_start = start_of_day(now, tz);
        let tomorrow_start = today_start + Duration::days(1);
        let yesterday_start = today_start - Duration::days(1);

        if ts >= today_start && ts < tomorrow_start {
            DateSection::Today
        } else if ts >= yesterday_start && ts < today_start {
            DateSection::Yesterday
        } else {
            DateSection::Older
        }
    }
}

/// Split calls into day sections, keeping their order within each section.
///
/// Sections always come out as Today, Yesterday, Older. A call timestamped in the
/// future lands in `Older` with the genuinely old calls.
pub fn group_by_section<'a>(
    calls: &'a [CallLogEntry],
    now: DateTime<Utc>,
    tz: &FixedOffset,
) -> Vec<(DateSection, Vec<&'a CallLogEntry>)> {
    let mut groups: Vec<(DateSection, Vec<&CallLogEntry>)> = Vec::new();
    for call in calls {
        let section = DateSection::of(call.timestamp, now, tz);
        match groups.iter_mut().find(|(s, _)| *s == section) {
            Some((_, members)) => members.push(call),
            None => groups.push((section, vec![call])),
        }
    }
    groups.sort_by_key(|(section, _)| *section);
    groups
}

/// `m:ss`, or an empty string when nothing connected.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return String::new();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Inclusive-exclusive window used to narrow the call log.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        if let Some(start) = &self.start {
            if dt < start {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if dt >= end {
                return false;
            }
        }
        true
    }
}

/// Parse a relative date term into a DateRange, using `now` as reference.
pub fn parse_relative(term: &str, now: DateTime<Utc>, tz: &FixedOffset) -> Option<DateRange> {
    let today_start = start_of_day(now, tz);

    match term {
        "today" => Some(DateRange {
            start: Some(today_start),
            end: Some(today_start + Duration::days(1)),
        }),
        "yesterday" => Some(DateRange {
            start: Some(today_start - Duration::days(1)),
            end: Some(today_start),
        }),
        "this-week" => {
            let week_start = start_of_week(now, tz);
            Some(DateRange {
                start: Some(week_start),
                end: Some(week_start + Duration::days(7)),
            })
        }
        "last-week" => {
            let this_week_start = start_of_week(now, tz);
            Some(DateRange {
                start: Some(this_week_start - Duration::days(7)),
                end: Some(this_week_start),
            })
        }
        _ => None,
    }
}

/// Parse an absolute date string (RFC 3339 datetime or `YYYY-MM-DD`).
/// Date-only input is midnight in the user's offset.
pub fn parse_absolute(s: &str, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let local = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()?;
    Some(local.with_timezone(&Utc))
}

/// Build a DateRange from `--since`/`--until` and an optional relative `--date` term,
/// which takes precedence.
pub fn build_date_range(
    since: Option<&str>,
    until: Option<&str>,
    relative: Option<&str>,
    now: DateTime<Utc>,
    tz: &FixedOffset,
) -> Option<DateRange> {
    if let Some(term) = relative {
        return parse_relative(term, now, tz);
    }

    let start = since.and_then(|s| parse_absolute(s, tz));
    let end = until.and_then(|s| parse_absolute(s, tz));
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(DateRange { start, end })
}

/// Midnight of `dt`'s day in the user's offset, as UTC.
fn start_of_day(dt: DateTime<Utc>, tz: &FixedOffset) -> DateTime<Utc> {
    let local = dt.with_timezone(tz);
    local
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|nm| tz.from_local_datetime(&nm).single())
        .map(|ldt| ldt.with_timezone(&Utc))
        .unwrap_or(dt)
}

/// Monday midnight of `dt`'s week in the user's offset.
fn start_of_week(dt: DateTime<Utc>, tz: &FixedOffset) -> DateTime<Utc> {
    let days_from_monday = dt.with_timezone(tz).weekday().num_days_from_monday() as i64;
    start_of_day(dt - Duration::days(days_from_monday), tz)
}
