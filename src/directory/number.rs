//! Phone number normalization.
//!
//! Both sides of every number comparison go through `normalize`; comparing a raw
//! number against a normalized one never matches formatted input.

/// Strip everything but ASCII digits, keeping a single leading `+` if the raw
/// number started with one.
pub fn normalize(raw: &str) -> String {
    let digits = digits_only(raw);
    if raw.starts_with('+') {
        format!("+{}", digits)
    } else {
        digits
    }
}

/// ASCII digits only, with no `+`. Used for substring search, never as a lookup key.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whether two raw numbers address the same line.
///
/// Normalized forms must be equal, except that a leading `+` on only one side is
/// ignored, so "15551230000" and "+15551230000" compare equal. Numbers that merely
/// share trailing digits never do.
pub fn same_number(a: &str, b: &str) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    if a.trim_start_matches('+').is_empty() || b.trim_start_matches('+').is_empty() {
        return false;
    }
    a == b || a.trim_start_matches('+') == b.trim_start_matches('+')
}
