//! Placeholder avatars: initials on a colour derived from the name.

use colored::Colorize;

use crate::settings::{AvatarStyle, Theme};

/// First letter of up to two non-blank name tokens, uppercased ("John Doe" -> "JD").
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A hue in `0..360` that depends only on `name`.
pub fn hue(name: &str) -> u16 {
    // 31-multiplier rolling hash over UTF-16 units, wrapping like a 32-bit int.
    let hash = name
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    ((hash & 0x00FF_FFFF) % 360) as u16
}

/// Foreground RGB for the avatar on the given theme. Dark themes get a light tint,
/// everything else a dark one.
pub fn foreground(name: &str, theme: Theme) -> (u8, u8, u8) {
    let h = hue(name) as f32;
    match theme {
        Theme::Dark => hsl_to_rgb(h, 0.45, 0.85),
        Theme::Light | Theme::System => hsl_to_rgb(h, 0.55, 0.30),
    }
}

/// The avatar as a short coloured badge. `Icon` style, or a name without letters,
/// falls back to a neutral glyph.
pub fn badge(name: &str, style: AvatarStyle, theme: Theme) -> String {
    let text = match style {
        AvatarStyle::Initials => initials(name),
        AvatarStyle::Icon => String::new(),
    };
    if text.is_empty() {
        return format!("{:^2}", "●").dimmed().to_string();
    }
    let (r, g, b) = foreground(name, theme);
    format!("{:<2}", text).truecolor(r, g, b).bold().to_string()
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r1), to_byte(g1), to_byte(b1))
}
