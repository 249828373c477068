//! Color parsing and highlight quantization.
//!
//! Every accepted representation ends up as six uppercase hex digits without
//! a leading `#` (`"FF0000"`), which is what WordprocessingML expects in
//! `w:color`.

use crate::style::Highlight;

/// Named colors understood in inline CSS and in editor `color-*` classes.
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "000000"),
    ("white", "FFFFFF"),
    ("red", "FF0000"),
    ("green", "008000"),
    ("blue", "0000FF"),
    ("yellow", "FFFF00"),
    ("orange", "FFA500"),
    ("purple", "800080"),
    ("pink", "FFC0CB"),
    ("gray", "808080"),
    ("grey", "808080"),
];

/// The highlight colors a Word document can carry, keyed by exact hex value.
pub const HIGHLIGHT_PALETTE: &[(&str, Highlight)] = &[
    ("FFFF00", Highlight::Yellow),
    ("FF0000", Highlight::Red),
    ("00FF00", Highlight::Green),
    ("0000FF", Highlight::Blue),
    ("00FFFF", Highlight::Cyan),
    ("FF00FF", Highlight::Magenta),
    ("000000", Highlight::Black),
    ("FFFFFF", Highlight::White),
    ("C0C0C0", Highlight::LightGray),
    ("808080", Highlight::DarkGray),
    ("008000", Highlight::DarkGreen),
    ("000080", Highlight::DarkBlue),
    ("800080", Highlight::DarkMagenta),
    ("800000", Highlight::DarkRed),
    ("008080", Highlight::DarkCyan),
    ("808000", Highlight::DarkYellow),
];

pub const WHITE: &str = "FFFFFF";

pub fn named_color(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

fn normalize_hex(digits: &str) -> Option<String> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => Some(
            digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        6 => Some(digits.to_ascii_uppercase()),
        _ => None,
    }
}

fn parse_channel(s: &str) -> Option<u8> {
    let s = s.trim();
    if let Some(pct) = s.strip_suffix('%') {
        let v: f64 = pct.trim().parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        return Some((v.clamp(0.0, 100.0) * 255.0 / 100.0).round() as u8);
    }
    let v: f64 = s.parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.clamp(0.0, 255.0).round() as u8)
}

fn normalize_rgb(args: &str) -> Option<String> {
    let parts: Vec<&str> = args.split(',').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    Some(format!("{r:02X}{g:02X}{b:02X}"))
}

/// Converts a CSS color into six uppercase hex digits.
///
/// Accepts `#RGB`, `#RRGGBB`, `rgb(r, g, b)`, `rgba(r, g, b, a)` (alpha is
/// dropped) and the names in [`NAMED_COLORS`]. Returns `None` for anything
/// else.
pub fn normalize_color(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix('#') {
        return normalize_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    for func in ["rgba(", "rgb("] {
        if let Some(rest) = lower.strip_prefix(func) {
            return rest.strip_suffix(')').and_then(normalize_rgb);
        }
    }
    named_color(&lower).map(str::to_string)
}

/// Exact lookup of a normalized hex value in [`HIGHLIGHT_PALETTE`].
///
/// Colors without an exact entry get no highlight at all; there is no
/// nearest-color fallback.
pub fn quantize_to_highlight(hex: &str) -> Option<Highlight> {
    let hex = hex.trim().trim_start_matches('#');
    HIGHLIGHT_PALETTE
        .iter()
        .find(|(h, _)| h.eq_ignore_ascii_case(hex))
        .map(|(_, hl)| *hl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_in_every_notation_agrees() {
        let a = normalize_color("rgb(255,0,0)");
        assert_eq!(a.as_deref(), Some("FF0000"));
        assert_eq!(a, normalize_color("#FF0000"));
        assert_eq!(a, normalize_color("red"));
        assert_eq!(a, normalize_color("#f00"));
        assert_eq!(a, normalize_color("RGBA(255, 0, 0, 0.5)"));
    }

    #[test]
    fn hex_is_uppercased() {
        assert_eq!(normalize_color("#a1b2c3").as_deref(), Some("A1B2C3"));
    }

    #[test]
    fn rgb_channels_are_clamped() {
        assert_eq!(normalize_color("rgb(300, -4, 16)").as_deref(), Some("FF0010"));
        assert_eq!(normalize_color("rgb(100%, 0%, 50%)").as_deref(), Some("FF0080"));
    }

    #[test]
    fn grey_and_gray_are_the_same() {
        assert_eq!(normalize_color("Grey"), normalize_color("gray"));
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["", "#12", "#12345G", "rgb(1,2)", "rgb(a,b,c)", "chartreuse", "inherit"] {
            assert_eq!(normalize_color(raw), None, "{raw}");
        }
    }

    #[test]
    fn highlight_needs_exact_match() {
        assert_eq!(quantize_to_highlight("FFFF00"), Some(Highlight::Yellow));
        assert_eq!(quantize_to_highlight("c0c0c0"), Some(Highlight::LightGray));
        assert_eq!(quantize_to_highlight("#123456"), None);
        assert_eq!(quantize_to_highlight("FFFF01"), None);
    }

    #[test]
    fn palette_has_sixteen_distinct_entries() {
        assert_eq!(HIGHLIGHT_PALETTE.len(), 16);
        for (i, (hex, _)) in HIGHLIGHT_PALETTE.iter().enumerate() {
            assert!(HIGHLIGHT_PALETTE[i + 1..].iter().all(|(h, _)| h != hex));
        }
    }
}
