use crate::style::DEFAULT_SIZE_HALF_POINTS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Px,
    Pt,
    Em,
}

fn split_number(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (&s[..end], s[end..].trim())
}

fn parse_size(css: &str) -> Option<(f64, Unit)> {
    let lower = css.trim().to_ascii_lowercase();
    let (num, unit) = split_number(&lower);
    let value: f64 = num.parse().ok()?;
    let unit = match unit {
        "" | "px" => Unit::Px,
        "pt" => Unit::Pt,
        "em" | "rem" => Unit::Em,
        _ => return None,
    };
    Some((value, unit))
}

/// Converts a CSS `font-size` into half-points, or `None` when it is not a
/// positive length in a supported unit (`inherit`, `larger`, `calc(..)`).
///
/// `pt` doubles, `px` is taken as 0.75pt, `em`/`rem` are relative to a 12pt
/// base.
pub fn half_points(css: &str) -> Option<u32> {
    let Some((value, unit)) = parse_size(css) else {
        log::trace!("unparseable font-size {css:?}");
        return None;
    };
    let half_points = match unit {
        Unit::Pt => value * 2.0,
        Unit::Px => value * 1.5,
        Unit::Em => value * 24.0,
    };
    if !half_points.is_finite() || half_points < 1.0 {
        log::trace!("out of range font-size {css:?}");
        return None;
    }
    Some(half_points.round().min(u32::MAX as f64) as u32)
}

/// Like [`half_points`], falling back to the 12pt default.
pub fn to_half_points(css: &str) -> u32 {
    half_points(css).unwrap_or(DEFAULT_SIZE_HALF_POINTS)
}
