//! Formatting an element contributes on its own, without looking at its
//! ancestors or children.

use crate::color::{named_color, normalize_color, quantize_to_highlight, WHITE};
use crate::dom::Element;
use crate::options::ConvertOptions;
use crate::style::{Alignment, Highlight, StyleDelta};
use crate::units::half_points;

/// `size-*` classes, in half-points.
const SIZE_CLASSES: &[(&str, u32)] = &[("small", 20), ("large", 36), ("huge", 64)];

/// Formatting markers an element can carry, whatever the source (tag, inline
/// style or class).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
}

fn tag_mark(tag: &str) -> Option<Mark> {
    match tag {
        "strong" | "b" => Some(Mark::Bold),
        "em" | "i" => Some(Mark::Italic),
        "u" => Some(Mark::Underline),
        "s" | "strike" | "del" => Some(Mark::Strike),
        _ => None,
    }
}

fn class_mark(marker: &str) -> Option<Mark> {
    match marker {
        "bold" => Some(Mark::Bold),
        "italic" => Some(Mark::Italic),
        "underline" => Some(Mark::Underline),
        "strike" | "strikethrough" => Some(Mark::Strike),
        _ => None,
    }
}

fn style_marks(el: &Element) -> Vec<Mark> {
    let mut out = Vec::new();
    if let Some(w) = el.style_value("font-weight") {
        if matches!(
            w.trim().to_ascii_lowercase().as_str(),
            "bold" | "bolder" | "700" | "800" | "900"
        ) {
            out.push(Mark::Bold);
        }
    }
    if let Some(s) = el.style_value("font-style") {
        if matches!(s.trim().to_ascii_lowercase().as_str(), "italic" | "oblique") {
            out.push(Mark::Italic);
        }
    }
    for prop in ["text-decoration", "text-decoration-line"] {
        let Some(d) = el.style_value(prop) else { continue };
        let d = d.to_ascii_lowercase();
        if d.contains("underline") {
            out.push(Mark::Underline);
        }
        if d.contains("line-through") {
            out.push(Mark::Strike);
        }
    }
    out
}

fn class_suffix<'a>(markers: &'a [String], prefix: &str) -> Option<&'a str> {
    markers.iter().find_map(|m| m.strip_prefix(prefix))
}

/// A background that resolves to white is the page, not a highlight.
fn highlight_from_hex(hex: &str) -> Option<Highlight> {
    if hex.eq_ignore_ascii_case(WHITE) {
        return None;
    }
    let hl = quantize_to_highlight(hex);
    if hl.is_none() {
        log::trace!("background {hex} has no highlight equivalent");
    }
    hl
}

fn inline_background(el: &Element) -> Option<String> {
    if let Some(v) = el.style_value("background-color") {
        return normalize_color(v);
    }
    // `background` shorthand, only when it is nothing but a color.
    el.style_value("background").and_then(normalize_color)
}

/// Computes the formatting `el` itself contributes.
pub fn element_style(el: &Element, opts: &ConvertOptions) -> StyleDelta {
    let markers: Vec<String> = el.classes.iter().map(|c| opts.class_marker(c)).collect();

    let mut marks: Vec<Mark> = tag_mark(&el.tag).into_iter().collect();
    marks.extend(style_marks(el));
    marks.extend(markers.iter().filter_map(|m| class_mark(m)));

    let mut delta = StyleDelta::default();
    for mark in marks {
        let flag = match mark {
            Mark::Bold => &mut delta.bold,
            Mark::Italic => &mut delta.italic,
            Mark::Underline => &mut delta.underline,
            Mark::Strike => &mut delta.strike,
        };
        *flag = Some(true);
    }

    delta.color = match el.style_value("color") {
        Some(raw) => {
            let c = normalize_color(raw);
            if c.is_none() {
                log::trace!("ignoring color {raw:?}");
            }
            c
        }
        None => None,
    }
    .or_else(|| {
        class_suffix(&markers, "color-")
            .and_then(named_color)
            .map(str::to_string)
    });

    let background = inline_background(el).or_else(|| {
        class_suffix(&markers, "background-")
            .and_then(named_color)
            .map(str::to_string)
    });
    delta.highlight = background.as_deref().and_then(highlight_from_hex);

    delta.size_half_points = el.style_value("font-size").and_then(half_points).or_else(|| {
        class_suffix(&markers, "size-").and_then(|s| {
            SIZE_CLASSES
                .iter()
                .find(|(name, _)| *name == s)
                .map(|(_, hp)| *hp)
        })
    });

    delta
}

/// Paragraph alignment from `text-align` or an `align-*` class.
pub fn element_alignment(el: &Element, opts: &ConvertOptions) -> Option<Alignment> {
    if let Some(a) = el.style_value("text-align").and_then(Alignment::parse) {
        return Some(a);
    }
    el.classes
        .iter()
        .map(|c| opts.class_marker(c))
        .find_map(|m| m.strip_prefix("align-").and_then(Alignment::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_inline_style;

    fn el(tag: &str, style: &str, class: &str) -> Element {
        let mut e = Element::new(tag);
        e.style = parse_inline_style(style);
        e.classes = class.split_whitespace().map(str::to_string).collect();
        e
    }

    fn delta(tag: &str, style: &str, class: &str) -> StyleDelta {
        element_style(&el(tag, style, class), &ConvertOptions::default())
    }

    #[test]
    fn plain_span_contributes_nothing() {
        assert!(delta("span", "", "").is_empty());
    }

    #[test]
    fn tags_map_to_flags() {
        assert_eq!(delta("b", "", "").bold, Some(true));
        assert_eq!(delta("em", "", "").italic, Some(true));
        assert_eq!(delta("u", "", "").underline, Some(true));
        assert_eq!(delta("strike", "", "").strike, Some(true));
    }

    #[test]
    fn inline_styles_map_to_flags() {
        let d = delta(
            "span",
            "font-weight: 700; font-style: italic; text-decoration: underline line-through",
            "",
        );
        assert_eq!(d.bold, Some(true));
        assert_eq!(d.italic, Some(true));
        assert_eq!(d.underline, Some(true));
        assert_eq!(d.strike, Some(true));
    }

    #[test]
    fn normal_weight_does_not_unset_tag_bold() {
        assert_eq!(delta("strong", "font-weight: normal", "").bold, Some(true));
        assert_eq!(delta("span", "font-weight: normal", "").bold, None);
    }

    #[test]
    fn class_markers_with_or_without_prefix() {
        let d = delta("span", "", "ql-bold italic ql-underline strike");
        assert_eq!(d.bold, Some(true));
        assert_eq!(d.italic, Some(true));
        assert_eq!(d.underline, Some(true));
        assert_eq!(d.strike, Some(true));
    }

    #[test]
    fn inline_color_beats_color_class() {
        assert_eq!(
            delta("span", "color: rgb(0, 0, 255)", "ql-color-red").color.as_deref(),
            Some("0000FF")
        );
        assert_eq!(delta("span", "", "ql-color-red").color.as_deref(), Some("FF0000"));
        assert_eq!(delta("span", "color: nonsense", "").color, None);
    }

    #[test]
    fn backgrounds_become_highlights() {
        assert_eq!(
            delta("span", "background-color: #ffff00", "").highlight,
            Some(Highlight::Yellow)
        );
        assert_eq!(
            delta("span", "", "ql-background-yellow").highlight,
            Some(Highlight::Yellow)
        );
        assert_eq!(delta("span", "background: black", "").highlight, Some(Highlight::Black));
    }

    #[test]
    fn white_background_is_not_a_highlight() {
        assert_eq!(delta("span", "background-color: #fff", "").highlight, None);
        assert_eq!(delta("span", "", "ql-background-white").highlight, None);
    }

    #[test]
    fn unmatched_background_is_dropped() {
        assert_eq!(delta("span", "background-color: #123456", "").highlight, None);
    }

    #[test]
    fn font_sizes() {
        assert_eq!(delta("span", "font-size: 9pt", "").size_half_points, Some(18));
        assert_eq!(delta("span", "", "ql-size-small").size_half_points, Some(20));
        assert_eq!(delta("span", "", "ql-size-large").size_half_points, Some(36));
        assert_eq!(delta("span", "", "ql-size-huge").size_half_points, Some(64));
        assert_eq!(delta("span", "", "ql-size-normal").size_half_points, None);
        assert_eq!(
            delta("span", "font-size: 12pt", "ql-size-huge").size_half_points,
            Some(24)
        );
    }

    #[test]
    fn unparseable_font_size_is_left_unset() {
        assert_eq!(delta("span", "font-size: inherit", "").size_half_points, None);
        assert_eq!(
            delta("span", "font-size: larger", "ql-size-large").size_half_points,
            Some(36)
        );
    }

    #[test]
    fn alignment_from_style_or_class() {
        let opts = ConvertOptions::default();
        assert_eq!(
            element_alignment(&el("p", "text-align: right", ""), &opts),
            Some(Alignment::Right)
        );
        assert_eq!(
            element_alignment(&el("p", "", "ql-align-justify"), &opts),
            Some(Alignment::Justify)
        );
        assert_eq!(element_alignment(&el("p", "", ""), &opts), None);
    }
}
