use serde::Serialize;

/// 12pt.
pub const DEFAULT_SIZE_HALF_POINTS: u32 = 24;
/// 16pt, the starting size of every heading.
pub const HEADING_SIZE_HALF_POINTS: u32 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    Yellow,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Black,
    White,
    LightGray,
    DarkGray,
    DarkGreen,
    DarkBlue,
    DarkMagenta,
    DarkRed,
    DarkCyan,
    DarkYellow,
}

impl Highlight {
    /// Value of the `w:highlight` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Yellow => "yellow",
            Highlight::Red => "red",
            Highlight::Green => "green",
            Highlight::Blue => "blue",
            Highlight::Cyan => "cyan",
            Highlight::Magenta => "magenta",
            Highlight::Black => "black",
            Highlight::White => "white",
            Highlight::LightGray => "lightGray",
            Highlight::DarkGray => "darkGray",
            Highlight::DarkGreen => "darkGreen",
            Highlight::DarkBlue => "darkBlue",
            Highlight::DarkMagenta => "darkMagenta",
            Highlight::DarkRed => "darkRed",
            Highlight::DarkCyan => "darkCyan",
            Highlight::DarkYellow => "darkYellow",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parses a `text-align` value or the suffix of an `align-*` class.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Fully resolved formatting of a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSet {
    pub size_half_points: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Six uppercase hex digits.
    pub color: Option<String>,
    pub highlight: Option<Highlight>,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            size_half_points: DEFAULT_SIZE_HALF_POINTS,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            color: None,
            highlight: None,
        }
    }
}

impl StyleSet {
    pub fn heading() -> Self {
        Self {
            size_half_points: HEADING_SIZE_HALF_POINTS,
            bold: true,
            ..Self::default()
        }
    }

    /// Applies the fields `delta` sets on top of `self`.
    pub fn merge(&self, delta: &StyleDelta) -> StyleSet {
        StyleSet {
            size_half_points: delta.size_half_points.unwrap_or(self.size_half_points),
            bold: delta.bold.unwrap_or(self.bold),
            italic: delta.italic.unwrap_or(self.italic),
            underline: delta.underline.unwrap_or(self.underline),
            strike: delta.strike.unwrap_or(self.strike),
            color: delta.color.clone().or_else(|| self.color.clone()),
            highlight: delta.highlight.or(self.highlight),
        }
    }
}

/// Formatting contributed by a single element. `None` inherits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDelta {
    pub size_half_points: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
    pub color: Option<String>,
    pub highlight: Option<Highlight>,
}

impl StyleDelta {
    pub fn is_empty(&self) -> bool {
        *self == StyleDelta::default()
    }
}
