use crate::style::{Alignment, StyleSet};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub style: StyleSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: StyleSet) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// The empty run that stands for an intentionally blank line.
    pub fn placeholder(style: StyleSet) -> Self {
        Self::new(String::new(), style)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub alignment: Alignment,
    pub heading: Option<HeadingLevel>,
}

impl Paragraph {
    /// Wraps `runs`, substituting a placeholder run in `style` when there are
    /// none so the paragraph is never empty.
    pub fn new(runs: Vec<TextRun>, style: &StyleSet) -> Self {
        let runs = if runs.is_empty() {
            vec![TextRun::placeholder(style.clone())]
        } else {
            runs
        };
        Self {
            runs,
            alignment: Alignment::Left,
            heading: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), &StyleSet::default())
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_heading(mut self, heading: HeadingLevel) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// Converted document: paragraphs in source order, never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Builds a document, falling back to a single blank paragraph when
    /// `paragraphs` is empty.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        if paragraphs.is_empty() {
            return Self::fallback();
        }
        Self { paragraphs }
    }

    pub fn fallback() -> Self {
        Self {
            paragraphs: vec![Paragraph::empty()],
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.paragraphs.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_without_runs_gets_placeholder() {
        let p = Paragraph::new(Vec::new(), &StyleSet::heading());
        assert_eq!(p.runs.len(), 1);
        assert_eq!(p.runs[0].text, "");
        assert!(p.runs[0].style.bold);
        assert!(p.is_blank());
    }

    #[test]
    fn empty_document_falls_back() {
        let doc = Document::new(Vec::new());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraphs()[0], Paragraph::empty());
    }

    #[test]
    fn serializes_to_camel_case_json() {
        let p = Paragraph::new(vec![TextRun::new("x", StyleSet::default())], &StyleSet::default())
            .with_heading(HeadingLevel::H2);
        let json = serde_json::to_value(Document::new(vec![p])).unwrap();
        assert_eq!(json[0]["heading"], "H2");
        assert_eq!(json[0]["alignment"], "left");
        assert_eq!(json[0]["runs"][0]["style"]["sizeHalfPoints"], 24);
    }
}
