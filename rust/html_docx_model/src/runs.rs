use crate::dom::{collapse_ws, trim_html_ws, Element, Node};
use crate::extract::element_style;
use crate::model::TextRun;
use crate::options::ConvertOptions;
use crate::style::StyleSet;

/// Whitespace-only text still separates its neighbours, so it becomes a
/// single space. Paragraph assembly trims these at the edges.
fn text_run(raw: &str, style: &StyleSet) -> Option<TextRun> {
    if raw.is_empty() {
        return None;
    }
    if trim_html_ws(raw).is_empty() {
        return Some(TextRun::new(" ", style.clone()));
    }
    Some(TextRun::new(collapse_ws(raw), style.clone()))
}

/// Flattens `node` into runs, each carrying the style accumulated from
/// `inherited` down to the text's own element.
///
/// Runs are never merged: every text node gives at most one run, in document
/// order. A `<br>` gives a single space.
pub fn build_runs(node: &Node, inherited: &StyleSet, opts: &ConvertOptions) -> Vec<TextRun> {
    match node {
        Node::Text(t) => text_run(t, inherited).into_iter().collect(),
        Node::Element(el) => build_element_runs(el, inherited, opts),
    }
}

fn build_element_runs(el: &Element, inherited: &StyleSet, opts: &ConvertOptions) -> Vec<TextRun> {
    let merged = inherited.merge(&element_style(el, opts));
    if el.is("br") {
        return vec![TextRun::new(" ", merged)];
    }
    if el.children.is_empty() {
        return text_run(&el.text_content(), &merged).into_iter().collect();
    }
    build_children_runs(&el.children, &merged, opts)
}

/// Runs for `children` with `style` as the inherited style, without applying
/// anything from their parent element.
pub fn build_children_runs(children: &[Node], style: &StyleSet, opts: &ConvertOptions) -> Vec<TextRun> {
    let mut out = Vec::new();
    for c in children {
        out.extend(build_runs(c, style, opts));
    }
    out
}
