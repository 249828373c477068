//! Top-level structure: which nodes become paragraphs, headings and list
//! items, in what order.

use crate::dom::{collapse_ws, is_html_ws, trim_html_ws, Element, Node};
use crate::extract::{element_alignment, element_style};
use crate::model::{Document, HeadingLevel, Paragraph, TextRun};
use crate::options::ConvertOptions;
use crate::runs::{build_children_runs, build_runs};
use crate::style::StyleSet;

/// What an editor emits for a document with nothing typed in it.
const EMPTY_LINE_MARKUP: &[&str] = &["<p><br></p>", "<p><br/></p>", "<p><br /></p>", "<p></p>"];

#[derive(Debug)]
enum Block<'a> {
    Paragraph(&'a Element),
    Heading(HeadingLevel, &'a Element),
    List { ordered: bool, items: Vec<&'a Element> },
    /// Text and inline elements sitting directly under the root.
    Inline(Vec<&'a Node>),
    Other(&'a Element),
}

fn is_inline_tag(tag: &str) -> bool {
    matches!(
        tag,
        "span"
            | "strong"
            | "b"
            | "em"
            | "i"
            | "u"
            | "s"
            | "strike"
            | "del"
            | "a"
            | "font"
            | "sub"
            | "sup"
            | "code"
            | "mark"
            | "small"
            | "big"
            | "label"
            | "br"
    )
}

fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text(_) => true,
        Node::Element(el) => is_inline_tag(&el.tag),
    }
}

fn list_items(el: &Element) -> Vec<&Element> {
    el.child_elements().filter(|c| c.is("li")).collect()
}

fn classify_element(el: &Element) -> Block<'_> {
    if let Some(level) = HeadingLevel::from_tag(&el.tag) {
        return Block::Heading(level, el);
    }
    match el.tag.as_str() {
        "p" => Block::Paragraph(el),
        "ul" | "ol" => Block::List {
            ordered: el.is("ol"),
            items: list_items(el),
        },
        _ => Block::Other(el),
    }
}

fn classify(nodes: &[Node]) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut inline: Vec<&Node> = Vec::new();
    for node in nodes {
        if is_inline(node) {
            inline.push(node);
            continue;
        }
        if !inline.is_empty() {
            blocks.push(Block::Inline(std::mem::take(&mut inline)));
        }
        if let Node::Element(el) = node {
            blocks.push(classify_element(el));
        }
    }
    if !inline.is_empty() {
        blocks.push(Block::Inline(inline));
    }
    blocks
}

/// Trims the outer edges of a paragraph's text, as a browser does when it
/// lays out a block.
fn trim_edges(runs: &mut Vec<TextRun>) {
    while let Some(first) = runs.first_mut() {
        first.text = first.text.trim_start_matches(is_html_ws).to_string();
        if !first.text.is_empty() {
            break;
        }
        runs.remove(0);
    }
    while let Some(last) = runs.last_mut() {
        last.text = last.text.trim_end_matches(is_html_ws).to_string();
        if !last.text.is_empty() {
            break;
        }
        runs.pop();
    }
}

fn block_paragraph(el: &Element, base: &StyleSet, opts: &ConvertOptions) -> Paragraph {
    let style = base.merge(&element_style(el, opts));
    let mut runs = build_children_runs(&el.children, &style, opts);
    trim_edges(&mut runs);
    Paragraph::new(runs, &style).with_alignment(element_alignment(el, opts).unwrap_or_default())
}

fn list_marker(ordered: bool, position: usize) -> String {
    if ordered {
        format!("{position}. ")
    } else {
        "• ".to_string()
    }
}

fn push_list(ordered: bool, items: &[&Element], opts: &ConvertOptions, out: &mut Vec<Paragraph>) {
    for (i, li) in items.iter().enumerate() {
        let style = StyleSet::default().merge(&element_style(li, opts));
        let marker = list_marker(ordered, i + 1);

        let mut runs = Vec::new();
        let mut nested = Vec::new();
        for child in &li.children {
            match child {
                Node::Element(el) if el.is("ul") || el.is("ol") => nested.push(el),
                _ => runs.extend(build_runs(child, &style, opts)),
            }
        }
        trim_edges(&mut runs);
        match runs.first_mut() {
            Some(first) => first.text.insert_str(0, &marker),
            None => runs.push(TextRun::new(marker, style.clone())),
        }

        let alignment = element_alignment(li, opts).unwrap_or_default();
        out.push(Paragraph::new(runs, &style).with_alignment(alignment));

        for list in nested {
            push_list(list.is("ol"), &list_items(list), opts, out);
        }
    }
}

/// `p` elements under `el`, outermost first, in document order.
fn nested_paragraphs(el: &Element) -> Vec<&Element> {
    fn walk<'a>(el: &'a Element, out: &mut Vec<&'a Element>) {
        for c in el.child_elements() {
            if c.is("p") {
                out.push(c);
            } else {
                walk(c, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(el, &mut out);
    out
}

fn push_other(el: &Element, opts: &ConvertOptions, out: &mut Vec<Paragraph>) {
    let paragraphs = nested_paragraphs(el);
    if !paragraphs.is_empty() {
        for p in paragraphs {
            out.push(block_paragraph(p, &StyleSet::default(), opts));
        }
        return;
    }
    log::trace!("flattening <{}> into a plain paragraph", el.tag);
    let text = trim_html_ws(&collapse_ws(&el.text_content())).to_string();
    let style = StyleSet::default();
    let runs = if text.is_empty() {
        Vec::new()
    } else {
        vec![TextRun::new(text, style.clone())]
    };
    let alignment = element_alignment(el, opts).unwrap_or_default();
    out.push(Paragraph::new(runs, &style).with_alignment(alignment));
}

fn push_block(block: &Block<'_>, opts: &ConvertOptions, out: &mut Vec<Paragraph>) {
    match block {
        Block::Paragraph(el) => out.push(block_paragraph(el, &StyleSet::default(), opts)),
        Block::Heading(level, el) => {
            out.push(block_paragraph(el, &StyleSet::heading(), opts).with_heading(*level))
        }
        Block::List { ordered, items } => push_list(*ordered, items, opts, out),
        Block::Inline(nodes) => {
            let mut runs: Vec<TextRun> = nodes
                .iter()
                .flat_map(|n| build_runs(n, &StyleSet::default(), opts))
                .collect();
            trim_edges(&mut runs);
            // Whitespace between blocks.
            if !runs.is_empty() {
                out.push(Paragraph::new(runs, &StyleSet::default()));
            }
        }
        Block::Other(el) => push_other(el, opts, out),
    }
}

/// True for input that carries no content at all.
pub fn is_empty_markup(html: &str) -> bool {
    let compact: String = html
        .chars()
        .filter(|c| !is_html_ws(*c))
        .collect::<String>()
        .to_ascii_lowercase();
    compact.is_empty()
        || EMPTY_LINE_MARKUP
            .iter()
            .any(|m| m.replace(' ', "") == compact)
}

/// Converts the root's top-level nodes into a document.
pub fn assemble(nodes: &[Node], opts: &ConvertOptions) -> Document {
    let blocks = classify(nodes);
    let mut paragraphs = Vec::new();
    for block in &blocks {
        push_block(block, opts, &mut paragraphs);
    }
    log::debug!(
        "assembled {} paragraph(s) from {} block(s)",
        paragraphs.len(),
        blocks.len()
    );
    Document::new(paragraphs)
}
