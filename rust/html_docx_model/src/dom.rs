//! Owned, parser-independent view of the HTML tree.
//!
//! html5ever hands back an `RcDom` full of `Rc<RefCell<..>>` handles. The
//! conversion only ever reads the tree, so it is copied once into plain
//! [`Node`] values: tag names lowercased, inline `style` split into
//! declarations, `class` split into tokens. Everything downstream works on
//! these values and never touches a `Handle`.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    /// Inline `style` declarations in source order, property names lowercased.
    pub style: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Last declaration wins, as in a browser.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Concatenated text of the subtree, unmodified.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => {
                    for c in &el.children {
                        walk(c, out);
                    }
                }
            }
        }
        for c in &self.children {
            walk(c, &mut out);
        }
        out
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

/// Splits a `style` attribute into `(property, value)` pairs.
pub fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in style.split(';') {
        let Some(colon) = decl.find(':') else { continue };
        let name = decl[..colon].trim().to_ascii_lowercase();
        let value = decl[colon + 1..].trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        if name.is_empty() || value.is_empty() {
            continue;
        }
        out.push((name, value.to_string()));
    }
    out
}

/// HTML whitespace: ASCII only, so `&nbsp;` (U+00A0) survives.
pub fn is_html_ws(ch: char) -> bool {
    ch.is_ascii_whitespace()
}

pub fn trim_html_ws(s: &str) -> &str {
    s.trim_matches(is_html_ws)
}

pub fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if is_html_ws(ch) {
            if !in_ws {
                out.push(' ');
                in_ws = true;
            }
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

fn is_drop_content_tag(lower: &str) -> bool {
    matches!(
        lower,
        "script" | "style" | "noscript" | "template" | "iframe" | "object" | "embed" | "svg" | "head"
    )
}

fn html5_parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

fn find_body_children(dom: &RcDom) -> Vec<Handle> {
    fn find_elem(node: &Handle, name: &str) -> Option<Handle> {
        if let NodeData::Element { name: q, .. } = &node.data {
            if q.local.to_string().eq_ignore_ascii_case(name) {
                return Some(node.clone());
            }
        }
        for c in node.children.borrow().iter() {
            if let Some(x) = find_elem(c, name) {
                return Some(x);
            }
        }
        None
    }

    if let Some(body) = find_elem(&dom.document, "body") {
        return body.children.borrow().clone();
    }
    dom.document.children.borrow().clone()
}

fn convert_children(children: &[Handle]) -> Vec<Node> {
    children.iter().filter_map(convert_node).collect()
}

fn convert_node(node: &Handle) -> Option<Node> {
    match &node.data {
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            if is_drop_content_tag(&tag) {
                return None;
            }
            let attrs: Vec<(String, String)> = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string().to_ascii_lowercase(), a.value.to_string()))
                .collect();
            let mut el = Element {
                tag,
                attrs,
                ..Element::default()
            };
            let style = el.attr("style").map(parse_inline_style).unwrap_or_default();
            let classes = el
                .attr("class")
                .map(|c| c.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            el.style = style;
            el.classes = classes;
            el.children = convert_children(&node.children.borrow());
            Some(Node::Element(el))
        }
        NodeData::Comment { .. }
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. }
        | NodeData::Document => None,
    }
}

/// Parses `input` and returns the top-level nodes of its body.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let dom = html5_parse(input);
    convert_children(&find_body_children(&dom))
}
