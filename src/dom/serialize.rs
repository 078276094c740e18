//! Markup serializer for the arena DOM.
//!
//! Emits HTML syntax: void elements have no end tag, raw-text element
//! content is written verbatim, and everything else is escaped. Comments and
//! CDATA sections are escaped so the output stays well-formed no matter what
//! their data contains.

use std::fmt::Write;

use html5ever::ns;
use memchr::{memchr3, memmem};

use super::arena::{ArenaDom, NodeData, NodeId};

const NBSP: char = '\u{a0}';

/// Serialize a node including itself (outer markup).
pub fn serialize(dom: &ArenaDom, node: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, node, &mut out);
    out
}

/// Serialize the children of a node (inner markup).
pub fn serialize_children(dom: &ArenaDom, node: NodeId) -> String {
    let mut out = String::new();
    for child in dom.children(node) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &ArenaDom, id: NodeId, out: &mut String) {
    let Some(data) = dom.data(id) else {
        return;
    };

    match data {
        NodeData::Document | NodeData::Fragment => {
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                if let Some(prefix) = &attr.name.prefix {
                    out.push_str(prefix);
                    out.push(':');
                }
                out.push_str(&attr.name.local);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');

            let html = name.ns == ns!(html);
            if html && is_void_element(tag) {
                return;
            }

            if html && matches!(tag, "pre" | "textarea" | "listing") {
                let leading_newline = dom
                    .first_child(id)
                    .and_then(|first| dom.text(first))
                    .is_some_and(|t| t.starts_with('\n'));
                if leading_newline {
                    out.push('\n');
                }
            }

            let raw = html && is_raw_text_element(tag);
            for child in dom.children(id) {
                match dom.text(child) {
                    Some(text) if raw => out.push_str(text),
                    _ => write_node(dom, child, out),
                }
            }

            let _ = write!(out, "</{tag}>");
        }
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::CData(text) => {
            let _ = write!(out, "<![CDATA[{}]]>", escape_cdata(text));
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{}-->", escape_comment(text));
        }
        NodeData::ProcessingInstruction { target, data } => {
            let _ = write!(out, "<?{target} {data}>");
        }
        NodeData::Doctype { name, .. } => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
    }
}

/// HTML void elements (never have an end tag).
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

/// Escape text content: `&`, `<`, `>` and non-breaking spaces.
pub fn escape_text(s: &str) -> String {
    if memchr3(b'&', b'<', b'>', s.as_bytes()).is_none() && !s.contains(NBSP) {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            NBSP => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            NBSP => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Separate consecutive dashes with spaces so they cannot close a comment.
///
/// `a--b` becomes `a- -b`, `---` becomes `- - -`.
pub fn escape_comment(data: &str) -> String {
    if memmem::find(data.as_bytes(), b"--").is_none() {
        return data.to_string();
    }

    let mut result = String::with_capacity(data.len() + 4);
    let mut prev_dash = false;
    let mut chars = data.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            let in_run = prev_dash || chars.peek() == Some(&'-');
            if prev_dash && in_run {
                result.push(' ');
            }
            result.push('-');
            prev_dash = in_run;
        } else {
            result.push(c);
            prev_dash = false;
        }
    }
    result
}

/// Escape CDATA content.
///
/// Control characters other than tab and newlines, and the non-characters
/// U+FFFE/U+FFFF, become U+FFFD. A literal `]]>` is split across two
/// sections.
pub fn escape_cdata(data: &str) -> String {
    let cleaned: String = data
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => c,
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => '\u{fffd}',
            _ => c,
        })
        .collect();

    if memmem::find(cleaned.as_bytes(), b"]]>").is_none() {
        return cleaned;
    }
    cleaned.replace("]]>", "]]]]><![CDATA[>")
}
