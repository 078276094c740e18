//! Node classification shared by the condensation stages.
//!
//! All predicates are total: unknown names and foreign namespaces simply do
//! not match, so unfamiliar markup is left alone.

use html5ever::{Namespace, ns};

use crate::dom::{ArenaDom, NodeData, NodeId};

const NBSP: char = '\u{a0}';

/// Whitespace as the condensation rules understand it.
///
/// Covers Unicode `White_Space` (which includes U+00A0) plus U+FEFF, the
/// byte-order mark that word processors leave behind in pasted text.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Check if a string is empty or consists only of whitespace, non-breaking
/// spaces included.
pub fn is_empty_string(s: &str) -> bool {
    s.chars().all(is_space)
}

/// Check if a string is empty or only ASCII markup whitespace
/// (space, tab, CR, LF). Non-breaking spaces do not count.
pub fn is_markup_whitespace(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Check if a character is a non-breaking space.
pub fn is_nbsp(c: char) -> bool {
    c == NBSP
}

fn is_html(namespace: &Namespace) -> bool {
    *namespace == ns!(html)
}

/// Elements whose content keeps its whitespace verbatim.
///
/// CDATA sections, processing instructions and comments are always
/// preformatted.
pub fn is_preformatted(dom: &ArenaDom, node: NodeId) -> bool {
    match dom.data(node) {
        Some(NodeData::Element { name, .. }) => {
            is_html(&name.ns) && matches!(name.local.as_ref(), "pre" | "code" | "samp" | "var")
        }
        Some(NodeData::CData(_) | NodeData::ProcessingInstruction { .. } | NodeData::Comment(_)) => {
            true
        }
        Some(
            NodeData::Document | NodeData::Fragment | NodeData::Text(_) | NodeData::Doctype { .. },
        )
        | None => false,
    }
}

/// Phrasing elements that wrap text and other inline elements without
/// introducing a boundary of their own.
pub fn is_inline_container(namespace: &Namespace, local_name: &str) -> bool {
    is_html(namespace)
        && matches!(
            local_name,
            "a" | "em"
                | "strong"
                | "small"
                | "s"
                | "cite"
                | "q"
                | "dfn"
                | "abbr"
                | "ruby"
                | "rt"
                | "rp"
                | "data"
                | "time"
                | "code"
                | "var"
                | "samp"
                | "kbd"
                | "sub"
                | "sup"
                | "i"
                | "b"
                | "u"
                | "mark"
                | "bdi"
                | "bdo"
                | "span"
                | "font"
        )
}

/// Block-level elements that separate phrase runs.
pub fn is_block_container(namespace: &Namespace, local_name: &str) -> bool {
    is_html(namespace)
        && matches!(
            local_name,
            "p" | "ol"
                | "ul"
                | "li"
                | "dl"
                | "dt"
                | "dd"
                | "figure"
                | "figcaption"
                | "main"
                | "div"
        )
}

/// Line breaks and horizontal rules, historically used to fake paragraphs.
pub fn is_paragraph_splitter(namespace: &Namespace, local_name: &str) -> bool {
    is_html(namespace) && matches!(local_name, "br" | "hr")
}

/// Node-level form of [`is_inline_container`].
pub fn is_inline_container_element(dom: &ArenaDom, node: NodeId) -> bool {
    dom.qual_name(node)
        .is_some_and(|name| is_inline_container(&name.ns, &name.local))
}

/// Node-level form of [`is_block_container`].
pub fn is_block_container_element(dom: &ArenaDom, node: NodeId) -> bool {
    dom.qual_name(node)
        .is_some_and(|name| is_block_container(&name.ns, &name.local))
}

/// Node-level form of [`is_paragraph_splitter`].
pub fn is_paragraph_splitter_element(dom: &ArenaDom, node: NodeId) -> bool {
    dom.qual_name(node)
        .is_some_and(|name| is_paragraph_splitter(&name.ns, &name.local))
}

/// Elements that are never valid when empty: lists and their items.
pub fn is_content_requiring_block_element(dom: &ArenaDom, node: NodeId) -> bool {
    dom.qual_name(node).is_some_and(|name| {
        is_html(&name.ns) && matches!(name.local.as_ref(), "li" | "dt" | "dd" | "dl" | "ul" | "ol")
    })
}

/// Nodes that take no visible space in a phrase run: comments, processing
/// instructions, doctypes, inline containers, and whitespace-only text.
pub fn is_empty_phrasing_node(dom: &ArenaDom, node: NodeId) -> bool {
    match dom.data(node) {
        Some(NodeData::Comment(_) | NodeData::ProcessingInstruction { .. } | NodeData::Doctype { .. }) => {
            true
        }
        Some(NodeData::Element { name, .. }) => is_inline_container(&name.ns, &name.local),
        Some(NodeData::Text(_) | NodeData::CData(_)) => {
            dom.char_data(node).is_some_and(is_empty_string)
        }
        Some(NodeData::Document | NodeData::Fragment) | None => false,
    }
}

/// Nodes skipped outright when scanning for content: comments, processing
/// instructions and doctypes.
pub fn is_invisible(dom: &ArenaDom, node: NodeId) -> bool {
    matches!(
        dom.data(node),
        Some(NodeData::Comment(_) | NodeData::ProcessingInstruction { .. } | NodeData::Doctype { .. })
    )
}
