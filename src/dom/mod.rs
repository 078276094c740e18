//! Arena DOM, html5ever parsing, traversal and serialization.
//!
//! # Example
//!
//! ```
//! use pastecondense::dom::{parse_fragment, serialize_children};
//!
//! let (dom, root) = parse_fragment("<p>Hello <b>world</b></p>");
//! assert_eq!(serialize_children(&dom, root), "<p>Hello <b>world</b></p>");
//! ```

mod arena;
mod serialize;
pub mod traverse;
mod tree_sink;

pub use arena::{Ancestors, ArenaDom, ArenaNode, Attribute, ChildrenIter, NodeData, NodeId};
pub use serialize::{
    escape_attr, escape_cdata, escape_comment, escape_text, is_void_element, serialize,
    serialize_children,
};

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns};

use tree_sink::ArenaSink;

/// Parse a markup fragment as if it were the content of a `<body>`.
///
/// Returns the DOM and a `Fragment` node holding the parsed nodes; that node
/// is the natural root to condense and serialize.
pub fn parse_fragment(html: &str) -> (ArenaDom, NodeId) {
    let sink = ArenaSink::new();
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let result = html5ever::parse_fragment(sink, ParseOpts::default(), context, Vec::new(), false)
        .from_utf8()
        .one(html.as_bytes());
    let mut dom = result.into_dom();

    // Fragment parsing yields document > html > [parsed nodes]
    let fragment = dom.create_fragment();
    let container = dom
        .children(dom.document())
        .find(|&id| dom.is_element(id))
        .unwrap_or(dom.document());
    let children: Vec<_> = dom.children(container).collect();
    for child in children {
        dom.append(fragment, child);
    }

    (dom, fragment)
}

/// Parse a complete HTML document.
pub fn parse_document(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    let result = html5ever::parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
