//! Phrase boundary detection.
//!
//! A position is at a phrase boundary when, looking in one direction, only
//! invisible things (comments, empty inline wrappers, whitespace) lie
//! between it and a block edge. Whitespace or a line break sitting there
//! renders the same as if it were not there at all.

use crate::dom::traverse::{Edge, edges};
use crate::dom::{ArenaDom, NodeData, NodeId};

pub use crate::dom::traverse::Direction;

use super::predicates::{is_block_container, is_empty_string, is_inline_container, is_preformatted};

/// Check if any ancestor of a node is preformatted.
pub fn is_preformatted_character_data(dom: &ArenaDom, node: NodeId) -> bool {
    dom.ancestors(node).any(|ancestor| is_preformatted(dom, ancestor))
}

/// What crossing the edge of a node means for the walk.
enum Crossing {
    /// Invisible for phrasing: keep walking.
    Transparent,
    /// The walk is decided.
    Stop(bool),
}

fn crossing(dom: &ArenaDom, node: NodeId) -> Crossing {
    match dom.data(node) {
        Some(NodeData::Comment(_) | NodeData::ProcessingInstruction { .. } | NodeData::Doctype { .. }) => {
            Crossing::Transparent
        }
        Some(NodeData::Element { name, .. }) => {
            if is_inline_container(&name.ns, &name.local) {
                Crossing::Transparent
            } else {
                Crossing::Stop(is_block_container(&name.ns, &name.local))
            }
        }
        Some(NodeData::Document | NodeData::Fragment) | None => Crossing::Stop(true),
        Some(NodeData::Text(_) | NodeData::CData(_)) => match dom.char_data(node) {
            Some(data) if !is_empty_string(data) => Crossing::Stop(false),
            _ => Crossing::Transparent,
        },
    }
}

/// Check whether `node` sits at the edge of a run of phrasing content.
///
/// Walks away from `node` in document order, judging every node edge it
/// crosses, whether entering a sibling or leaving an ancestor:
///
/// - comments, processing instructions, inline containers and
///   whitespace-only text are skipped (inline containers are walked into);
/// - a block container confirms the boundary;
/// - anything else is real content and refutes it.
///
/// Leaving `root`, or running out of nodes, confirms the boundary. The
/// content of `node` itself is not inspected.
pub fn at_boundary_of_phrasing(
    dom: &ArenaDom,
    root: NodeId,
    node: NodeId,
    direction: Direction,
) -> bool {
    if node == root {
        return true;
    }

    for edge in edges(dom, node, direction) {
        let crossed = match edge {
            Edge::Enter(next) => next,
            Edge::Exit(parent) if parent == root => return true,
            Edge::Exit(parent) => parent,
        };
        if let Crossing::Stop(at_boundary) = crossing(dom, crossed) {
            return at_boundary;
        }
    }
    true
}

/// True for the start of a phrase run:
///
/// - `<p>^hello</p>`
/// - `<p><i>^hello</i></p>`
/// - `<p>Hello</p>^World<p>Bye</p>` (mixed content)
pub fn at_start_of_phrasing(dom: &ArenaDom, root: NodeId, node: NodeId) -> bool {
    at_boundary_of_phrasing(dom, root, node, Direction::Backward)
}

/// True for the end of a phrase run:
///
/// - `hello^`
/// - `<p><i>hello^</i></p>`
/// - `<p><i>hello^</i> </p>` (whitespace before the block edge)
/// - `<p>hello^</p>World` (leaving the block)
/// - `Hello^<p>World</p>` (mixed content)
pub fn at_end_of_phrasing(dom: &ArenaDom, root: NodeId, node: NodeId) -> bool {
    at_boundary_of_phrasing(dom, root, node, Direction::Forward)
}
