//! Stage 4: Inline Whitespace Fixer.
//!
//! Moves whitespace-only text out of the edges of inline containers:
//!
//! ```text
//! Click<a> here</a>   ->   Click <a>here</a>
//! ```
//!
//! A moved node that lands next to a text node is merged into it.

use tracing::{debug, trace};

use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::boundary::{Direction, is_preformatted_character_data};
use super::pass::{is_attached, remove, text_nodes};
use super::predicates::{is_empty_string, is_inline_container_element};

/// Outcome of moving a node out of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unwrapped {
    /// Now a sibling of its former parent.
    Moved,
    /// Moved and then merged into adjacent text; the node is gone.
    Merged,
    /// The parent is the condensation root or is itself detached.
    Stuck,
}

/// Move whitespace-only text nodes out of the inline containers they open
/// or close, and drop empty text nodes.
pub fn fix_inline_whitespace(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut removed = 0;
    let mut unwrapped = 0;
    let mut merged = 0;

    for id in text_nodes(dom, root) {
        if !is_attached(dom, root, id) {
            continue;
        }
        let Some(value) = dom.text(id) else {
            continue;
        };
        if !is_empty_string(value) || is_preformatted_character_data(dom, id) {
            continue;
        }

        if value.is_empty() {
            remove(dom, id, "empty text");
            removed += 1;
            continue;
        }

        let direction = if dom.prev_sibling(id).is_none() {
            Direction::Backward
        } else if dom.next_sibling(id).is_none() {
            Direction::Forward
        } else {
            continue;
        };

        while is_at_edge(dom, id, direction)
            && dom
                .parent(id)
                .is_some_and(|parent| is_inline_container_element(dom, parent))
        {
            match unwrap_adjacent(dom, root, id, direction) {
                Unwrapped::Moved => unwrapped += 1,
                Unwrapped::Merged => {
                    unwrapped += 1;
                    merged += 1;
                    break;
                }
                Unwrapped::Stuck => break,
            }
        }
    }

    debug!(removed, unwrapped, merged, "fixed inline whitespace");
    report.text_removed += removed;
    report.text_unwrapped += unwrapped;
    report.text_merged += merged;
}

fn is_at_edge(dom: &ArenaDom, node: NodeId, direction: Direction) -> bool {
    match direction {
        Direction::Backward => dom.prev_sibling(node).is_none(),
        Direction::Forward => dom.next_sibling(node).is_none(),
    }
}

/// Move a text node out of its parent, to just before (`Backward`) or just
/// after (`Forward`) it. If that puts it next to a text node on the side it
/// moved toward, its content is merged there and the node removed.
fn unwrap_adjacent(dom: &mut ArenaDom, root: NodeId, node: NodeId, direction: Direction) -> Unwrapped {
    let Some(parent) = dom.parent(node) else {
        return Unwrapped::Stuck;
    };
    if parent == root || dom.parent(parent).is_none() {
        return Unwrapped::Stuck;
    }

    let adjacent = match direction {
        Direction::Backward => {
            dom.insert_before(parent, node);
            dom.prev_sibling(node)
        }
        Direction::Forward => {
            dom.insert_after(parent, node);
            dom.next_sibling(node)
        }
    };
    trace!(node = node.0, from = parent.0, ?direction, "unwrap");

    let Some(adjacent) = adjacent.filter(|&id| dom.is_text(id)) else {
        return Unwrapped::Moved;
    };
    let moved = dom.text(node).unwrap_or_default().to_owned();
    if let Some(text) = dom.text_mut(adjacent) {
        match direction {
            Direction::Backward => text.push_str(&moved),
            Direction::Forward => text.insert_str(0, &moved),
        }
    }
    remove(dom, node, "merged");
    Unwrapped::Merged
}

#[cfg(test)]
mod tests {
    use html5ever::{LocalName, QualName, ns};

    use super::*;
    use crate::dom::serialize_children;

    fn element(dom: &mut ArenaDom, parent: NodeId, local: &str) -> NodeId {
        let id = dom.create_element(QualName::new(None, ns!(html), LocalName::from(local)), vec![]);
        dom.append(parent, id);
        id
    }

    fn text(dom: &mut ArenaDom, parent: NodeId, value: &str) -> NodeId {
        let id = dom.create_text(value);
        dom.append(parent, id);
        id
    }

    fn fix(dom: &mut ArenaDom, root: NodeId) -> CondenseReport {
        let mut report = CondenseReport::default();
        fix_inline_whitespace(dom, root, &mut report);
        report
    }

    #[test]
    fn test_leading_space_merges_backward() {
        // Click<a> </a><a>here</a> after splitting
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let click = text(&mut dom, root, "Click");
        let a = element(&mut dom, root, "a");
        text(&mut dom, a, " ");
        text(&mut dom, a, "here");

        let report = fix(&mut dom, root);

        assert_eq!(dom.text(click), Some("Click "));
        assert_eq!(serialize_children(&dom, root), "Click <a>here</a>");
        assert_eq!(report.text_unwrapped, 1);
        assert_eq!(report.text_merged, 1);
    }

    #[test]
    fn test_trailing_space_merges_forward() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let b = element(&mut dom, root, "b");
        text(&mut dom, b, "bold");
        text(&mut dom, b, " ");
        let after = text(&mut dom, root, "text");

        fix(&mut dom, root);

        assert_eq!(dom.text(after), Some(" text"));
        assert_eq!(serialize_children(&dom, root), "<b>bold</b> text");
    }

    #[test]
    fn test_climbs_nested_inline_containers() {
        // x<b><i> y</i></b> once split
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let p = element(&mut dom, root, "p");
        let b = element(&mut dom, p, "b");
        let i = element(&mut dom, b, "i");
        let space = text(&mut dom, i, " ");
        text(&mut dom, i, "y");

        let report = fix(&mut dom, root);

        assert_eq!(dom.parent(space), Some(p));
        assert_eq!(serialize_children(&dom, root), "<p> <b><i>y</i></b></p>");
        assert_eq!(report.text_unwrapped, 2);
        assert_eq!(report.text_merged, 0);
    }

    #[test]
    fn test_never_leaves_the_root() {
        let mut dom = ArenaDom::new();
        let span = dom.create_element(QualName::new(None, ns!(html), LocalName::from("span")), vec![]);
        let holder = dom.create_fragment();
        dom.append(holder, span);
        let space = text(&mut dom, span, " ");
        text(&mut dom, span, "x");

        fix(&mut dom, span);
        assert_eq!(dom.parent(space), Some(span));
    }

    #[test]
    fn test_empty_text_removed() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let p = element(&mut dom, root, "p");
        text(&mut dom, p, "");
        text(&mut dom, p, "x");

        let report = fix(&mut dom, root);
        assert_eq!(dom.children(p).count(), 1);
        assert_eq!(report.text_removed, 1);
    }

    #[test]
    fn test_middle_whitespace_stays() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let b = element(&mut dom, root, "b");
        text(&mut dom, b, "x");
        text(&mut dom, b, " ");
        text(&mut dom, b, "y");

        assert_eq!(fix(&mut dom, root), CondenseReport::default());
        assert_eq!(dom.children(b).count(), 3);
    }

    #[test]
    fn test_non_inline_parent_is_kept() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        text(&mut dom, root, "Hello ");
        let del = element(&mut dom, root, "del");
        text(&mut dom, del, " ");
        text(&mut dom, root, "world");

        fix(&mut dom, root);
        assert_eq!(serialize_children(&dom, root), "Hello <del> </del>world");
    }
}
