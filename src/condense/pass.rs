//! Snapshot helpers shared by the stages.
//!
//! Every stage first collects the nodes it will visit, then mutates. Nodes a
//! stage has already removed stay in the snapshot, so each visit re-checks
//! that the node is still attached under the root.

use tracing::trace;

use crate::dom::traverse::{collect_descendants, collect_descendants_or_self};
use crate::dom::{ArenaDom, NodeId};

/// All text nodes under `root` (including `root` itself), in document order.
pub fn text_nodes_or_self(dom: &ArenaDom, root: NodeId) -> Vec<NodeId> {
    collect_descendants_or_self(dom, root, |dom, id| dom.is_text(id))
}

/// All text nodes strictly below `root`, in document order.
pub fn text_nodes(dom: &ArenaDom, root: NodeId) -> Vec<NodeId> {
    collect_descendants(dom, root, |dom, id| dom.is_text(id))
}

/// All elements strictly below `root`, in document order.
pub fn elements(dom: &ArenaDom, root: NodeId) -> Vec<NodeId> {
    collect_descendants(dom, root, |dom, id| dom.is_element(id))
}

/// Check that a snapshotted node is still part of the tree under `root`.
pub fn is_attached(dom: &ArenaDom, root: NodeId, node: NodeId) -> bool {
    dom.is_within(node, root)
}

/// Remove a node from the tree.
///
/// Text nodes brought together by the removal are joined, so a later
/// normalization sees the whitespace on both sides as one run.
pub fn remove(dom: &mut ArenaDom, node: NodeId, why: &'static str) {
    trace!(node = node.0, tag = ?dom.element_name(node), why, "remove");
    let prev = dom.prev_sibling(node);
    let next = dom.next_sibling(node);
    dom.detach(node);

    if let (Some(prev), Some(next)) = (prev, next) {
        join_text(dom, prev, next);
    }
}

fn join_text(dom: &mut ArenaDom, first: NodeId, second: NodeId) {
    if !dom.is_text(first) {
        return;
    }
    let Some(tail) = dom.text(second).map(str::to_owned) else {
        return;
    };
    if let Some(text) = dom.text_mut(first) {
        text.push_str(&tail);
    }
    dom.detach(second);
}

#[cfg(test)]
mod tests {
    use html5ever::{LocalName, QualName, ns};

    use super::*;

    #[test]
    fn test_remove_joins_neighbouring_text() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let a = dom.create_text("a ");
        let b = dom.create_element(QualName::new(None, ns!(html), LocalName::from("b")), vec![]);
        let c = dom.create_text(" c");
        dom.append(root, a);
        dom.append(root, b);
        dom.append(root, c);

        remove(&mut dom, b, "test");

        assert_eq!(dom.children(root).collect::<Vec<_>>(), [a]);
        assert_eq!(dom.text(a), Some("a  c"));
        assert!(!is_attached(&dom, root, c));
    }

    #[test]
    fn test_remove_keeps_mixed_neighbours() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let a = dom.create_text("a");
        let br = dom.create_element(QualName::new(None, ns!(html), LocalName::from("br")), vec![]);
        let comment = dom.create_comment("c");
        dom.append(root, a);
        dom.append(root, br);
        dom.append(root, comment);

        remove(&mut dom, br, "test");
        assert_eq!(dom.children(root).collect::<Vec<_>>(), [a, comment]);
    }
}
