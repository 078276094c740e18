//! Document-order navigation.
//!
//! These walk the arena links directly instead of relying on element-only
//! sibling shortcuts, so comments, text and processing instructions take
//! part in the order like any other node.

use super::arena::{ArenaDom, NodeId};

/// Walk direction for [`edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the document (preceding nodes).
    Backward,
    /// Towards the end of the document (following nodes).
    Forward,
}

/// A node edge crossed by [`Edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Stepped into a node: a sibling, or the outermost child of the node
    /// entered before.
    Enter(NodeId),
    /// Stepped out of an ancestor.
    Exit(NodeId),
}

/// The node edges met walking away from `node` in document order.
///
/// The content of `node` itself is skipped. Every node entered afterwards is
/// walked into, so a caller that does not want to see a subtree stops
/// there.
pub fn edges(dom: &ArenaDom, node: NodeId, direction: Direction) -> Edges<'_> {
    Edges {
        dom,
        direction,
        current: Some(node),
        descend: false,
    }
}

/// Iterator over node edges, see [`edges`].
pub struct Edges<'a> {
    dom: &'a ArenaDom,
    direction: Direction,
    current: Option<NodeId>,
    descend: bool,
}

impl Iterator for Edges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        if self.descend {
            let child = match self.direction {
                Direction::Backward => self.dom.last_child(current),
                Direction::Forward => self.dom.first_child(current),
            };
            if let Some(child) = child {
                self.current = Some(child);
                return Some(Edge::Enter(child));
            }
        }

        let sibling = match self.direction {
            Direction::Backward => self.dom.prev_sibling(current),
            Direction::Forward => self.dom.next_sibling(current),
        };
        if let Some(sibling) = sibling {
            self.current = Some(sibling);
            self.descend = true;
            return Some(Edge::Enter(sibling));
        }

        self.current = self.dom.parent(current);
        self.descend = false;
        self.current.map(Edge::Exit)
    }
}

/// The node immediately before `node` in document order.
///
/// That is the deepest last descendant of the previous sibling, or the
/// parent when there is no previous sibling.
pub fn preceding_node(dom: &ArenaDom, node: NodeId) -> Option<NodeId> {
    match edges(dom, node, Direction::Backward).next()? {
        Edge::Exit(parent) => Some(parent),
        Edge::Enter(mut preceding) => {
            while let Some(last) = dom.last_child(preceding) {
                preceding = last;
            }
            Some(preceding)
        }
    }
}

/// The node immediately after `node` in document order.
///
/// That is the first child, or else the next sibling of the nearest
/// ancestor-or-self that has one.
pub fn following_node(dom: &ArenaDom, node: NodeId) -> Option<NodeId> {
    let mut walk = edges(dom, node, Direction::Forward);
    walk.descend = true;
    walk.find_map(|edge| match edge {
        Edge::Enter(next) => Some(next),
        Edge::Exit(_) => None,
    })
}

/// Like [`following_node`], but `None` once the walk would leave `root`.
pub fn following_node_within(dom: &ArenaDom, node: NodeId, root: NodeId) -> Option<NodeId> {
    if let Some(first) = dom.first_child(node) {
        return Some(first);
    }
    let mut current = node;
    loop {
        if current == root {
            return None;
        }
        if let Some(next) = dom.next_sibling(current) {
            return Some(next);
        }
        current = dom.parent(current)?;
    }
}

/// Iterate over all descendants of `root` in document order, excluding `root`.
pub fn descendants(dom: &ArenaDom, root: NodeId) -> Descendants<'_> {
    Descendants {
        dom,
        root,
        current: root,
        done: false,
    }
}

/// Iterate over `root` followed by all its descendants in document order.
pub fn descendants_or_self(dom: &ArenaDom, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::once(root).chain(descendants(dom, root))
}

/// Collect the descendants of `root` that pass `filter`.
///
/// The result is a snapshot: mutating the tree afterwards does not affect it.
pub fn collect_descendants<F>(dom: &ArenaDom, root: NodeId, filter: F) -> Vec<NodeId>
where
    F: Fn(&ArenaDom, NodeId) -> bool,
{
    descendants(dom, root).filter(|&id| filter(dom, id)).collect()
}

/// Collect `root` and its descendants that pass `filter`.
pub fn collect_descendants_or_self<F>(dom: &ArenaDom, root: NodeId, filter: F) -> Vec<NodeId>
where
    F: Fn(&ArenaDom, NodeId) -> bool,
{
    descendants_or_self(dom, root)
        .filter(|&id| filter(dom, id))
        .collect()
}

/// Document-order iterator over a subtree, see [`descendants`].
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    root: NodeId,
    current: NodeId,
    done: bool,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match following_node_within(self.dom, self.current, self.root) {
            Some(next) => {
                self.current = next;
                Some(next)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
