//! Stage 5: Empty Node Pruner.

use tracing::debug;

use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::pass::{elements, is_attached, remove};
use super::predicates::{is_content_requiring_block_element, is_inline_container_element};

/// Remove childless inline containers and childless lists or list items.
///
/// Previous stages leave wrappers behind once their whitespace has moved
/// out:
/// ```html
/// Hello<b></b> world
/// <ul><li></li></ul>
/// ```
///
/// Elements are visited in reverse document order, so descendants go
/// first and emptiness cascades upward:
/// - `<ul><li><span></span></li></ul>`
/// - the span is empty, delete
/// - the li is now empty, delete
/// - the ul is now empty, delete
pub fn prune_empty_nodes(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut pruned = 0;

    for id in elements(dom, root).into_iter().rev() {
        if is_attached(dom, root, id) && should_prune(dom, id) {
            remove(dom, id, "empty");
            pruned += 1;
        }
    }

    debug!(pruned, "pruned empty nodes");
    report.empty_nodes_pruned += pruned;
}

fn should_prune(dom: &ArenaDom, node: NodeId) -> bool {
    !dom.has_children(node)
        && (is_inline_container_element(dom, node) || is_content_requiring_block_element(dom, node))
}
