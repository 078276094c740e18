//! Stage 6: Empty Block Removal.
//!
//! A block is empty when nothing inside it takes visible space. The
//! policy decides how many of them survive:
//!
//! - conservative: only blocks following another empty block go, leaving
//!   one per run, since a single empty paragraph is often deliberate spacing;
//! - aggressive: every empty block goes, cascading upward.

use tracing::debug;

use crate::dom::traverse::descendants;
use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::pass::{elements, is_attached, remove};
use super::predicates::{
    is_block_container_element, is_empty_phrasing_node, is_invisible, is_markup_whitespace,
};

/// Check if a block container holds nothing visible.
///
/// Every descendant must be an empty phrasing node; the scan stops at the
/// first one that is not.
pub fn is_empty_block(dom: &ArenaDom, node: NodeId) -> bool {
    is_block_container_element(dom, node)
        && descendants(dom, node).all(|id| is_empty_phrasing_node(dom, id))
}

/// Remove empty blocks that directly follow another empty block.
///
/// Comments, processing instructions and markup whitespace between the
/// blocks do not break the run; anything else does.
pub fn remove_adjacent_empty_blocks(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut removed = 0;

    for id in elements(dom, root) {
        if !is_attached(dom, root, id) || !is_empty_block(dom, id) {
            continue;
        }

        let mut cursor = dom.next_sibling(id);
        while let Some(sibling) = cursor {
            cursor = dom.next_sibling(sibling);
            if is_invisible(dom, sibling) || dom.text(sibling).is_some_and(is_markup_whitespace) {
                continue;
            }
            if !is_empty_block(dom, sibling) {
                break;
            }
            remove(dom, sibling, "adjacent empty block");
            removed += 1;
        }
    }

    debug!(removed, "removed adjacent empty blocks");
    report.empty_blocks_removed += removed;
}

/// Remove every empty block, innermost first.
pub fn remove_empty_blocks(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut removed = 0;

    for id in elements(dom, root).into_iter().rev() {
        if is_attached(dom, root, id) && is_empty_block(dom, id) {
            remove(dom, id, "empty block");
            removed += 1;
        }
    }

    debug!(removed, "removed empty blocks");
    report.empty_blocks_removed += removed;
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

    fn text(dom: &mut ArenaDom, parent: NodeId, value: &str) {
        let id = dom.create_text(value);
        dom.append(parent, id);
    }

    fn three_empty_divs() -> (ArenaDom, NodeId) {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        for _ in 0..3 {
            element(&mut dom, root, "div");
        }
        (dom, root)
    }

    #[test]
    fn test_is_empty_block() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();

        let empty = element(&mut dom, root, "p");
        let b = element(&mut dom, empty, "b");
        text(&mut dom, b, "\u{a0} ");
        let comment = dom.create_comment("x");
        dom.append(empty, comment);

        let full = element(&mut dom, root, "div");
        text(&mut dom, full, "x");

        let image = element(&mut dom, root, "div");
        element(&mut dom, image, "img");

        let nested = element(&mut dom, root, "div");
        element(&mut dom, nested, "p");

        assert!(is_empty_block(&dom, empty));
        assert!(!is_empty_block(&dom, full));
        assert!(!is_empty_block(&dom, image));
        // A block inside is not phrasing
        assert!(!is_empty_block(&dom, nested));
        assert!(!is_empty_block(&dom, b));
    }

    #[test]
    fn test_conservative_keeps_one_per_run() {
        let (mut dom, root) = three_empty_divs();
        let mut report = CondenseReport::default();
        remove_adjacent_empty_blocks(&mut dom, root, &mut report);

        assert_eq!(serialize_children(&dom, root), "<div></div>");
        assert_eq!(report.empty_blocks_removed, 2);
    }

    #[test]
    fn test_aggressive_removes_all() {
        let (mut dom, root) = three_empty_divs();
        let mut report = CondenseReport::default();
        remove_empty_blocks(&mut dom, root, &mut report);

        assert_eq!(serialize_children(&dom, root), "");
        assert_eq!(report.empty_blocks_removed, 3);
    }

    #[test]
    fn test_conservative_skips_markup_whitespace_and_comments() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        element(&mut dom, root, "p");
        text(&mut dom, root, "\n  ");
        let comment = dom.create_comment("gap");
        dom.append(root, comment);
        element(&mut dom, root, "p");

        let mut report = CondenseReport::default();
        remove_adjacent_empty_blocks(&mut dom, root, &mut report);
        assert_eq!(serialize_children(&dom, root), "<p></p>\n  <!--gap-->");
    }

    #[test]
    fn test_conservative_run_broken_by_content() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        element(&mut dom, root, "div");
        let p = element(&mut dom, root, "p");
        text(&mut dom, p, "x");
        element(&mut dom, root, "div");
        text(&mut dom, root, "\u{a0}");
        element(&mut dom, root, "div");

        let mut report = CondenseReport::default();
        remove_adjacent_empty_blocks(&mut dom, root, &mut report);
        assert_eq!(report.empty_blocks_removed, 0);
    }

    #[test]
    fn test_aggressive_cascades() {
        let mut dom = ArenaDom::new();
        let root = dom.create_fragment();
        let outer = element(&mut dom, root, "div");
        let inner = element(&mut dom, outer, "p");
        text(&mut dom, inner, " ");
        let kept = element(&mut dom, root, "p");
        text(&mut dom, kept, "x");

        let mut report = CondenseReport::default();
        remove_empty_blocks(&mut dom, root, &mut report);
        assert_eq!(serialize_children(&dom, root), "<p>x</p>");
        assert_eq!(report.empty_blocks_removed, 2);
    }
}
