//! Stage 1: Paragraph Splitter Remover.
//!
//! Pasted content often fakes paragraph spacing with runs of `<br>` or a
//! stray `<hr>` at the edge of a block. At a phrase boundary such a splitter
//! renders nothing useful.

use tracing::debug;

use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::boundary::{at_end_of_phrasing, at_start_of_phrasing};
use super::pass::{elements, is_attached, remove};
use super::predicates::is_paragraph_splitter_element;

/// Remove `<br>` and `<hr>` elements sitting at the start or end of a phrase
/// run.
///
/// Runs one forward pass and one reverse pass. In `x<br><br>` the first
/// break is not at the end until the second is gone, so the reverse pass
/// catches trailing runs the forward pass leaves behind.
pub fn remove_paragraph_splitters(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let splitters: Vec<_> = elements(dom, root)
        .into_iter()
        .filter(|&id| is_paragraph_splitter_element(dom, id))
        .collect();

    let mut removed = 0;
    for &id in splitters.iter().chain(splitters.iter().rev()) {
        if !is_attached(dom, root, id) {
            continue;
        }
        if at_start_of_phrasing(dom, root, id) || at_end_of_phrasing(dom, root, id) {
            remove(dom, id, "paragraph splitter");
            removed += 1;
        }
    }

    debug!(removed, "removed paragraph splitters");
    report.splitters_removed += removed;
}
