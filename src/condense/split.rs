//! Stage 3: Whitespace Splitter.
//!
//! Text nodes inside inline containers get their leading and trailing
//! whitespace split off into separate nodes, so the next stage can move it
//! out of the wrapper. Everywhere else, whitespace sitting at a phrase
//! boundary is simply trimmed.
//!
//! A text node made only of whitespace is cleared when it sits at a
//! boundary, unless it holds a non-breaking space: `<p>&nbsp;</p>` is a
//! visible blank line, `<p> </p>` is not.

use tracing::{debug, trace};

use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::boundary::{at_end_of_phrasing, at_start_of_phrasing, is_preformatted_character_data};
use super::pass::{is_attached, text_nodes_or_self};
use super::predicates::{is_empty_string, is_inline_container_element, is_nbsp, is_space};

/// Split or trim edge whitespace of every text node under `root`.
pub fn split_whitespace(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut split = 0;
    let mut trimmed = 0;

    for id in text_nodes_or_self(dom, root) {
        if !is_attached(dom, root, id) || is_preformatted_character_data(dom, id) {
            continue;
        }
        let Some(value) = dom.text(id) else {
            continue;
        };
        let blank = is_empty_string(value);
        let keep_blank = blank && value.chars().any(is_nbsp);
        let end = trailing_whitespace_start(value);
        let start = leading_content_start(value).unwrap_or(value.len());

        let in_inline = id != root
            && dom
                .parent(id)
                .is_some_and(|parent| is_inline_container_element(dom, parent));

        if in_inline {
            // Tail first: the original node keeps the leading piece.
            if let Some(end) = end.filter(|&end| end > 0) {
                if dom.split_text(id, end).is_some() {
                    trace!(node = id.0, at = end, "split trailing whitespace");
                    split += 1;
                }
            }
            if !blank && start > 0 && dom.split_text(id, start).is_some() {
                trace!(node = id.0, at = start, "split leading whitespace");
                split += 1;
            }
        } else if !keep_blank {
            if let Some(end) = end.filter(|&end| end > 0 || blank) {
                if at_end_of_phrasing(dom, root, id) {
                    if let Some(text) = dom.text_mut(id) {
                        text.truncate(end);
                        trimmed += 1;
                    }
                }
            }
            if start > 0 && dom.text(id).is_some_and(|text| !text.is_empty()) {
                if at_start_of_phrasing(dom, root, id) {
                    if let Some(text) = dom.text_mut(id) {
                        text.drain(..start);
                        trimmed += 1;
                    }
                }
            }
        }
    }

    debug!(split, trimmed, "split edge whitespace");
    report.whitespace_split += split;
    report.whitespace_trimmed += trimmed;
}

/// Byte offset where the trailing whitespace run begins.
///
/// `None` when the text does not end in whitespace, `Some(0)` when it is
/// entirely whitespace.
fn trailing_whitespace_start(value: &str) -> Option<usize> {
    let kept = value.trim_end_matches(is_space).len();
    (kept < value.len()).then_some(kept)
}

/// Byte offset of the first non-whitespace character, if any.
fn leading_content_start(value: &str) -> Option<usize> {
    value
        .char_indices()
        .find(|&(_, c)| !is_space(c))
        .map(|(i, _)| i)
}
