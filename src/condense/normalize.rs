//! Stage 2: Whitespace Normalizer.

use std::borrow::Cow;

use tracing::debug;

use crate::dom::{ArenaDom, NodeId};

use super::CondenseReport;
use super::boundary::is_preformatted_character_data;
use super::pass::text_nodes_or_self;
use super::predicates::{is_nbsp, is_space};

/// Collapse whitespace runs in every text node outside preformatted content.
///
/// A single non-breaking space forces visible spacing and is kept. A run of
/// them, or any run mixing them with ordinary whitespace, is a paste
/// artifact:
///
/// ```text
/// "Chapter 6: \u{a0}\u{a0}\u{a0}Hello"  ->  "Chapter 6: Hello"
/// "wide\u{a0}\u{a0}\u{a0}gap"           ->  "wide\u{a0}gap"
/// ```
///
/// Text nodes may end up empty; later stages remove them.
pub fn normalize_inline_whitespace(dom: &mut ArenaDom, root: NodeId, report: &mut CondenseReport) {
    let mut rewritten = 0;

    for id in text_nodes_or_self(dom, root) {
        if is_preformatted_character_data(dom, id) {
            continue;
        }
        let Some(value) = dom.text(id) else {
            continue;
        };
        if let Cow::Owned(replacement) = collapse_whitespace(value) {
            dom.set_text(id, replacement);
            rewritten += 1;
        }
    }

    debug!(rewritten, "normalized inline whitespace");
    report.text_normalized += rewritten;
}

/// Collapse every maximal whitespace run of two or more characters.
///
/// A run made only of non-breaking spaces becomes one non-breaking space;
/// any other run becomes one ordinary space. Single whitespace characters
/// are left as they are. Returns the input unchanged when nothing collapses.
pub fn collapse_whitespace(value: &str) -> Cow<'_, str> {
    let mut prev_space = false;
    let collapsible = value.chars().any(|c| {
        let space = is_space(c);
        let run = space && prev_space;
        prev_space = space;
        run
    });
    if !collapsible {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_space(c) {
            out.push(c);
            continue;
        }

        let mut len = 1;
        let mut all_nbsp = is_nbsp(c);
        while let Some(&next) = chars.peek() {
            if !is_space(next) {
                break;
            }
            len += 1;
            all_nbsp &= is_nbsp(next);
            chars.next();
        }

        match (len, all_nbsp) {
            (1, _) => out.push(c),
            (_, true) => out.push('\u{a0}'),
            (_, false) => out.push(' '),
        }
    }
    Cow::Owned(out)
}
