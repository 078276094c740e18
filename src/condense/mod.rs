//! Whitespace condensation for pasted markup.
//!
//! Content copied from word processors and web pages arrives with runs of
//! whitespace, fake paragraphs made of `<br>`, and formatting wrappers that
//! hold nothing but spaces. The stages here rewrite such a tree in place
//! until it renders the same with as little markup as possible.
//!
//! ## Pipeline Order
//!
//! 1. **Paragraph Splitter Remover** - Drop `<br>`/`<hr>` at phrase edges
//! 2. **Whitespace Normalizer** - Collapse whitespace runs in text
//! 3. **Whitespace Splitter** - Split or trim edge whitespace of text
//! 4. **Inline Whitespace Fixer** - Move edge whitespace out of inline wrappers
//! 5. **Empty Node Pruner** - Remove wrappers and lists left empty (cascading)
//! 6. **Empty Block Removal** - Remove empty blocks per [`EmptyBlockPolicy`]
//!
//! Content inside `pre`, `code`, `samp` and `var` is never rewritten, and
//! nothing outside the chosen root is touched. Condensing an already
//! condensed tree changes nothing.

mod blocks;
mod boundary;
mod normalize;
mod pass;
mod predicates;
mod prune;
mod split;
mod splitters;
mod unwrap;

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::dom::{ArenaDom, NodeId};
use crate::error::Error;

pub use blocks::is_empty_block;
pub use boundary::{
    Direction, at_boundary_of_phrasing, at_end_of_phrasing, at_start_of_phrasing,
    is_preformatted_character_data,
};
pub use normalize::collapse_whitespace;
pub use predicates::{
    is_block_container, is_content_requiring_block_element, is_empty_phrasing_node,
    is_empty_string, is_inline_container, is_paragraph_splitter, is_preformatted, is_space,
};

/// How empty block containers (`p`, `div`, `li`, ...) are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmptyBlockPolicy {
    /// Keep the first empty block of each run of adjacent ones.
    #[default]
    Conservative,
    /// Remove every empty block.
    Aggressive,
}

impl EmptyBlockPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for EmptyBlockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyBlockPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

/// Condensation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub empty_block_policy: EmptyBlockPolicy,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_block_policy(mut self, policy: EmptyBlockPolicy) -> Self {
        self.empty_block_policy = policy;
        self
    }
}

/// What a condensation run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct CondenseReport {
    /// `<br>`/`<hr>` elements removed at phrase edges.
    pub splitters_removed: usize,
    /// Text nodes whose whitespace runs were collapsed.
    pub text_normalized: usize,
    /// Text nodes split to separate edge whitespace inside inline wrappers.
    pub whitespace_split: usize,
    /// Leading or trailing whitespace trimmed at phrase edges.
    pub whitespace_trimmed: usize,
    /// Empty text nodes removed.
    pub text_removed: usize,
    /// Times a whitespace node was moved out of an inline wrapper.
    pub text_unwrapped: usize,
    /// Moved whitespace nodes merged into neighbouring text.
    pub text_merged: usize,
    /// Empty inline wrappers and list elements removed.
    pub empty_nodes_pruned: usize,
    /// Empty block containers removed.
    pub empty_blocks_removed: usize,
}

impl CondenseReport {
    /// True if the run left the tree untouched.
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for CondenseReport {
    fn add_assign(&mut self, other: Self) {
        self.splitters_removed += other.splitters_removed;
        self.text_normalized += other.text_normalized;
        self.whitespace_split += other.whitespace_split;
        self.whitespace_trimmed += other.whitespace_trimmed;
        self.text_removed += other.text_removed;
        self.text_unwrapped += other.text_unwrapped;
        self.text_merged += other.text_merged;
        self.empty_nodes_pruned += other.empty_nodes_pruned;
        self.empty_blocks_removed += other.empty_blocks_removed;
    }
}

/// Upper bound on pipeline rounds. Pasted content settles in two or three.
const MAX_ROUNDS: usize = 8;

/// Run all condensation stages on the subtree under `root`.
///
/// `root` itself is never removed or moved, and no node is moved out of
/// it. Stages run in the order listed in the [module docs](self); each
/// relies on the cleanup done by the ones before it.
///
/// Whitespace merged into neighbouring text by one round can open up new
/// work for an earlier stage, so the pipeline repeats until a round changes
/// nothing. The returned report sums all rounds.
pub fn condense(dom: &mut ArenaDom, root: NodeId, options: &Options) -> CondenseReport {
    let _span = tracing::debug_span!("condense", root = root.0, policy = %options.empty_block_policy)
        .entered();

    let mut total = CondenseReport::default();
    for round in 1..=MAX_ROUNDS {
        let report = run_stages(dom, root, options);
        debug!(round, ?report, "condense round");
        if report.is_unchanged() {
            return total;
        }
        total += report;
    }

    warn!(rounds = MAX_ROUNDS, "condensation did not settle");
    total
}

fn run_stages(dom: &mut ArenaDom, root: NodeId, options: &Options) -> CondenseReport {
    let mut report = CondenseReport::default();
    splitters::remove_paragraph_splitters(dom, root, &mut report);
    normalize::normalize_inline_whitespace(dom, root, &mut report);
    split::split_whitespace(dom, root, &mut report);
    unwrap::fix_inline_whitespace(dom, root, &mut report);
    prune::prune_empty_nodes(dom, root, &mut report);
    match options.empty_block_policy {
        EmptyBlockPolicy::Conservative => blocks::remove_adjacent_empty_blocks(dom, root, &mut report),
        EmptyBlockPolicy::Aggressive => blocks::remove_empty_blocks(dom, root, &mut report),
    }
    report
}
