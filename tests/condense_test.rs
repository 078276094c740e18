//! End-to-end condensation tests.
//!
//! Each test parses a fragment the way a paste handler would receive it,
//! condenses it, and checks the serialized result.

use proptest::prelude::*;

use pastecondense::condense::is_space;
use pastecondense::dom::{ArenaDom, NodeId, parse_fragment, serialize_children};
use pastecondense::{EmptyBlockPolicy, Options, condense, condense_html};

fn conservative(html: &str) -> String {
    condense_html(html, &Options::default())
}

fn aggressive(html: &str) -> String {
    condense_html(
        html,
        &Options::new().with_empty_block_policy(EmptyBlockPolicy::Aggressive),
    )
}

/// All text in document order, without any whitespace.
fn visible_characters(dom: &ArenaDom, root: NodeId) -> String {
    pastecondense::dom::traverse::descendants(dom, root)
        .filter_map(|id| dom.text(id))
        .flat_map(str::chars)
        .filter(|c| !is_space(*c))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_outer_whitespace_trimmed_inner_collapsed() {
    assert_eq!(conservative("  Hello  world  "), "Hello world");
}

#[test]
fn test_trailing_breaks_removed() {
    assert_eq!(conservative("<p>Hello world<br><br></p>"), "<p>Hello world</p>");
}

#[test]
fn test_leading_breaks_removed() {
    assert_eq!(conservative("<p><br><br>Hello</p>"), "<p>Hello</p>");
    assert_eq!(conservative("<div><hr>Text</div>"), "<div>Text</div>");
}

#[test]
fn test_nbsp_run_collapsed() {
    let input = format!("Chapter 6: {}Hello world", "\u{a0}".repeat(9));
    assert_eq!(conservative(&input), "Chapter 6: Hello world");
}

#[test]
fn test_single_nbsp_kept() {
    assert_eq!(conservative("10\u{a0}km"), "10&nbsp;km");
    assert_eq!(conservative("a\u{a0}\u{a0}\u{a0}b"), "a&nbsp;b");
}

#[test]
fn test_interior_spaces_untouched() {
    assert_eq!(conservative("Joy <i>to</i> the world"), "Joy <i>to</i> the world");
}

#[test]
fn test_whitespace_only_inline_container_unwrapped() {
    assert_eq!(conservative("Hello<b>   </b>world"), "Hello world");
}

#[test]
fn test_leading_space_moves_out_of_link() {
    assert_eq!(conservative("Click<a> here</a>"), "Click <a>here</a>");
    assert_eq!(
        conservative("Click<a href=\"/x\">here </a>now"),
        "Click<a href=\"/x\">here</a> now"
    );
}

#[test]
fn test_non_inline_container_keeps_whitespace() {
    assert_eq!(conservative("Hello <del>   </del>world"), "Hello <del> </del>world");
}

#[test]
fn test_break_between_lines_kept() {
    assert_eq!(conservative("<p>one<br>two</p>"), "<p>one<br>two</p>");
}

#[test]
fn test_empty_list_pruned() {
    assert_eq!(conservative("<ul><li> </li></ul><p>x</p>"), "<p>x</p>");
    assert_eq!(conservative("<ul><li><span></span></li></ul><p>x</p>"), "<p>x</p>");
}

#[test]
fn test_heading_edge_space_kept() {
    // Headings and cells are not phrase boundaries; the paragraph is
    assert_eq!(
        conservative("<h1> Title </h1><p> x </p>"),
        "<h1> Title </h1><p>x</p>"
    );
    assert_eq!(
        conservative("<table><tr><td> cell </td></tr></table>"),
        "<table><tbody><tr><td> cell </td></tr></tbody></table>"
    );
}

// ============================================================================
// Empty block policies
// ============================================================================

#[test]
fn test_three_empty_divs() {
    let input = "<div></div><div></div><div></div>";
    assert_eq!(conservative(input), "<div></div>");
    assert_eq!(aggressive(input), "");
}

#[test]
fn test_policies_differ_across_content() {
    let input = "<div></div><p>x</p><div></div>";
    assert_eq!(conservative(input), "<div></div><p>x</p><div></div>");
    assert_eq!(aggressive(input), "<p>x</p>");
}

#[test]
fn test_blank_paragraph_run_from_word() {
    let input = "<p>Intro</p><p>\u{a0}</p><p>&nbsp;</p>\n<p><o:p></o:p></p><p>Body</p>";
    // o:p is not an inline container we know, so its paragraph is content
    assert_eq!(
        conservative(input),
        "<p>Intro</p><p>&nbsp;</p><p><o:p></o:p></p><p>Body</p>"
    );
    assert_eq!(aggressive(input), "<p>Intro</p><p><o:p></o:p></p><p>Body</p>");
}

// ============================================================================
// Preformatted content
// ============================================================================

#[test]
fn test_preformatted_preserved() {
    let input = "<pre>  keep   this\n\n  as is  </pre><p>  but   not this  </p>";
    assert_eq!(
        conservative(input),
        "<pre>  keep   this\n\n  as is  </pre><p>but not this</p>"
    );
}

#[test]
fn test_inline_code_preserved() {
    assert_eq!(
        conservative("Run <code>  ls   -l </code>  now"),
        "Run <code>  ls   -l </code> now"
    );
    assert_eq!(conservative("<p><var> n </var></p>"), "<p><var> n </var></p>");
}

#[test]
fn test_nested_inline_inside_pre_preserved() {
    let input = "<pre><b>  x  </b>\n<span> </span></pre>";
    assert_eq!(conservative(input), input);
}

// ============================================================================
// Idempotence and text preservation
// ============================================================================

const CORPUS: &[&str] = &[
    "  Hello  world  ",
    "<p>Hello world<br><br></p>",
    "Joy <i>to</i> the world",
    "Hello<b>   </b>world",
    "Click<a> here</a>",
    "Hello <del>   </del>world",
    "<div> <span> a </span>  b<br></div><div></div>",
    "<p>a <b></b> b</p>",
    "<p><b><i>  nested  </i></b>tail </p>",
    "<ul><li>one<br></li><li> </li><li></li></ul>",
    "<div>\n  <p>\u{a0}\u{a0}</p>\n  <p></p>\n  <!-- gap -->\n  <p> </p>\n</div>",
    "<p>x<span> </span><span> </span>y</p>",
    "<pre>  a  </pre> <p> b </p> <pre> c </pre>",
    "<table><tr><td> cell </td><td><br></td></tr></table>",
];

#[test]
fn test_condensing_twice_changes_nothing() {
    for policy in [EmptyBlockPolicy::Conservative, EmptyBlockPolicy::Aggressive] {
        let options = Options::new().with_empty_block_policy(policy);
        for input in CORPUS {
            let (mut dom, root) = parse_fragment(input);
            condense(&mut dom, root, &options);
            let once = serialize_children(&dom, root);

            let second = condense(&mut dom, root, &options);
            assert!(second.is_unchanged(), "{input:?} ({policy}): {second:?}");
            assert_eq!(serialize_children(&dom, root), once, "{input:?} ({policy})");
        }
    }
}

#[test]
fn test_visible_characters_preserved() {
    for input in CORPUS {
        let (mut dom, root) = parse_fragment(input);
        let before = visible_characters(&dom, root);
        condense(&mut dom, root, &Options::default());
        assert_eq!(visible_characters(&dom, root), before, "{input:?}");
    }
}

#[test]
fn test_adjacent_text_is_joined() {
    // The removed wrapper must not leave two spaces behind
    assert_eq!(conservative("<p>a <b></b> b</p>"), "<p>a b</p>");
}

#[test]
fn test_output_is_stable_when_reparsed() {
    for input in CORPUS {
        let once = conservative(input);
        assert_eq!(conservative(&once), once, "{input:?}");
    }
}

// ============================================================================
// Scope
// ============================================================================

#[test]
fn test_condensing_a_subtree_leaves_the_rest_alone() {
    let (mut dom, root) = parse_fragment("<p>  outside  </p><div><span> in </span><br></div>");
    let div = dom.find_by_tag("div").expect("div");

    condense(&mut dom, div, &Options::default());

    assert_eq!(
        serialize_children(&dom, root),
        "<p>  outside  </p><div><span>in</span></div>"
    );
}

// ============================================================================
// Properties
// ============================================================================

fn fragment() -> impl Strategy<Value = String> {
    let piece = prop::sample::select(vec![
        " ",
        "  ",
        "\u{a0}",
        "\n",
        "word",
        "<b>",
        "</b>",
        "<i> </i>",
        "<span>",
        "</span>",
        "<a href=\"#\"> x </a>",
        "<br>",
        "<hr>",
        "<p>",
        "</p>",
        "<div></div>",
        "<ul><li> </li></ul>",
        "<!--c-->",
        "<pre>  p  </pre>",
        "<code> c </code>",
        "<del> </del>",
    ]);
    prop::collection::vec(piece, 0..16).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn prop_condense_is_idempotent(html in fragment(), aggressive in any::<bool>()) {
        let policy = if aggressive { EmptyBlockPolicy::Aggressive } else { EmptyBlockPolicy::Conservative };
        let options = Options::new().with_empty_block_policy(policy);
        let (mut dom, root) = parse_fragment(&html);
        condense(&mut dom, root, &options);
        let once = serialize_children(&dom, root);

        let second = condense(&mut dom, root, &options);
        prop_assert!(second.is_unchanged(), "{:?}", second);
        prop_assert_eq!(serialize_children(&dom, root), once);
    }

    #[test]
    fn prop_visible_characters_preserved(html in fragment()) {
        let (mut dom, root) = parse_fragment(&html);
        let before = visible_characters(&dom, root);
        condense(&mut dom, root, &Options::default());
        prop_assert_eq!(visible_characters(&dom, root), before);
    }
}
