//! # pastecondense
//!
//! Whitespace condensation for markup pasted from word processors and web
//! pages.
//!
//! Pasted content renders fine but carries a lot of noise: runs of
//! whitespace and non-breaking spaces, `<br><br>` standing in for paragraph
//! spacing, formatting wrappers holding nothing but a space, and stacks of
//! empty paragraphs. This crate rewrites such a tree so it renders the same
//! with minimal markup. Content in `pre`, `code`, `samp` and `var` is left
//! byte-for-byte intact.
//!
//! Input is expected to be sanitized already; nothing here filters
//! elements or attributes.
//!
//! ## Quick Start
//!
//! ```
//! use pastecondense::{Options, condense_html};
//!
//! let html = "<p>  Click<a href=\"#\"> here</a>  to continue<br><br></p>";
//! assert_eq!(
//!     condense_html(html, &Options::default()),
//!     "<p>Click <a href=\"#\">here</a> to continue</p>"
//! );
//! ```
//!
//! ## Working with Trees
//!
//! [`condense`](condense()) works on an [`ArenaDom`](dom::ArenaDom) in place
//! and only touches the subtree under the root it is given:
//!
//! ```
//! use pastecondense::dom::{parse_fragment, serialize_children};
//! use pastecondense::{EmptyBlockPolicy, Options, condense};
//!
//! let (mut dom, root) = parse_fragment("<div></div><div> </div><p>x</p>");
//! let options = Options::new().with_empty_block_policy(EmptyBlockPolicy::Aggressive);
//! let report = condense(&mut dom, root, &options);
//!
//! assert_eq!(serialize_children(&dom, root), "<p>x</p>");
//! assert_eq!(report.empty_blocks_removed, 2);
//! ```

pub mod condense;
pub mod dom;
mod error;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use condense::{CondenseReport, EmptyBlockPolicy, Options, condense};
pub use error::{Error, Result};

use encoding_rs::{Encoding, WINDOWS_1252};

/// Parse a markup fragment, condense it, and serialize the result.
pub fn condense_html(html: &str, options: &Options) -> String {
    condense_html_with_report(html, options).0
}

/// Like [`condense_html`], also returning what was changed.
pub fn condense_html_with_report(html: &str, options: &Options) -> (String, CondenseReport) {
    let (mut dom, root) = dom::parse_fragment(html);
    let report = condense(&mut dom, root, options);
    (dom::serialize_children(&dom, root), report)
}

/// Parse a complete document, condense its `<body>`, and serialize the
/// whole document.
pub fn condense_document_html(html: &str, options: &Options) -> (String, CondenseReport) {
    let mut dom = dom::parse_document(html);
    let report = match dom.body() {
        Some(body) => condense(&mut dom, body, options),
        None => CondenseReport::default(),
    };
    (dom::serialize(&dom, dom.document()), report)
}

/// Decode raw markup bytes to a string.
///
/// A byte-order mark selects the encoding. Without one the bytes are taken
/// as UTF-8 if valid, else as Windows-1252, which is what most clipboard
/// dumps from office suites use.
pub fn decode_html(bytes: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| text.into_owned())
            .ok_or_else(|| Error::Encoding(format!("malformed {} input", encoding.name())));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_and_bom() {
        assert_eq!(decode_html("caf\u{e9}".as_bytes()).unwrap(), "caf\u{e9}");
        assert_eq!(decode_html(b"\xEF\xBB\xBFhi").unwrap(), "hi");
        assert_eq!(decode_html(b"\xFF\xFEh\x00i\x00").unwrap(), "hi");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0x93/0x94 are curly quotes, 0xA0 a non-breaking space
        assert_eq!(
            decode_html(b"\x93quoted\x94\xA0x").unwrap(),
            "\u{201c}quoted\u{201d}\u{a0}x"
        );
    }

    #[test]
    fn test_decode_malformed_bom_input() {
        assert!(matches!(
            decode_html(b"\xEF\xBB\xBF\xC3"),
            Err(Error::Encoding(_))
        ));
    }

    #[test]
    fn test_condense_document_keeps_head() {
        let (out, report) = condense_document_html(
            "<!DOCTYPE html><html><head><title>  t  </title></head><body><p>  x  </p></body></html>",
            &Options::default(),
        );
        assert_eq!(
            out,
            "<!DOCTYPE html><html><head><title>  t  </title></head><body><p>x</p></body></html>"
        );
        assert_eq!(report.whitespace_trimmed, 2);
    }
}
