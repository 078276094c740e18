//! WASM bindings for condensing pasted markup in the browser.
//!
//! An editor's paste handler sanitizes the clipboard HTML, passes it
//! through [`condense`], and inserts the result.

use wasm_bindgen::prelude::*;

use crate::{EmptyBlockPolicy, Options, condense_html};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Condense a markup fragment.
///
/// With `aggressive` set every empty block is removed; otherwise one empty
/// block per run is kept.
#[wasm_bindgen]
pub fn condense(html: &str, aggressive: bool) -> String {
    let policy = if aggressive {
        EmptyBlockPolicy::Aggressive
    } else {
        EmptyBlockPolicy::Conservative
    };
    condense_html(html, &Options::new().with_empty_block_policy(policy))
}

/// Condense a markup fragment with a policy given by name.
///
/// Fails on names other than `"conservative"` and `"aggressive"`.
#[wasm_bindgen(js_name = condenseWithPolicy)]
pub fn condense_with_policy(html: &str, policy: &str) -> Result<String, JsValue> {
    let policy = policy
        .parse::<EmptyBlockPolicy>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(condense_html(html, &Options::new().with_empty_block_policy(policy)))
}
