// ABOUTME: Selector-based text and attribute lookups over a parsed document.
// ABOUTME: Selectors are tried in order; invalid selectors are skipped rather than failing the lookup.

use scraper::Html;

use crate::dom::text::{element_text, text_len};
use crate::extractors::compiled::get_or_compile;

/// Returns the text of the first element, in selector order, whose text
/// length is at least `min_len`.
///
/// Every match of a selector is checked before moving to the next selector.
pub fn first_text_meeting<S: AsRef<str>>(doc: &Html, selectors: &[S], min_len: usize) -> Option<String> {
    for css in selectors {
        let css = css.as_ref();
        let selector = match get_or_compile(css) {
            Some(s) => s,
            None => continue,
        };
        for element in doc.select(&selector) {
            let text = element_text(&element);
            if text_len(&text) >= min_len {
                tracing::debug!(selector = css, "selector matched");
                return Some(text);
            }
        }
    }
    None
}

/// Returns the trimmed, non-empty values of `attr` on every element matching
/// any of `selectors`, in selector order.
pub fn attr_values<S: AsRef<str>>(doc: &Html, selectors: &[S], attr: &str) -> Vec<String> {
    let mut values = Vec::new();
    for css in selectors {
        let selector = match get_or_compile(css.as_ref()) {
            Some(s) => s,
            None => continue,
        };
        for element in doc.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    values.push(trimmed.to_string());
                }
            }
        }
    }
    values
}
