// ABOUTME: Pre-compiled CSS selector cache shared by every extraction stage.
// ABOUTME: Eliminates repeated parsing of known-site and scanner selectors in hot paths.

//! Selector caching for efficient repeated DOM queries.
//!
//! CSS selector parsing is expensive relative to the actual DOM matching.
//! Selectors are compiled once per process and reused by every extraction.
//! Invalid selectors are cached as `None` so a broken site table entry is
//! parsed (and rejected) only once.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `Some(Selector)` if the selector is valid, `None` if invalid.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    // Another thread may have inserted while we were parsing.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Precompiles a batch of selectors into the cache.
///
/// Called when an extractor is built so the site table's selectors are
/// validated and ready before the first page is seen.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    for css in selectors {
        let css = css.as_ref();
        if !cache.contains_key(css) {
            let compiled = Selector::parse(css).ok();
            if compiled.is_none() {
                tracing::warn!(selector = css, "invalid selector in site table");
            }
            cache.insert(css.to_string(), compiled);
        }
    }
}
