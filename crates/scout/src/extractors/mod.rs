// ABOUTME: Extraction strategies: known-site selectors and the generic JSON-LD, container and meta stages.
// ABOUTME: Also holds the site table, its loader and the compiled-selector cache.

//! Extraction strategies.
//!
//! Every strategy returns raw text or an empty string; normalization and
//! acceptance happen in the engine.
//!
//! Submodules:
//! - `sites` / `loader`: the known-site table and the embedded JSON it comes from.
//! - `known_site`: ordered selector lookup for one job board.
//! - `jsonld`, `containers`, `meta`: the generic stages.

pub mod compiled;
pub mod containers;
pub mod jsonld;
pub mod known_site;
pub mod loader;
pub mod meta;
pub mod select;
pub mod sites;
