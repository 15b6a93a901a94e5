// ABOUTME: Loader for the known-site table from embedded JSON data.
// ABOUTME: Provides load_builtin_sites() and load_sites_from_str() for replacement tables.

use crate::error::ExtractError;
use crate::extractors::sites::SiteTable;

/// Embedded JSON describing the built-in job boards.
const BUILTIN_SITES_JSON: &str = include_str!("../../data/known_sites.json");

/// Parses a site table from JSON text.
pub fn load_sites_from_str(json: &str) -> Result<SiteTable, ExtractError> {
    SiteTable::from_json(json).map_err(|e| {
        ExtractError::site_table("load_sites", Some(anyhow::Error::new(e)))
    })
}

/// Loads the built-in site table.
pub fn load_builtin_sites() -> Result<SiteTable, ExtractError> {
    load_sites_from_str(BUILTIN_SITES_JSON)
}
