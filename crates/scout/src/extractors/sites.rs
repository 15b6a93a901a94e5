// ABOUTME: Known-site profiles and the hostname router that picks an extraction strategy.
// ABOUTME: Selector lists are data (SiteProfile) so the router stays a pure lookup plus default case.

//! Known job boards and routing.
//!
//! A `SiteTable` is an ordered list of `SiteProfile`s. Routing walks the
//! table and returns the first profile with a host pattern contained in the
//! page's hostname; anything unmatched goes to the generic pipeline.

use serde::{Deserialize, Serialize};

use crate::result::SiteId;

/// Extraction rules for one job board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Identifier reported as the result source.
    pub id: SiteId,
    /// Substrings matched against the lowercased hostname.
    pub hosts: Vec<String>,
    /// CSS selectors tried in order.
    pub selectors: Vec<String>,
    /// When set, the `<body>` text is used if every selector misses and the
    /// body holds more than this many chars.
    #[serde(default)]
    pub body_fallback_min: Option<usize>,
}

impl SiteProfile {
    /// True if any host pattern occurs in `host`.
    pub fn matches_host(&self, host: &str) -> bool {
        self.hosts
            .iter()
            .any(|pattern| !pattern.is_empty() && host.contains(&pattern.to_ascii_lowercase()))
    }
}

/// Strategy chosen for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    KnownSite(&'a SiteProfile),
    Generic,
}

/// Ordered collection of known-site profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteTable {
    profiles: Vec<SiteProfile>,
}

impl SiteTable {
    /// Creates a table from profiles; earlier profiles win on overlapping hosts.
    pub fn new(profiles: Vec<SiteProfile>) -> Self {
        Self { profiles }
    }

    /// Parses a table from its JSON representation (an array of profiles).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Picks the strategy for `host`.
    pub fn route(&self, host: &str) -> Route<'_> {
        let host = host.trim().to_ascii_lowercase();
        self.profiles
            .iter()
            .find(|p| p.matches_host(&host))
            .map_or(Route::Generic, Route::KnownSite)
    }

    /// Looks up a profile by identifier.
    pub fn get(&self, id: SiteId) -> Option<&SiteProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Every selector across all profiles.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.profiles
            .iter()
            .flat_map(|p| p.selectors.iter().map(String::as_str))
    }

    pub fn profiles(&self) -> &[SiteProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SiteTable {
        SiteTable::new(vec![
            SiteProfile {
                id: SiteId::LinkedIn,
                hosts: vec!["linkedin.com".to_string()],
                selectors: vec![".jobs-description".to_string()],
                body_fallback_min: None,
            },
            SiteProfile {
                id: SiteId::Greenhouse,
                hosts: vec!["greenhouse.io".to_string()],
                selectors: vec!["#content".to_string()],
                body_fallback_min: None,
            },
        ])
    }

    #[test]
    fn routes_by_host_substring() {
        let t = table();
        match t.route("www.linkedin.com") {
            Route::KnownSite(p) => assert_eq!(p.id, SiteId::LinkedIn),
            Route::Generic => panic!("expected linkedin"),
        }
        match t.route("boards.greenhouse.io") {
            Route::KnownSite(p) => assert_eq!(p.id, SiteId::Greenhouse),
            Route::Generic => panic!("expected greenhouse"),
        }
    }

    #[test]
    fn routing_is_case_insensitive() {
        assert!(matches!(table().route("WWW.LinkedIn.COM"), Route::KnownSite(_)));
    }

    #[test]
    fn unknown_hosts_route_to_generic() {
        assert_eq!(table().route("careers.example.com"), Route::Generic);
        assert_eq!(table().route(""), Route::Generic);
        assert_eq!(SiteTable::default().route("www.linkedin.com"), Route::Generic);
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let json = serde_json::to_string(&table()).unwrap();
        let parsed = SiteTable::from_json(&json).unwrap();
        assert_eq!(parsed, table());
        assert_eq!(parsed.selectors().collect::<Vec<_>>(), vec![".jobs-description", "#content"]);
    }

    #[test]
    fn get_by_id() {
        let t = table();
        assert!(t.get(SiteId::Greenhouse).is_some());
        assert!(t.get(SiteId::Lever).is_none());
    }
}
