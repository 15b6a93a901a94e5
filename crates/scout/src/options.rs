// ABOUTME: Configuration for the scout extractor: length limits, ScoringWeights, Options, ExtractorBuilder.
// ABOUTME: ExtractorBuilder provides a fluent API for constructing Extractor instances with custom settings.

use serde::{Deserialize, Serialize};

use crate::engine::Extractor;
use crate::error::ExtractError;
use crate::extractors::compiled::precompile_selectors;
use crate::extractors::loader::load_builtin_sites;
use crate::extractors::sites::SiteTable;

/// Minimum length (in chars) of an accepted job description.
pub const MIN_TEXT_LEN: usize = 200;

/// Maximum length (in chars) of a returned job description.
pub const MAX_TEXT_LEN: usize = 12_000;

/// Containers with more text than this are too large to be a focused posting.
pub const CANDIDATE_MAX_LEN: usize = 25_000;

/// Weights used by the keyword and heuristic container scanners.
///
/// Every magic number of the two scoring functions lives here so the
/// scoring can be tuned and tested without touching the scanners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per distinct job phrase found by the keyword scanner.
    pub keyword_hit: f64,
    /// Points per char of text in the keyword scanner.
    pub keyword_length: f64,
    /// Text length cap applied before `keyword_length`.
    pub keyword_length_cap: usize,
    /// Points per char of text in the heuristic scanner.
    pub heuristic_length: f64,
    /// Text length cap applied before `heuristic_length`.
    pub heuristic_length_cap: usize,
    /// Points per stem occurrence in the heuristic scanner.
    pub heuristic_keyword: f64,
    /// Bonus when a nearby heading reads like a job section.
    pub heading_bonus: f64,
    /// Multiplier applied to the link density ratio.
    pub link_density_penalty: f64,
    /// Penalty per distinct boilerplate phrase.
    pub boilerplate_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_hit: 50.0,
            keyword_length: 0.01,
            keyword_length_cap: 10_000,
            heuristic_length: 0.02,
            heuristic_length_cap: 12_000,
            heuristic_keyword: 20.0,
            heading_bonus: 40.0,
            link_density_penalty: 150.0,
            boilerplate_penalty: 20.0,
        }
    }
}

/// Configuration options for the extractor.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub weights: ScoringWeights,
    /// Replacement site table; the embedded table is used when unset.
    pub sites: Option<SiteTable>,
}

/// Builder for constructing Extractor instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ExtractorBuilder {
    opts: Options,
}

impl ExtractorBuilder {
    /// Create a new ExtractorBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the scoring weights.
    pub fn weights(mut self, weights: ScoringWeights) -> Self {
        self.opts.weights = weights;
        self
    }

    /// Use a custom site table instead of the embedded one.
    pub fn sites(mut self, sites: SiteTable) -> Self {
        self.opts.sites = Some(sites);
        self
    }

    /// Build the Extractor, loading the embedded site table when none was given.
    ///
    /// Warms the selector cache with every known-site selector.
    pub fn build(self) -> Result<Extractor, ExtractError> {
        let sites = match self.opts.sites {
            Some(sites) => sites,
            None => load_builtin_sites()?,
        };
        precompile_selectors(sites.selectors());
        Ok(Extractor::new(self.opts.weights, sites))
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
