// ABOUTME: The extraction pipeline: route by host, run the known-site extractor or the generic stage chain.
// ABOUTME: Exposes Extractor, ExtractionRequest and the process-wide extract_job_description entry point.

use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::OnceCell;
use scraper::Html;

use crate::error::ExtractError;
use crate::extractors::containers::{heuristic_scan, keyword_scan};
use crate::extractors::jsonld::extract_json_ld;
use crate::extractors::known_site::extract_known_site;
use crate::extractors::meta::meta_description;
use crate::extractors::sites::{Route, SiteTable};
use crate::normalize::normalize_text;
use crate::options::{ExtractorBuilder, ScoringWeights};
use crate::result::{ExtractionResponse, ExtractionResult, ExtractionSource};

/// One "extract job description" request: a parsed page and its URL.
#[derive(Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub document: &'a Html,
    pub url: &'a str,
}

impl<'a> ExtractionRequest<'a> {
    pub fn new(document: &'a Html, url: &'a str) -> Self {
        Self { document, url }
    }
}

/// Stages of the generic chain, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericStage {
    JsonLd,
    KeywordScan,
    HeuristicScan,
    Meta,
}

impl GenericStage {
    pub const ORDER: [GenericStage; 4] = [
        GenericStage::JsonLd,
        GenericStage::KeywordScan,
        GenericStage::HeuristicScan,
        GenericStage::Meta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenericStage::JsonLd => "json_ld",
            GenericStage::KeywordScan => "keyword_scan",
            GenericStage::HeuristicScan => "heuristic_scan",
            GenericStage::Meta => "meta",
        }
    }

    /// Raw, unnormalized output of the stage.
    fn run(&self, doc: &Html, weights: &ScoringWeights) -> String {
        match self {
            GenericStage::JsonLd => extract_json_ld(doc),
            GenericStage::KeywordScan => keyword_scan(doc, weights),
            GenericStage::HeuristicScan => heuristic_scan(doc, weights),
            GenericStage::Meta => meta_description(doc),
        }
    }
}

/// The job description extractor. Immutable after construction and safe to share.
#[derive(Debug, Clone)]
pub struct Extractor {
    weights: ScoringWeights,
    sites: SiteTable,
}

impl Extractor {
    /// Create a new ExtractorBuilder for configuring the extractor.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Create an Extractor from already loaded parts.
    pub fn new(weights: ScoringWeights, sites: SiteTable) -> Self {
        Self { weights, sites }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn sites(&self) -> &SiteTable {
        &self.sites
    }

    /// Run the pipeline for one request.
    ///
    /// Misses and below-threshold text are ordinary results. Only a URL
    /// that fails to parse is an error.
    pub fn try_extract(&self, req: &ExtractionRequest<'_>) -> Result<ExtractionResult, ExtractError> {
        let parsed = url::Url::parse(req.url).map_err(|e| {
            ExtractError::invalid_url(req.url, "extract", Some(anyhow::Error::new(e)))
        })?;
        // file:, data: and similar URLs have no host and go to the generic chain.
        let host = parsed.host_str().map(|h| h.to_lowercase()).unwrap_or_default();

        match self.sites.route(&host) {
            Route::KnownSite(profile) => {
                tracing::debug!(host = %host, site = %profile.id, "routed to known site");
                let text = normalize_text(&extract_known_site(req.document, profile));
                if text.is_empty() {
                    tracing::warn!(site = %profile.id, url = req.url, "known-site selectors found no description");
                    return Ok(ExtractionResult::known_site_miss(profile.id));
                }
                tracing::info!(site = %profile.id, len = text.chars().count(), "extracted job description");
                Ok(ExtractionResult::found(text, ExtractionSource::KnownSite(profile.id)))
            }
            Route::Generic => {
                tracing::debug!(host = %host, "routed to generic extraction");
                Ok(self.run_generic(req.document))
            }
        }
    }

    fn run_generic(&self, doc: &Html) -> ExtractionResult {
        for stage in GenericStage::ORDER {
            let text = normalize_text(&stage.run(doc, &self.weights));
            if !text.is_empty() {
                tracing::info!(stage = stage.as_str(), len = text.chars().count(), "extracted job description");
                return ExtractionResult::found(text, ExtractionSource::Organic);
            }
            tracing::debug!(stage = stage.as_str(), "stage found nothing usable");
        }
        tracing::warn!("no job description found, manual entry needed");
        ExtractionResult::manual_required()
    }

    /// Like `try_extract`, with errors turned into a manual-entry result.
    pub fn extract(&self, req: &ExtractionRequest<'_>) -> ExtractionResult {
        match self.try_extract(req) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "extraction failed");
                ExtractionResult::manual_required()
            }
        }
    }

    /// Answer a request with the boundary response.
    ///
    /// Errors and panics from any stage are reported in `meta.error`.
    pub fn respond(&self, req: &ExtractionRequest<'_>) -> ExtractionResponse {
        match catch_unwind(AssertUnwindSafe(|| self.try_extract(req))) {
            Ok(Ok(result)) => ExtractionResponse::from_result(result, req.url),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "extraction failed");
                ExtractionResponse::from_error(e.to_string(), req.url)
            }
            Err(panic) => {
                let e = ExtractError::internal(req.url, "extract", Some(anyhow::anyhow!(panic_message(&*panic))));
                tracing::warn!(error = %e, "extraction panicked");
                ExtractionResponse::from_error(e.to_string(), req.url)
            }
        }
    }

    /// Parse `html` and answer the request for `url`.
    pub fn respond_html(&self, html: &str, url: &str) -> ExtractionResponse {
        let doc = match catch_unwind(|| Html::parse_document(html)) {
            Ok(doc) => doc,
            Err(panic) => {
                let e = ExtractError::internal(url, "parse_html", Some(anyhow::anyhow!(panic_message(&*panic))));
                return ExtractionResponse::from_error(e.to_string(), url);
            }
        };
        self.respond(&ExtractionRequest::new(&doc, url))
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

static DEFAULT_EXTRACTOR: OnceCell<Extractor> = OnceCell::new();

/// The extractor with built-in sites and default weights, built on first use.
pub fn default_extractor() -> Result<&'static Extractor, ExtractError> {
    DEFAULT_EXTRACTOR.get_or_try_init(|| ExtractorBuilder::new().build())
}

/// Extract the job description from a page's HTML using the default extractor.
pub fn extract_job_description(html: &str, url: &str) -> ExtractionResponse {
    match default_extractor() {
        Ok(extractor) => extractor.respond_html(html, url),
        Err(e) => ExtractionResponse::from_error(e.to_string(), url),
    }
}
