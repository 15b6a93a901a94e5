// ABOUTME: ExtractionResult and the boundary ExtractionResponse returned to the extension host.
// ABOUTME: Defines SiteId and ExtractionSource identifiers and their wire names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a job board with a dedicated extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    LinkedIn,
    Indeed,
    Greenhouse,
    Lever,
    Workday,
    Glassdoor,
}

impl SiteId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteId::LinkedIn => "linkedin",
            SiteId::Indeed => "indeed",
            SiteId::Greenhouse => "greenhouse",
            SiteId::Lever => "lever",
            SiteId::Workday => "workday",
            SiteId::Glassdoor => "glassdoor",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced (or failed to produce) the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    KnownSite(SiteId),
    Organic,
    None,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::KnownSite(site) => site.as_str(),
            ExtractionSource::Organic => "organic",
            ExtractionSource::None => "none",
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
    pub success: bool,
    pub source: ExtractionSource,
    pub needs_manual: bool,
}

impl ExtractionResult {
    /// A successful extraction. `text` must already be normalized.
    pub fn found(text: String, source: ExtractionSource) -> Self {
        Self {
            text,
            success: true,
            source,
            needs_manual: false,
        }
    }

    /// A known site whose selectors missed: empty text, no manual prompt.
    pub fn known_site_miss(site: SiteId) -> Self {
        Self {
            text: String::new(),
            success: false,
            source: ExtractionSource::KnownSite(site),
            needs_manual: false,
        }
    }

    /// Every generic stage failed: the user has to paste the posting.
    pub fn manual_required() -> Self {
        Self {
            text: String::new(),
            success: false,
            source: ExtractionSource::None,
            needs_manual: true,
        }
    }
}

/// Metadata block of the boundary response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub success: bool,
    pub source: String,
    pub needs_manual: bool,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The message sent back to the extension for an "extract job description" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub job_description: String,
    pub meta: ResponseMeta,
}

impl ExtractionResponse {
    /// Wrap an extraction result for the page at `url`.
    pub fn from_result(result: ExtractionResult, url: &str) -> Self {
        Self {
            meta: ResponseMeta {
                success: result.success,
                source: result.source.as_str().to_string(),
                needs_manual: result.needs_manual,
                url: url.to_string(),
                error: None,
            },
            job_description: result.text,
        }
    }

    /// Report an unexpected failure. Always asks for manual entry.
    pub fn from_error(message: impl Into<String>, url: &str) -> Self {
        Self {
            job_description: String::new(),
            meta: ResponseMeta {
                success: false,
                source: ExtractionSource::None.as_str().to_string(),
                needs_manual: true,
                url: url.to_string(),
                error: Some(message.into()),
            },
        }
    }

    /// Empty description with `needsManual` set: prompt the user to paste it.
    pub fn should_prompt_manual(&self) -> bool {
        self.job_description.is_empty() && self.meta.needs_manual
    }

    /// Empty description on a known site: the selectors are probably stale.
    pub fn selectors_stale(&self) -> bool {
        self.job_description.is_empty() && !self.meta.success && !self.meta.needs_manual
    }
}
