// ABOUTME: Main library entry point for the jobtailor scout job-description extractor.
// ABOUTME: Re-exports the public API: Extractor, ExtractionRequest, ExtractionResponse, ExtractError, Options.

//! Scout - pulls the job description out of a job posting page.
//!
//! The page is routed by host: known job boards use their own selectors,
//! everything else goes through JSON-LD, keyword container scan, heuristic
//! container scan and finally the meta description. Accepted text is
//! normalized and bounded in length.
//!
//! # Example
//!
//! ```
//! use jobtailor_scout::extract_job_description;
//!
//! let response = extract_job_description("<html></html>", "https://careers.example.com/1");
//! assert!(response.should_prompt_manual());
//! ```

pub mod dom;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod normalize;
pub mod options;
pub mod result;

pub use crate::engine::{
    default_extractor, extract_job_description, ExtractionRequest, Extractor, GenericStage,
};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::loader::{load_builtin_sites, load_sites_from_str};
pub use crate::extractors::sites::{Route, SiteProfile, SiteTable};
pub use crate::normalize::normalize_text;
pub use crate::options::{
    ExtractorBuilder, Options, ScoringWeights, CANDIDATE_MAX_LEN, MAX_TEXT_LEN, MIN_TEXT_LEN,
};
pub use crate::result::{
    ExtractionResponse, ExtractionResult, ExtractionSource, ResponseMeta, SiteId,
};
