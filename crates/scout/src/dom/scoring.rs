// ABOUTME: Candidate block collection and scoring for the generic container scanners.
// ABOUTME: Computes link density, phrase hits, heading relevance and the keyword/heuristic scores.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html};

use super::filters::{is_hidden_in_tree, is_structural_boilerplate};
use super::text::{element_text, text_len};
use crate::extractors::compiled::get_or_compile;
use crate::options::{ScoringWeights, CANDIDATE_MAX_LEN, MIN_TEXT_LEN};

/// Container elements considered as job description candidates.
const CANDIDATE_SELECTOR: &str = "main, article, section, div";

/// Phrases that mark a container as job content (keyword scanner).
pub const JOB_PHRASES: &[&str] = &[
    "responsibilities",
    "qualifications",
    "requirements",
    "about the role",
    "about the job",
    "what you will do",
    "what you'll do",
    "what we're looking for",
    "who you are",
    "job description",
    "your role",
    "key duties",
];

/// Stems counted by the heuristic scanner; repetition is rewarded.
pub const KEYWORD_STEMS: &[&str] = &[
    "responsibil",
    "requirement",
    "qualif",
    "job description",
    "about the role",
];

/// Phrases that make a heading relevant to a job posting.
pub const HEADING_PHRASES: &[&str] = &[
    "job description",
    "responsibilities",
    "requirements",
    "qualifications",
    "about the role",
    "about the job",
    "the role",
    "position",
];

/// Phrases typical of legal, consent and account chrome.
pub const BOILERPLATE_PHRASES: &[&str] = &[
    "cookie",
    "privacy policy",
    "sign in",
    "log in",
    "subscribe",
    "terms of use",
    "all rights reserved",
    "accept all",
];

fn phrase_matcher(phrases: &[&str]) -> AhoCorasick {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(phrases)
        .unwrap()
}

static JOB_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| phrase_matcher(JOB_PHRASES));
static STEM_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| phrase_matcher(KEYWORD_STEMS));
static HEADING_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| phrase_matcher(HEADING_PHRASES));
static BOILERPLATE_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| phrase_matcher(BOILERPLATE_PHRASES));

/// Number of distinct patterns of `matcher` present in `text`.
fn distinct_hits(matcher: &AhoCorasick, text: &str) -> usize {
    let mut seen = vec![false; matcher.patterns_len()];
    for m in matcher.find_overlapping_iter(text) {
        seen[m.pattern().as_usize()] = true;
    }
    seen.into_iter().filter(|hit| *hit).count()
}

/// Distinct job phrases present in `text`.
pub fn job_phrase_hits(text: &str) -> usize {
    distinct_hits(&JOB_MATCHER, text)
}

/// Distinct boilerplate phrases present in `text`.
pub fn boilerplate_hits(text: &str) -> usize {
    distinct_hits(&BOILERPLATE_MATCHER, text)
}

/// Total occurrences of the keyword stems in `text`.
pub fn stem_occurrences(text: &str) -> usize {
    STEM_MATCHER.find_iter(text).count()
}

/// True if a heading text reads like a job section title.
pub fn is_relevant_heading(text: &str) -> bool {
    HEADING_MATCHER.is_match(text)
}

/// Ratio of visible anchor text to total text, clamped to [0, 1].
pub fn link_density(element: &ElementRef, total_len: usize) -> f64 {
    if total_len == 0 {
        return 0.0;
    }
    let anchors = match get_or_compile("a") {
        Some(sel) => sel,
        None => return 0.0,
    };
    let link_len: usize = element
        .select(&anchors)
        .filter(|a| !is_hidden_in_tree(a))
        .map(|a| text_len(&element_text(&a)))
        .sum();
    (link_len as f64 / total_len as f64).min(1.0)
}

/// True if the first h1-h4 inside the element, or the heading right before it,
/// matches a relevance phrase.
pub fn has_relevant_heading(element: &ElementRef) -> bool {
    if let Some(headings) = get_or_compile("h1, h2, h3, h4") {
        if let Some(heading) = element.select(&headings).next() {
            if is_relevant_heading(&element_text(&heading)) {
                return true;
            }
        }
    }
    let previous = element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .next();
    match previous {
        Some(prev) if matches!(prev.value().name(), "h1" | "h2" | "h3" | "h4") => {
            is_relevant_heading(&element_text(&prev))
        }
        _ => false,
    }
}

/// A container considered by the generic scanners.
#[derive(Debug, Clone)]
pub struct CandidateBlock<'a> {
    pub element: ElementRef<'a>,
    pub text: String,
    pub len: usize,
    pub link_density: f64,
    pub keyword_hits: usize,
    pub stem_count: usize,
    pub boilerplate_hits: usize,
    pub heading_relevant: bool,
    pub score: f64,
}

impl<'a> CandidateBlock<'a> {
    /// Measure an element. Returns None when its text is outside the candidate range.
    pub fn measure(element: ElementRef<'a>) -> Option<Self> {
        let text = element_text(&element);
        let len = text_len(&text);
        if !(MIN_TEXT_LEN..=CANDIDATE_MAX_LEN).contains(&len) {
            return None;
        }
        Some(Self {
            link_density: link_density(&element, len),
            keyword_hits: job_phrase_hits(&text),
            stem_count: stem_occurrences(&text),
            boilerplate_hits: boilerplate_hits(&text),
            heading_relevant: has_relevant_heading(&element),
            element,
            text,
            len,
            score: 0.0,
        })
    }

    fn penalties(&self, w: &ScoringWeights) -> f64 {
        self.link_density * w.link_density_penalty + self.boilerplate_hits as f64 * w.boilerplate_penalty
    }

    /// `hits * 50 + min(len, 10000) * 0.01 - penalties` with default weights.
    pub fn keyword_score(&self, w: &ScoringWeights) -> f64 {
        self.keyword_hits as f64 * w.keyword_hit
            + self.len.min(w.keyword_length_cap) as f64 * w.keyword_length
            - self.penalties(w)
    }

    /// `min(len, 12000) * 0.02 + stems * 20 + heading bonus - penalties` with default weights.
    pub fn heuristic_score(&self, w: &ScoringWeights) -> f64 {
        let heading = if self.heading_relevant {
            w.heading_bonus
        } else {
            0.0
        };
        self.len.min(w.heuristic_length_cap) as f64 * w.heuristic_length
            + self.stem_count as f64 * w.heuristic_keyword
            + heading
            - self.penalties(w)
    }
}

/// Collect visible, non-boilerplate containers whose text length is in range,
/// in document order.
pub fn collect_candidates(doc: &Html) -> Vec<CandidateBlock<'_>> {
    let selector = match get_or_compile(CANDIDATE_SELECTOR) {
        Some(sel) => sel,
        None => return Vec::new(),
    };
    doc.select(&selector)
        .filter(|el| !is_structural_boilerplate(el))
        .filter(|el| !is_hidden_in_tree(el))
        .filter_map(CandidateBlock::measure)
        .collect()
}

/// Index of the highest-scoring block; the first one wins ties.
pub fn best_index(blocks: &[CandidateBlock<'_>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, block) in blocks.iter().enumerate() {
        match best {
            Some((_, score)) if block.score <= score => {}
            _ => best = Some((i, block.score)),
        }
    }
    best.map(|(i, _)| i)
}
