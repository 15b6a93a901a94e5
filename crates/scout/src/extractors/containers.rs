// ABOUTME: Generic container scanners: keyword-weighted scan and heuristic main-content scan.
// ABOUTME: Both score the same candidate blocks and return the best block's text or an empty string.

use scraper::Html;

use crate::dom::filters::is_hidden_in_tree;
use crate::dom::scoring::{best_index, collect_candidates, CandidateBlock};
use crate::dom::text::element_text;
use crate::extractors::compiled::get_or_compile;
use crate::options::ScoringWeights;

/// Picks the container with the most job phrases, weighted by length and
/// penalised for links and boilerplate. Blocks without any job phrase are
/// never chosen.
pub fn keyword_scan(doc: &Html, weights: &ScoringWeights) -> String {
    let mut blocks: Vec<CandidateBlock<'_>> = collect_candidates(doc)
        .into_iter()
        .filter(|b| b.keyword_hits > 0)
        .collect();
    for block in blocks.iter_mut() {
        block.score = block.keyword_score(weights);
    }

    match best_index(&blocks) {
        Some(i) => {
            let best = &blocks[i];
            tracing::debug!(
                tag = best.element.value().name(),
                hits = best.keyword_hits,
                score = best.score,
                candidates = blocks.len(),
                "keyword scan picked container"
            );
            best.text.clone()
        }
        None => String::new(),
    }
}

/// Picks the container that looks most like main content. Only positive
/// scores count; otherwise the first `main` landmark is used.
pub fn heuristic_scan(doc: &Html, weights: &ScoringWeights) -> String {
    let mut blocks = collect_candidates(doc);
    for block in blocks.iter_mut() {
        block.score = block.heuristic_score(weights);
    }

    if let Some(i) = best_index(&blocks) {
        let best = &blocks[i];
        if best.score > 0.0 {
            tracing::debug!(
                tag = best.element.value().name(),
                score = best.score,
                candidates = blocks.len(),
                "heuristic scan picked container"
            );
            return best.text.clone();
        }
    }

    main_landmark_text(doc)
}

fn main_landmark_text(doc: &Html) -> String {
    let selector = match get_or_compile("main, [role='main']") {
        Some(sel) => sel,
        None => return String::new(),
    };
    doc.select(&selector)
        .find(|el| !is_hidden_in_tree(el))
        .map(|el| element_text(&el))
        .unwrap_or_default()
}
