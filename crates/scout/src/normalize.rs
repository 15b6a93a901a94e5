// ABOUTME: Text normalizer applied to every stage's raw output before it is accepted.
// ABOUTME: Cleans whitespace, drops standalone UI labels, truncates to the maximum and enforces the minimum.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::{MAX_TEXT_LEN, MIN_TEXT_LEN};

// Standalone UI labels that are never part of a posting.
const DENY_LINES: &[&str] = &[
    "about us",
    "our mission",
    "share this job",
    "apply now",
    "save job",
    "back to jobs",
    "show more",
    "show less",
    "see more",
    "read more",
];

// Lines at least this long are never treated as labels.
const DENY_LINE_MAX_LEN: usize = 40;

// Where the posting proper starts in an oversized text.
const TRUNCATION_MARKERS: &[&str] = &[
    "job description",
    "responsibilities",
    "requirements",
    "qualifications",
];

static BLANK_RUNS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static MARKER_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(TRUNCATION_MARKERS)
        .unwrap()
});

fn is_deny_line(line: &str) -> bool {
    if line.chars().count() >= DENY_LINE_MAX_LEN {
        return false;
    }
    let lowered = line.to_lowercase();
    let label = lowered.strip_suffix(':').unwrap_or(&lowered).trim_end();
    DENY_LINES.contains(&label)
}

/// Whitespace and label cleanup without length rules.
fn clean(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !is_deny_line(line))
        .collect();
    BLANK_RUNS_RE
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Cuts an oversized text down to `MAX_TEXT_LEN` chars, starting at the first
/// job-content marker when that leaves enough text.
fn truncate(text: &str) -> &str {
    if let Some(m) = MARKER_MATCHER.find(text) {
        let from_marker = take_chars(&text[m.start()..], MAX_TEXT_LEN);
        if from_marker.trim().chars().count() >= MIN_TEXT_LEN {
            return from_marker;
        }
    }
    take_chars(text, MAX_TEXT_LEN)
}

/// Normalizes extracted text.
///
/// Returns an empty string when the cleaned text is shorter than
/// `MIN_TEXT_LEN`. Output is never longer than `MAX_TEXT_LEN` chars and
/// normalizing it again returns it unchanged.
pub fn normalize_text(raw: &str) -> String {
    let mut text = clean(raw);
    if text.chars().count() > MAX_TEXT_LEN {
        text = clean(truncate(&text));
    }
    if text.chars().count() < MIN_TEXT_LEN {
        return String::new();
    }
    text
}
