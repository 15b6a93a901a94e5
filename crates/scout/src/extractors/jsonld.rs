// ABOUTME: JSON-LD JobPosting extraction with an explicit worklist walk over the parsed value tree.
// ABOUTME: Malformed scripts are skipped; HTML descriptions are flattened to plain text.

use scraper::Html;
use serde_json::Value;

use crate::dom::text::{fragment_to_text, text_len};
use crate::extractors::compiled::get_or_compile;
use crate::options::MIN_TEXT_LEN;

/// Upper bound on values visited per script.
const MAX_VISITED_NODES: usize = 10_000;

/// A JobPosting node found in structured data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingRecord {
    pub title: Option<String>,
    pub description: String,
}

fn is_ld_json(type_attr: &str) -> bool {
    type_attr
        .split(';')
        .next()
        .map_or(false, |t| t.trim().eq_ignore_ascii_case("application/ld+json"))
}

/// True if `@type` is, or contains, JobPosting (case-insensitive).
fn is_job_posting_type(value: &Value) -> bool {
    match value {
        Value::String(s) => s.to_ascii_lowercase().contains("jobposting"),
        Value::Array(items) => items.iter().any(|v| match v {
            Value::String(s) => s.to_ascii_lowercase().contains("jobposting"),
            _ => false,
        }),
        _ => false,
    }
}

fn description_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

/// Collects every JobPosting record in a parsed JSON-LD value.
///
/// Uses an explicit stack instead of recursion; arrays, `@graph` wrappers
/// and nested objects are all just children on the stack.
pub fn collect_job_postings(root: &Value) -> Vec<JobPostingRecord> {
    let mut found = Vec::new();
    let mut stack: Vec<&Value> = vec![root];
    let mut visited = 0usize;

    while let Some(value) = stack.pop() {
        visited += 1;
        if visited > MAX_VISITED_NODES {
            tracing::debug!("json-ld walk stopped at node limit");
            break;
        }
        match value {
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(map) => {
                if map.get("@type").map_or(false, is_job_posting_type) {
                    if let Some(description) = map.get("description").and_then(description_text) {
                        found.push(JobPostingRecord {
                            title: map.get("title").and_then(Value::as_str).map(str::to_string),
                            description,
                        });
                    }
                }
                let children: Vec<&Value> = map
                    .values()
                    .filter(|v| v.is_array() || v.is_object())
                    .collect();
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }

    found
}

/// Returns the first JobPosting description whose plain text meets the minimum
/// length, or an empty string.
pub fn extract_json_ld(doc: &Html) -> String {
    let scripts = match get_or_compile("script[type]") {
        Some(sel) => sel,
        None => return String::new(),
    };

    for script in doc.select(&scripts) {
        if !script.value().attr("type").map_or(false, is_ld_json) {
            continue;
        }
        let raw = script.text().collect::<String>();
        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed json-ld");
                continue;
            }
        };
        for record in collect_job_postings(&value) {
            let text = fragment_to_text(&record.description);
            let len = text_len(&text);
            if len >= MIN_TEXT_LEN {
                tracing::debug!(title = record.title.as_deref().unwrap_or(""), len, "json-ld job posting");
                return text;
            }
            tracing::debug!(len, "json-ld description below minimum");
        }
    }

    String::new()
}
