// ABOUTME: Known-site extraction: ordered selector lookup for one job board's markup.
// ABOUTME: Falls back to the whole body only for profiles that opt in with body_fallback_min.

use scraper::Html;

use crate::dom::text::{element_text, text_len};
use crate::extractors::compiled::get_or_compile;
use crate::extractors::select::first_text_meeting;
use crate::extractors::sites::SiteProfile;
use crate::options::MIN_TEXT_LEN;

/// Extracts raw text for a known site, or an empty string when every selector misses.
pub fn extract_known_site(doc: &Html, profile: &SiteProfile) -> String {
    if let Some(text) = first_text_meeting(doc, &profile.selectors, MIN_TEXT_LEN) {
        return text;
    }

    if let Some(floor) = profile.body_fallback_min {
        if let Some(body) = get_or_compile("body").and_then(|sel| doc.select(&sel).next()) {
            let text = element_text(&body);
            if text_len(&text) > floor {
                tracing::debug!(site = %profile.id, "selectors missed, using body text");
                return text;
            }
        }
    }

    String::new()
}
