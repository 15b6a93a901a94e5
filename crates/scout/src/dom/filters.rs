// ABOUTME: Candidate filters for container scanning: hidden-element and structural boilerplate detection.
// ABOUTME: Works from markup only (inline styles, hidden/aria attributes, tags, roles, id/class hints).

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

/// Tags that hold page chrome rather than content.
const STRUCTURAL_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Landmark roles equivalent to the structural tags.
const STRUCTURAL_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary"];

static BOILERPLATE_HINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)nav|footer|sidebar|menu|cookie|consent|subscribe").unwrap());

static HIDDEN_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(?:display\s*:\s*none|visibility\s*:\s*hidden|opacity\s*:\s*0(?:\.0*)?\s*(?:!important)?\s*(?:;|$))")
        .unwrap()
});

/// True if the element itself is hidden by markup.
pub fn is_hidden(element: &ElementRef) -> bool {
    let el = element.value();
    if el.attr("hidden").is_some() {
        return true;
    }
    if el
        .attr("aria-hidden")
        .map_or(false, |v| v.trim().eq_ignore_ascii_case("true"))
    {
        return true;
    }
    el.attr("style")
        .map_or(false, |style| HIDDEN_STYLE_RE.is_match(style))
}

/// True if the element or any ancestor is hidden.
pub fn is_hidden_in_tree(element: &ElementRef) -> bool {
    if is_hidden(element) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_hidden(&ancestor))
}

fn has_boilerplate_hint(element: &ElementRef) -> bool {
    let el = element.value();
    let id = el.attr("id").unwrap_or("");
    let class = el.attr("class").unwrap_or("");
    (!id.is_empty() && BOILERPLATE_HINTS_RE.is_match(id))
        || (!class.is_empty() && BOILERPLATE_HINTS_RE.is_match(class))
}

fn is_structural(element: &ElementRef) -> bool {
    let el = element.value();
    if STRUCTURAL_TAGS.contains(&el.name()) {
        return true;
    }
    el.attr("role").map_or(false, |role| {
        let role = role.trim().to_ascii_lowercase();
        STRUCTURAL_ROLES.contains(&role.as_str())
    })
}

/// True if the element is navigation, header, footer, sidebar or similar chrome,
/// or sits inside a structural tag.
pub fn is_structural_boilerplate(element: &ElementRef) -> bool {
    if is_structural(element) || has_boilerplate_hint(element) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_structural(&ancestor))
}
