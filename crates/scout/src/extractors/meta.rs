// ABOUTME: Last-resort extraction from description meta tags.
// ABOUTME: Returns the longest of the description, og:description and twitter:description contents.

use scraper::Html;

use crate::extractors::select::attr_values;

/// Meta tags carrying a page summary, in both `name` and `property` forms.
const META_DESCRIPTION_SELECTORS: &[&str] = &[
    "meta[name='description']",
    "meta[property='description']",
    "meta[property='og:description']",
    "meta[name='og:description']",
    "meta[name='twitter:description']",
    "meta[property='twitter:description']",
];

/// Longest non-empty description meta content, or an empty string.
pub fn meta_description(doc: &Html) -> String {
    attr_values(doc, META_DESCRIPTION_SELECTORS, "content")
        .into_iter()
        .fold(String::new(), |longest, candidate| {
            if candidate.chars().count() > longest.chars().count() {
                candidate
            } else {
                longest
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn longest_description_wins() {
        let doc = Html::parse_document(
            r#"<head>
                <meta name="description" content="Short">
                <meta property="og:description" content="  A somewhat longer summary  ">
                <meta name="twitter:description" content="Medium one">
            </head>"#,
        );
        assert_eq!(meta_description(&doc), "A somewhat longer summary");
    }

    #[test]
    fn property_and_name_twins_are_read() {
        let doc = Html::parse_document(
            r#"<meta name="og:description" content="from name"><meta property="twitter:description" content="x">"#,
        );
        assert_eq!(meta_description(&doc), "from name");
    }

    #[test]
    fn missing_or_blank_is_empty() {
        let doc = Html::parse_document(r#"<meta name="description" content="   ">"#);
        assert_eq!(meta_description(&doc), "");
    }
}
