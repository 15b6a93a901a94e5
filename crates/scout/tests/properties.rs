// ABOUTME: Property-style tests over the public API: known-site routing, determinism and normalizer bounds.
// ABOUTME: Uses the embedded site table so every shipped job board is exercised.

use jobtailor_scout::{
    extract_job_description, load_builtin_sites, normalize_text, ExtractionRequest, Extractor,
    ScoringWeights, SiteId, MAX_TEXT_LEN, MIN_TEXT_LEN,
};
use pretty_assertions::assert_eq;
use scraper::Html;

fn description() -> String {
    "You will plan, build and support the systems our customers rely on. ".repeat(5)
}

/// Host and matching markup for each shipped job board.
fn known_site_pages() -> Vec<(SiteId, &'static str, String)> {
    let text = description();
    vec![
        (
            SiteId::LinkedIn,
            "https://www.linkedin.com/jobs/view/3900000000",
            format!("<div class='jobs-description__content'>{}</div>", text),
        ),
        (
            SiteId::LinkedIn,
            "https://linkedin.com/jobs/view/1",
            format!("<section><div class='show-more-less-html__markup'>{}</div></section>", text),
        ),
        (
            SiteId::Indeed,
            "https://www.indeed.com/viewjob?jk=abc",
            format!("<div id='jobDescriptionText'>{}</div>", text),
        ),
        (
            SiteId::Indeed,
            "https://ca.indeed.com/viewjob?jk=abc",
            format!("<div class='jobsearch-jobDescriptionText'>{}</div>", text),
        ),
        (
            SiteId::Greenhouse,
            "https://job-boards.greenhouse.io/acme/jobs/1",
            format!("<div class='job__description'>{}</div>", text),
        ),
        (
            SiteId::Lever,
            "https://jobs.lever.co/acme/1",
            format!(
                "<div class='posting-page'><div class='section-wrapper page-full-width'>{}</div></div>",
                text
            ),
        ),
        (
            SiteId::Lever,
            "https://jobs.lever.co/acme/2",
            format!("<div data-qa='job-description'>{}</div>", text),
        ),
        (
            SiteId::Workday,
            "https://acme.wd1.myworkdayjobs.com/en-US/careers/job/1",
            format!("<div data-automation-id='jobPostingDescription'>{}</div>", text),
        ),
        (
            SiteId::Workday,
            "https://acme.wd1.myworkdayjobs.com/en-US/careers/job/2",
            format!("<div id='mainContent'><div role='main'>{}</div></div>", text),
        ),
        (
            SiteId::Glassdoor,
            "https://www.glassdoor.com/job-listing/1",
            format!("<div class='JobDetails_jobDescription__uW_fK'>{}</div>", text),
        ),
        (
            SiteId::Glassdoor,
            "https://www.glassdoor.co.uk/job-listing/2",
            format!("<div id='JobDescriptionContainer'>{}</div>", text),
        ),
    ]
}

#[test]
fn every_known_site_extracts_matching_selector() {
    for (site, url, body) in known_site_pages() {
        let html = format!("<html><body>{}</body></html>", body);
        let response = extract_job_description(&html, url);
        assert!(response.meta.success, "{} failed for {}", site, url);
        assert_eq!(response.meta.source, site.as_str(), "{}", url);
        assert_eq!(response.job_description, description().trim());
    }
}

#[test]
fn every_shipped_site_is_covered() {
    let covered: Vec<SiteId> = known_site_pages().into_iter().map(|(id, _, _)| id).collect();
    for profile in load_builtin_sites().unwrap().profiles() {
        assert!(covered.contains(&profile.id), "{} has no routing test", profile.id);
    }
}

#[test]
fn extraction_is_deterministic() {
    let pages = [
        format!("<article>Responsibilities {}</article>", description()),
        format!("<main>{}</main>", description()),
        format!("<div id='jobDescriptionText'>{}</div>", description()),
        String::from("<p>nothing here</p>"),
    ];
    for (i, page) in pages.iter().enumerate() {
        for url in ["https://careers.example.com/1", "https://www.indeed.com/viewjob"] {
            let first = extract_job_description(page, url);
            let second = extract_job_description(page, url);
            assert_eq!(first, second, "page {} at {}", i, url);
        }
    }
}

#[test]
fn custom_extractor_shares_a_parsed_document() {
    let extractor = Extractor::builder()
        .weights(ScoringWeights {
            heading_bonus: 0.0,
            ..ScoringWeights::default()
        })
        .build()
        .unwrap();
    let doc = Html::parse_document(&format!("<article>{}</article>", description()));
    let a = extractor.extract(&ExtractionRequest::new(&doc, "https://careers.example.com/a"));
    let b = extractor.extract(&ExtractionRequest::new(&doc, "https://careers.example.com/b"));
    assert!(a.success);
    assert_eq!(a, b);
}

#[test]
fn normalizer_output_is_bounded_and_stable() {
    let unit = "Ship features with care.\n\n\n  Review   code.\r\n";
    for repeats in [0, 1, 4, 5, 8, 100, 300, 500, 1_000, 2_000] {
        let raw = unit.repeat(repeats);
        let out = normalize_text(&raw);
        let len = out.chars().count();
        assert!(
            len == 0 || (MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len),
            "{} repeats gave length {}",
            repeats,
            len
        );
        assert_eq!(normalize_text(&out), out, "{} repeats", repeats);
    }
}

#[test]
fn deny_list_lines_are_exact_matches() {
    let raw = format!(
        "Show more\nRead more:\nBack to jobs\nRead more about our engineering blog\n{}",
        description()
    );
    let out = normalize_text(&raw);
    assert!(out.starts_with("Read more about our engineering blog\n"));
    assert!(!out.contains("Show more"));
    assert!(!out.contains("Back to jobs"));
}
