// ABOUTME: Layout-aware text rendering for DOM subtrees and HTML fragments.
// ABOUTME: Emits newlines at <br> and block boundaries, collapses inline whitespace, skips hidden subtrees.

use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node};

use super::filters::is_hidden;

/// Tags whose content never renders as text.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "svg", "iframe", "object",
];

/// Block-level tags that break lines when rendering a live page region.
pub const LAYOUT_BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

/// Block-level tags honoured when flattening a JSON-LD description.
pub const DESCRIPTION_BLOCK_TAGS: &[&str] = &["p", "li", "h1", "h2", "h3", "h4", "h5", "h6"];

/// How block elements break lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A live page region: blocks break before and after.
    Page,
    /// An HTML description: only `<br>` and the end of a block break.
    Description,
}

impl Layout {
    fn block_tags(&self) -> &'static [&'static str] {
        match self {
            Layout::Page => LAYOUT_BLOCK_TAGS,
            Layout::Description => DESCRIPTION_BLOCK_TAGS,
        }
    }

    fn breaks_on_open(&self) -> bool {
        matches!(self, Layout::Page)
    }
}

fn push_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    let mut last_space = out.ends_with(' ') || out.ends_with('\n') || out.is_empty();
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
}

/// Render the text under `root`, breaking lines at block tags and `<br>`.
///
/// Walks the subtree with `traverse()` so deeply nested pages never recurse.
/// Script-like and hidden descendants are skipped; `<pre>` keeps its whitespace.
pub fn render_text(root: NodeRef<'_, Node>, layout: Layout) -> String {
    let block_tags = layout.block_tags();
    let mut out = String::new();
    let mut skipping: Option<NodeId> = None;
    let mut pre_depth = 0usize;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => {
                if skipping.is_some() {
                    continue;
                }
                match node.value() {
                    Node::Text(text) => {
                        if pre_depth > 0 {
                            out.push_str(text);
                        } else {
                            push_collapsed(&mut out, text);
                        }
                    }
                    Node::Element(el) => {
                        let name = el.name();
                        if node.id() != root.id() {
                            let hidden = ElementRef::wrap(node).map_or(false, |e| is_hidden(&e));
                            if hidden || SKIP_TAGS.contains(&name) {
                                skipping = Some(node.id());
                                continue;
                            }
                        }
                        if name == "br" {
                            out.push('\n');
                        } else if layout.breaks_on_open() && block_tags.contains(&name) {
                            push_break(&mut out);
                        }
                        if name == "pre" {
                            pre_depth += 1;
                        }
                    }
                    _ => {}
                }
            }
            Edge::Close(node) => {
                if let Some(id) = skipping {
                    if id == node.id() {
                        skipping = None;
                    }
                    continue;
                }
                if let Node::Element(el) = node.value() {
                    let name = el.name();
                    if name == "pre" {
                        pre_depth = pre_depth.saturating_sub(1);
                    }
                    if block_tags.contains(&name) {
                        push_break(&mut out);
                    }
                }
            }
        }
    }

    out
}

/// Visible text of an element as a reader would see it.
pub fn element_text(element: &ElementRef) -> String {
    render_text(**element, Layout::Page)
}

/// Length in chars of trimmed text.
pub fn text_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Convert an HTML description (as found in JSON-LD) to trimmed plain text.
///
/// Descriptions that arrive entity-escaped (`&lt;p&gt;...`) are decoded once
/// more so their markup is interpreted instead of leaking into the text.
pub fn fragment_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = render_text(*fragment.root_element(), Layout::Description);
    if html.contains("&lt;") && !html.contains('<') {
        let decoded = Html::parse_fragment(&text);
        return render_text(*decoded.root_element(), Layout::Description)
            .trim()
            .to_string();
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::Selector;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn fragment_breaks_after_blocks_and_br() {
        let text = fragment_to_text("<p>We need a cook.</p><ul><li>Knives</li><li>Pans</li></ul>Line<br>Next");
        assert_eq!(text, "We need a cook.\nKnives\nPans\nLine\nNext");
    }

    #[test]
    fn fragment_blocks_break_only_after() {
        assert_eq!(fragment_to_text("Intro text<p>x</p>y"), "Intro textx\ny");
    }

    #[test]
    fn page_blocks_break_before_and_after() {
        let doc = Html::parse_document("<div>Intro text<p>x</p>y</div>");
        let el = first(&doc, "div");
        assert_eq!(element_text(&el).trim(), "Intro text\nx\ny");
    }

    #[test]
    fn fragment_decodes_escaped_markup() {
        let text = fragment_to_text("&lt;p&gt;Hello&lt;/p&gt;&lt;p&gt;World&lt;/p&gt;");
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn fragment_plain_text_passes_through() {
        assert_eq!(fragment_to_text("  just text  "), "just text");
    }

    #[test]
    fn element_text_collapses_source_whitespace() {
        let doc = Html::parse_document("<div><p>We are\n      hiring   now</p></div>");
        let el = first(&doc, "div");
        assert_eq!(element_text(&el).trim(), "We are hiring now");
    }

    #[test]
    fn element_text_skips_scripts_and_hidden() {
        let doc = Html::parse_document(
            r#"<div>Visible<script>var x = 1;</script><span style="display: none">Secret</span><p hidden>Gone</p></div>"#,
        );
        let el = first(&doc, "div");
        assert_eq!(element_text(&el).trim(), "Visible");
    }

    #[test]
    fn element_text_keeps_pre_whitespace() {
        let doc = Html::parse_document("<div><pre>a  b\nc</pre></div>");
        let el = first(&doc, "div");
        assert_eq!(element_text(&el).trim(), "a  b\nc");
    }

    #[test]
    fn text_len_counts_chars_not_bytes() {
        assert_eq!(text_len("  héllo "), 5);
    }
}
