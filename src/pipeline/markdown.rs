//! Markdown rendering: heading downgrade plus Markdown → HTML fragment.
//!
//! The heading downgrade is a blunt global text substitution of the literal
//! two-character sequence `"# "`, not a structural parse. Each heading marker
//! therefore shifts exactly one level (`# ` → `## `, `## ` → `### `, …)
//! because only the final hash of a deeper marker starts a `"# "` match.
//! The substitution also hits a standalone `# ` inside a code fence or prose;
//! that quirk is preserved for compatibility with the original tool.

use pulldown_cmark::{html, Options, Parser};

/// Demote every `# ` heading marker one level.
///
/// Pure text transform, identical for enabled inputs to running the original
/// global replacement; disabled callers get the input byte-for-byte.
pub fn downgrade_headings(text: &str) -> String {
    text.replace("# ", "## ")
}

/// Render one document's Markdown to an HTML fragment.
///
/// Applies the heading downgrade first when `downgrade` is set, then parses
/// with GitHub-flavoured extensions (tables, strikethrough, task lists) so
/// documentation written for docsify renders the same constructs here.
pub fn to_html_fragment(text: &str, downgrade: bool) -> String {
    let source;
    let text = if downgrade {
        source = downgrade_headings(text);
        source.as_str()
    } else {
        text
    };

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrade_shifts_each_level_once() {
        let md = "# Title\n## Section\n### Sub\n";
        assert_eq!(downgrade_headings(md), "## Title\n### Section\n#### Sub\n");
    }

    #[test]
    fn downgrade_count_matches_occurrences() {
        let md = "# One\ntext\n# Two\n# Three\n";
        let out = downgrade_headings(md);
        assert_eq!(out.matches("## ").count(), 3);
        assert!(!out.contains("\n# "));
    }

    #[test]
    fn downgrade_hits_code_fences_too() {
        // Documented quirk: the substitution is textual, not structural.
        let md = "```sh\n# a comment\n```\n";
        assert_eq!(downgrade_headings(md), "```sh\n## a comment\n```\n");
    }

    #[test]
    fn disabled_downgrade_keeps_h1() {
        let html = to_html_fragment("# Title\n", false);
        assert!(html.contains("<h1>Title</h1>"), "got: {html}");
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn enabled_downgrade_renders_h2() {
        let html = to_html_fragment("# Hello\n", true);
        assert!(html.contains("<h2>Hello</h2>"), "got: {html}");
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn renders_gfm_tables() {
        let md = "| A | B |\n| --- | --- |\n| 1 | 2 |\n";
        let html = to_html_fragment(md, false);
        assert!(html.contains("<table>"), "got: {html}");
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn renders_images_and_links() {
        let html = to_html_fragment("![logo](assets/logo.png)\n[site](page.md)\n", false);
        assert!(html.contains(r#"<img src="assets/logo.png" alt="logo" />"#), "got: {html}");
        assert!(html.contains(r#"<a href="page.md">site</a>"#));
    }
}
