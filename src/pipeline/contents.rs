//! Table-of-contents resolution: a sidebar Markdown file → ordered document list.
//!
//! The extraction is a deliberately naive text scan, not a Markdown parse:
//! every parenthesized run of conservative path characters counts as a link
//! target. That matches `[label](target)` link syntax but can also match a
//! parenthesized run in prose or inline code. The over-matching is preserved
//! for compatibility with existing sidebar files rather than "fixed" with a
//! structural parser.

use crate::error::Docs2DocxError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Parenthesized run of path characters: letters, digits, `.`, `/`, `_`.
static RE_LINK_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([A-Za-z0-9./_]+)\)").unwrap());

/// Extract every link target from the contents text, in file-appearance
/// order. Duplicates are retained; a document listed twice is assembled
/// twice.
pub fn extract_links(text: &str) -> Vec<String> {
    RE_LINK_TARGET
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Read the contents file and extract the ordered document list.
///
/// A read failure aborts the whole run. Zero matches is not an error: the
/// pipeline simply has no documents to emit beyond any cover fragment.
pub async fn resolve_contents(path: &Path) -> Result<Vec<String>, Docs2DocxError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| {
        Docs2DocxError::ContentsUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let links = extract_links(&text);
    debug!("Resolved {} document references from {}", links.len(), path.display());
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_targets_in_order() {
        let text = "- [Intro](README.md)\n- [Guide](guide/setup.md)\n- [API](api_v2.md)\n";
        assert_eq!(
            extract_links(text),
            vec!["README.md", "guide/setup.md", "api_v2.md"]
        );
    }

    #[test]
    fn duplicates_are_retained() {
        let text = "[A](a.md) [B](b.md) [A again](a.md)";
        assert_eq!(extract_links(text), vec!["a.md", "b.md", "a.md"]);
    }

    #[test]
    fn no_matches_yields_empty_list() {
        assert!(extract_links("just prose, no links").is_empty());
        assert!(extract_links("").is_empty());
    }

    #[test]
    fn over_matches_parenthesized_prose() {
        // Known quirk: any parenthesized path-character run matches, link or not.
        let text = "some prose (aside.or.not) and a real [link](doc.md)";
        assert_eq!(extract_links(text), vec!["aside.or.not", "doc.md"]);
    }

    #[test]
    fn rejects_targets_with_other_characters() {
        // Spaces, hyphens, and URLs with colons fall outside the conservative set.
        assert!(extract_links("[x](has space.md)").is_empty());
        assert!(extract_links("[x](my-doc.md)").is_empty());
        assert!(extract_links("(https://example.com)").is_empty());
    }

    #[tokio::test]
    async fn resolve_missing_file_is_an_error() {
        let err = resolve_contents(Path::new("/nonexistent/_sidebar.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, Docs2DocxError::ContentsUnreadable { .. }));
    }
}
