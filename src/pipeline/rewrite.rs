//! Structural HTML rewriting: embed images, downscale oversized ones, and
//! border tables.
//!
//! ## Why rewrite at all?
//!
//! The docx converter renders the HTML exactly as given, with two gaps:
//!
//! - Image references stay file-system paths, which a shipped `.docx` cannot
//!   resolve. Every `<img>` must carry its bytes inline as a data URI, and
//!   anything wider than the printable page must be scaled down to fit.
//! - Tables come out borderless, so data tables become visually unreadable.
//!   Explicit `border`/`cellspacing`/`cellpadding` attributes fix that.
//!
//! The rewriting operates on the serialized fragment with anchored tag
//! patterns rather than a full DOM round-trip: the fragments come from our
//! own Markdown renderer (plus occasional raw `<img>`/`<table>` tags authors
//! paste into documents), so opening tags are well-formed and attribute
//! surgery on the tag text is exact. Raw tags are accepted in any case and
//! attribute quoting style. Images are processed one at a time:
//! output order must match document order and exactly one read or probe is
//! in flight across the whole pipeline.

use crate::error::Docs2DocxError;
use crate::pipeline::inline;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

static RE_IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());
static RE_TABLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table\b[^>]*>").unwrap());

/// One `name=value` pair inside an opening tag: double-quoted, single-quoted,
/// or unquoted, per the HTML attribute-value grammar.
static RE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Counters for one fragment's rewrite pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteStats {
    /// Images whose `src` became a data URI.
    pub images_inlined: usize,
    /// Images that exceeded the maximum width and were downscaled.
    pub images_resized: usize,
    /// Tables that received border attributes.
    pub tables_bordered: usize,
}

/// Rewrite one document's HTML fragment: inline every image (downscaling
/// where needed) and border every table.
///
/// Any image read or probe failure aborts the run; there is no per-image
/// skip-and-continue.
pub async fn rewrite_fragment(
    html: &str,
    root: &Path,
    img_max_width: u32,
) -> Result<(String, RewriteStats), Docs2DocxError> {
    let mut stats = RewriteStats::default();
    let html = embed_images(html, root, img_max_width, &mut stats).await?;
    let html = border_tables(&html, &mut stats);
    Ok((html, stats))
}

// ── Image embedding ──────────────────────────────────────────────────────

async fn embed_images(
    html: &str,
    root: &Path,
    img_max_width: u32,
    stats: &mut RewriteStats,
) -> Result<String, Docs2DocxError> {
    let ranges: Vec<(usize, usize)> = RE_IMG_TAG
        .find_iter(html)
        .map(|m| (m.start(), m.end()))
        .collect();
    if ranges.is_empty() {
        return Ok(html.to_string());
    }

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for (start, end) in ranges {
        out.push_str(&html[last..start]);
        let rewritten = rewrite_img_tag(&html[start..end], root, img_max_width, stats).await?;
        out.push_str(&rewritten);
        last = end;
    }
    out.push_str(&html[last..]);
    Ok(out)
}

async fn rewrite_img_tag(
    tag: &str,
    root: &Path,
    img_max_width: u32,
    stats: &mut RewriteStats,
) -> Result<String, Docs2DocxError> {
    let Some(src) = get_attr(tag, "src") else {
        return Ok(tag.to_string());
    };
    // Already-embedded sources pass through untouched.
    if src.starts_with("data:") {
        return Ok(tag.to_string());
    }

    let decoded = percent_decode_str(src).decode_utf8_lossy().into_owned();
    let path = resolve_image_path(root, &decoded);

    let bytes =
        tokio::fs::read(&path)
            .await
            .map_err(|source| Docs2DocxError::ImageUnreadable {
                path: path.clone(),
                source,
            })?;
    let (width, height) = probe_dimensions(&bytes, &path)?;
    debug!("Image {} is {}x{}", path.display(), width, height);

    let mut tag = tag.to_string();
    if width > img_max_width {
        // Preserve aspect ratio, always rounding down.
        let scaled = (height as u64 * img_max_width as u64 / width as u64) as u32;
        tag = set_attr(&tag, "width", &img_max_width.to_string());
        tag = set_attr(&tag, "height", &scaled.to_string());
        stats.images_resized += 1;
    }
    tag = set_attr(&tag, "src", &inline::to_data_uri(&bytes));
    stats.images_inlined += 1;
    Ok(tag)
}

/// Resolve a (decoded) `src` against the document root.
///
/// An absolute `src` replaces the root entirely, matching path-resolution
/// semantics of the original tool. The string fix-up collapses the doubled
/// `docs/docs/assets` segment produced when authors paste raw `<img>` tags
/// with site-absolute paths into documents that already live under `docs/`.
/// Only the first occurrence is collapsed.
fn resolve_image_path(root: &Path, src: &str) -> PathBuf {
    let joined = root.join(src);
    let fixed = joined
        .to_string_lossy()
        .replacen("docs/docs/assets", "docs/assets", 1);
    PathBuf::from(fixed)
}

/// Probe natural pixel dimensions from the image header without decoding
/// pixel data.
fn probe_dimensions(bytes: &[u8], path: &Path) -> Result<(u32, u32), Docs2DocxError> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Docs2DocxError::ImageProbeFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| Docs2DocxError::ImageProbeFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
}

// ── Table borders ────────────────────────────────────────────────────────

/// Set `border="1" cellspacing="0" cellpadding="0"` on every `<table>`
/// opening tag. The converter otherwise renders tables without any visible
/// grid.
fn border_tables(html: &str, stats: &mut RewriteStats) -> String {
    let mut out = String::with_capacity(html.len() + 64);
    let mut last = 0;
    for m in RE_TABLE_TAG.find_iter(html) {
        out.push_str(&html[last..m.start()]);
        let mut tag = set_attr(m.as_str(), "border", "1");
        tag = set_attr(&tag, "cellspacing", "0");
        tag = set_attr(&tag, "cellpadding", "0");
        out.push_str(&tag);
        stats.tables_bordered += 1;
        last = m.end();
    }
    out.push_str(&html[last..]);
    out
}

// ── Attribute surgery ────────────────────────────────────────────────────

/// Read an attribute value from an opening tag.
///
/// Authors paste raw HTML in every quoting style, so double-quoted,
/// single-quoted, and unquoted values all resolve, and the attribute name
/// matches case-insensitively.
fn get_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    for caps in RE_ATTR.captures_iter(tag) {
        if caps[1].eq_ignore_ascii_case(name) {
            return caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str());
        }
    }
    None
}

/// Set an attribute on an opening tag, replacing an existing pair or
/// appending before the closing delimiter.
///
/// An existing pair is rewritten whole, so single-quoted and unquoted
/// sources come out normalized to the double-quoted form (a data URI
/// contains `=` and `;`, which an unquoted value cannot carry).
fn set_attr(tag: &str, name: &str, value: &str) -> String {
    for caps in RE_ATTR.captures_iter(tag) {
        if caps[1].eq_ignore_ascii_case(name) {
            if let Some(m) = caps.get(0) {
                return format!("{}{name}=\"{value}\"{}", &tag[..m.start()], &tag[m.end()..]);
            }
        }
    }
    let (head, tail) = if let Some(p) = tag.rfind("/>") {
        (tag[..p].trim_end(), " />")
    } else if let Some(p) = tag.rfind('>') {
        (tag[..p].trim_end(), ">")
    } else {
        (tag, "")
    };
    format!("{head} {name}=\"{value}\"{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .save_with_format(&path, ImageFormat::Png)
            .expect("write test png");
        path
    }

    #[test]
    fn get_attr_reads_quoted_values() {
        let tag = r#"<img src="a.png" alt="logo" />"#;
        assert_eq!(get_attr(tag, "src"), Some("a.png"));
        assert_eq!(get_attr(tag, "alt"), Some("logo"));
        assert_eq!(get_attr(tag, "width"), None);
    }

    #[test]
    fn get_attr_reads_single_quoted_and_unquoted_values() {
        assert_eq!(get_attr("<img src='a.png'>", "src"), Some("a.png"));
        assert_eq!(get_attr("<img src=a.png alt=x>", "src"), Some("a.png"));
        assert_eq!(get_attr("<IMG SRC='a.png'>", "src"), Some("a.png"));
    }

    #[test]
    fn get_attr_does_not_match_name_suffixes() {
        assert_eq!(get_attr(r#"<img data-src="lazy.png">"#, "src"), None);
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let tag = set_attr(r#"<img src="a.png" alt="x" />"#, "src", "b.png");
        assert_eq!(tag, r#"<img src="b.png" alt="x" />"#);
    }

    #[test]
    fn set_attr_normalizes_quoting_style() {
        assert_eq!(
            set_attr("<img src='a.png'>", "src", "b.png"),
            r#"<img src="b.png">"#
        );
        assert_eq!(
            set_attr("<img src=a.png alt=x>", "src", "b.png"),
            r#"<img src="b.png" alt=x>"#
        );
        assert_eq!(
            set_attr("<IMG SRC='a.png'>", "src", "b.png"),
            r#"<IMG src="b.png">"#
        );
    }

    #[test]
    fn set_attr_appends_when_missing() {
        assert_eq!(
            set_attr(r#"<img src="a.png" />"#, "width", "468"),
            r#"<img src="a.png" width="468" />"#
        );
        assert_eq!(set_attr("<table>", "border", "1"), r#"<table border="1">"#);
    }

    #[test]
    fn resolve_collapses_doubled_assets_segment() {
        let p = resolve_image_path(Path::new("./docs"), "docs/assets/logo.png");
        assert_eq!(p, PathBuf::from("./docs/assets/logo.png"));
    }

    #[test]
    fn resolve_collapses_only_the_first_occurrence() {
        let p = resolve_image_path(Path::new("docs"), "docs/assets/sub/docs/docs/assets/logo.png");
        assert_eq!(
            p,
            PathBuf::from("docs/assets/sub/docs/docs/assets/logo.png")
        );
    }

    #[test]
    fn resolve_plain_relative_src() {
        let p = resolve_image_path(Path::new("./site"), "assets/logo.png");
        assert_eq!(p, PathBuf::from("./site/assets/logo.png"));
    }

    #[tokio::test]
    async fn oversized_image_is_downscaled_and_inlined() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "wide.png", 1000, 500);

        let html = r#"<p><img src="wide.png" alt="wide" /></p>"#;
        let (out, stats) = rewrite_fragment(html, dir.path(), 468).await.unwrap();

        assert!(out.contains(r#"width="468""#), "got: {out}");
        // floor(500 * 468 / 1000) = 234
        assert!(out.contains(r#"height="234""#), "got: {out}");
        assert!(out.contains(r#"src="data:image/png;base64,"#));
        assert!(!out.contains(r#"src="wide.png""#));
        assert_eq!(stats.images_inlined, 1);
        assert_eq!(stats.images_resized, 1);
    }

    #[tokio::test]
    async fn small_image_gets_no_dimension_attributes() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "small.png", 100, 80);

        let html = r#"<img src="small.png" alt="s" />"#;
        let (out, stats) = rewrite_fragment(html, dir.path(), 468).await.unwrap();

        assert!(!out.contains("width="), "got: {out}");
        assert!(!out.contains("height="), "got: {out}");
        assert!(out.contains("data:image/png;base64,"));
        assert_eq!(stats.images_resized, 0);
        assert_eq!(stats.images_inlined, 1);
    }

    #[tokio::test]
    async fn image_at_threshold_is_not_resized() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "exact.png", 468, 200);

        let html = r#"<img src="exact.png" alt="" />"#;
        let (out, stats) = rewrite_fragment(html, dir.path(), 468).await.unwrap();
        assert!(!out.contains("width="));
        assert_eq!(stats.images_resized, 0);
    }

    #[tokio::test]
    async fn single_quoted_and_unquoted_srcs_are_inlined() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "raw.png", 10, 10);

        for html in ["<img src='raw.png'>", "<img src=raw.png>", "<IMG SRC='raw.png'>"] {
            let (out, stats) = rewrite_fragment(html, dir.path(), 468).await.unwrap();
            assert!(
                out.contains(r#"src="data:image/png;base64,"#),
                "{html} → {out}"
            );
            assert!(!out.contains("raw.png"), "{html} → {out}");
            assert_eq!(stats.images_inlined, 1, "{html}");
        }
    }

    #[tokio::test]
    async fn loosely_quoted_oversized_image_is_still_downscaled() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "wide.png", 600, 300);

        let (out, stats) = rewrite_fragment("<img src='wide.png'>", dir.path(), 468)
            .await
            .unwrap();
        assert!(out.contains(r#"width="468""#), "got: {out}");
        assert!(out.contains(r#"height="234""#), "got: {out}");
        assert_eq!(stats.images_resized, 1);
    }

    #[tokio::test]
    async fn missing_loosely_quoted_image_still_aborts() {
        let dir = TempDir::new().unwrap();
        let err = rewrite_fragment("<img src='gone.png'>", dir.path(), 468)
            .await
            .unwrap_err();
        assert!(matches!(err, Docs2DocxError::ImageUnreadable { .. }));
    }

    #[tokio::test]
    async fn percent_encoded_src_is_decoded() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "my image.png", 10, 10);

        let html = r#"<img src="my%20image.png" alt="" />"#;
        let (out, _) = rewrite_fragment(html, dir.path(), 468).await.unwrap();
        assert!(out.contains("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn missing_image_aborts() {
        let dir = TempDir::new().unwrap();
        let err = rewrite_fragment(r#"<img src="gone.png" />"#, dir.path(), 468)
            .await
            .unwrap_err();
        assert!(matches!(err, Docs2DocxError::ImageUnreadable { .. }));
    }

    #[tokio::test]
    async fn corrupt_image_aborts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not an image").unwrap();
        let err = rewrite_fragment(r#"<img src="bad.png" />"#, dir.path(), 468)
            .await
            .unwrap_err();
        assert!(matches!(err, Docs2DocxError::ImageProbeFailed { .. }));
    }

    #[tokio::test]
    async fn data_uri_src_passes_through() {
        let html = r#"<img src="data:image/png;base64,AAAA" />"#;
        let (out, stats) = rewrite_fragment(html, Path::new("/nowhere"), 468)
            .await
            .unwrap();
        assert_eq!(out, html);
        assert_eq!(stats.images_inlined, 0);
    }

    #[tokio::test]
    async fn tables_receive_border_attributes() {
        let html = "<table><thead><tr><th>A</th></tr></thead></table>";
        let (out, stats) = rewrite_fragment(html, Path::new("."), 468).await.unwrap();
        assert!(
            out.contains(r#"<table border="1" cellspacing="0" cellpadding="0">"#),
            "got: {out}"
        );
        assert_eq!(stats.tables_bordered, 1);
    }

    #[tokio::test]
    async fn uppercase_tables_receive_border_attributes() {
        let html = "<TABLE><tr><td>1</td></tr></TABLE>";
        let (out, stats) = rewrite_fragment(html, Path::new("."), 468).await.unwrap();
        assert!(out.contains(r#"border="1""#), "got: {out}");
        assert_eq!(stats.tables_bordered, 1);
    }

    #[tokio::test]
    async fn raw_table_attributes_are_overridden() {
        let html = r#"<table border="0" class="x"><tr><td>1</td></tr></table>"#;
        let (out, _) = rewrite_fragment(html, Path::new("."), 468).await.unwrap();
        assert!(out.contains(r#"border="1""#), "got: {out}");
        assert!(out.contains(r#"class="x""#));
        assert!(!out.contains(r#"border="0""#));
    }
}
