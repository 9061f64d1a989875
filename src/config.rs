//! Configuration types for Markdown-site-to-docx assembly.
//!
//! All assembly behaviour is controlled through [`AssembleConfig`], built via
//! its [`AssembleConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over partial-config merge
//! The original tool deep-merged a caller-supplied partial object onto a
//! module-level default object. Here each invocation builds its own immutable
//! config value: defaults come from [`Default`], callers set only what they
//! care about, and nested [`Margins`] merge key-wise through plain
//! struct-update syntax (`Margins { top: 100, ..Default::default() }`).
//! The builder performs no validation: out-of-range values pass through and
//! downstream stages tolerate or fail on them.

use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration for one assembly run.
///
/// Built via [`AssembleConfig::builder()`] or using
/// [`AssembleConfig::default()`].
///
/// # Example
/// ```rust
/// use docs2docx::{AssembleConfig, Margins, Orientation};
///
/// let config = AssembleConfig::builder()
///     .contents("wiki/_sidebar.md")
///     .orientation(Orientation::Landscape)
///     .margins(Margins { top: 720, ..Default::default() })
///     .build();
/// ```
#[derive(Clone)]
pub struct AssembleConfig {
    /// Table-of-contents file whose Markdown links enumerate, in order, the
    /// documents to assemble. Default: `_sidebar.md`.
    pub contents: PathBuf,

    /// Demote every `# ` heading marker one level per document, so each
    /// document's title renders below a single document-wide title.
    /// Default: true.
    pub title_downgrade: bool,

    /// Base directory for resolving image references. Default: `./docs`.
    pub root_path: PathBuf,

    /// Maximum rendered image width in layout units. 468 is the usable width
    /// of a default-margin Word page; wider images are downscaled
    /// proportionally. Default: 468.
    pub img_max_width: u32,

    /// Output file path, overwritten without confirmation.
    /// Default: `./README.docx`.
    pub path_to_public: PathBuf,

    /// Optional literal HTML prepended once as a cover fragment before the
    /// first document. Trusted verbatim. Default: None.
    pub cover_title: Option<String>,

    /// Inline CSS applied to the `<body>` element of the assembled HTML,
    /// unescaped. Default: `font-family: 微软雅黑;`.
    pub body_styles: String,

    /// Page orientation passed to the docx converter. Default: portrait.
    pub orientation: Orientation,

    /// Page margins passed to the docx converter, in twentieths of a point.
    pub margins: Margins,

    /// Optional per-document progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            contents: PathBuf::from("_sidebar.md"),
            title_downgrade: true,
            root_path: PathBuf::from("./docs"),
            img_max_width: 468,
            path_to_public: PathBuf::from("./README.docx"),
            cover_title: None,
            body_styles: "font-family: 微软雅黑;".to_string(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for AssembleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssembleConfig")
            .field("contents", &self.contents)
            .field("title_downgrade", &self.title_downgrade)
            .field("root_path", &self.root_path)
            .field("img_max_width", &self.img_max_width)
            .field("path_to_public", &self.path_to_public)
            .field("cover_title", &self.cover_title)
            .field("body_styles", &self.body_styles)
            .field("orientation", &self.orientation)
            .field("margins", &self.margins)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl AssembleConfig {
    /// Create a new builder for `AssembleConfig`.
    pub fn builder() -> AssembleConfigBuilder {
        AssembleConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AssembleConfig`].
#[derive(Debug)]
pub struct AssembleConfigBuilder {
    config: AssembleConfig,
}

impl AssembleConfigBuilder {
    pub fn contents(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.contents = path.into();
        self
    }

    pub fn title_downgrade(mut self, v: bool) -> Self {
        self.config.title_downgrade = v;
        self
    }

    pub fn root_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_path = path.into();
        self
    }

    pub fn img_max_width(mut self, px: u32) -> Self {
        self.config.img_max_width = px;
        self
    }

    pub fn path_to_public(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path_to_public = path.into();
        self
    }

    pub fn cover_title(mut self, html: impl Into<String>) -> Self {
        self.config.cover_title = Some(html.into());
        self
    }

    pub fn body_styles(mut self, css: impl Into<String>) -> Self {
        self.config.body_styles = css.into();
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration. Infallible: no option is validated here;
    /// downstream stages are responsible for tolerating or failing on bad
    /// values.
    pub fn build(self) -> AssembleConfig {
        self.config
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Page orientation passed to the docx converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// 12240 × 15840 twips (US Letter). (default)
    #[default]
    Portrait,
    /// Width and height swapped.
    Landscape,
}

impl Orientation {
    /// OOXML page size for this orientation, in twentieths of a point.
    pub fn page_size(self) -> (u32, u32) {
        match self {
            Orientation::Portrait => (12240, 15840),
            Orientation::Landscape => (15840, 12240),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// Page margins in twentieths of a point (twips).
///
/// `Default` carries the Word defaults, so overriding one side preserves the
/// rest, matching the nested key-wise merge of the original config layer:
///
/// ```rust
/// use docs2docx::Margins;
///
/// let m = Margins { top: 100, ..Default::default() };
/// assert_eq!(m.right, 1440);
/// assert_eq!(m.header, 720);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    pub header: u32,
    pub footer: u32,
    pub gutter: u32,
}

impl Default for Margins {
    fn default() -> Self {
        // 1440 twips = 1 inch, the Word "Normal" margin preset.
        Self {
            top: 1440,
            right: 1440,
            bottom: 1440,
            left: 1440,
            header: 720,
            footer: 720,
            gutter: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = AssembleConfig::default();
        assert_eq!(c.contents, PathBuf::from("_sidebar.md"));
        assert!(c.title_downgrade);
        assert_eq!(c.root_path, PathBuf::from("./docs"));
        assert_eq!(c.img_max_width, 468);
        assert_eq!(c.path_to_public, PathBuf::from("./README.docx"));
        assert_eq!(c.cover_title, None);
        assert_eq!(c.body_styles, "font-family: 微软雅黑;");
        assert_eq!(c.orientation, Orientation::Portrait);
        assert_eq!(c.margins, Margins::default());
    }

    #[test]
    fn builder_overrides_only_what_is_set() {
        let c = AssembleConfig::builder()
            .margins(Margins {
                top: 100,
                ..Default::default()
            })
            .build();
        // Unrelated defaults untouched.
        assert_eq!(c.orientation, Orientation::Portrait);
        assert_eq!(c.img_max_width, 468);
        // Margin merge is key-wise: only `top` changed.
        assert_eq!(c.margins.top, 100);
        assert_eq!(c.margins.right, 1440);
        assert_eq!(c.margins.bottom, 1440);
        assert_eq!(c.margins.footer, 720);
        assert_eq!(c.margins.gutter, 0);
    }

    #[test]
    fn builder_performs_no_validation() {
        // Degenerate values pass through; downstream stages own the failure.
        let c = AssembleConfig::builder().img_max_width(0).build();
        assert_eq!(c.img_max_width, 0);
    }

    #[test]
    fn orientation_page_size_swaps() {
        assert_eq!(Orientation::Portrait.page_size(), (12240, 15840));
        assert_eq!(Orientation::Landscape.page_size(), (15840, 12240));
    }
}
