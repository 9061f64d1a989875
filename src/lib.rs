//! # docs2docx
//!
//! Assemble a docsify-style Markdown documentation site into a single
//! Word-compatible `.docx` document.
//!
//! ## Why this crate?
//!
//! Documentation sites are written as many small Markdown files tied together
//! by a sidebar; sharing them with people who live in Word means stitching
//! those files together by hand and losing images that reference the site's
//! asset directory. This crate resolves the sidebar into an ordered document
//! list, renders each file, embeds every image directly into the output, and
//! packages the result as one `.docx` anyone can open offline.
//!
//! ## Pipeline Overview
//!
//! ```text
//! _sidebar.md
//!  │
//!  ├─ 1. Contents  extract the ordered document list (link targets)
//!  ├─ 2. Markdown  per document: demote `# ` headings, render to HTML
//!  ├─ 3. Rewrite   embed images as data URIs, downscale oversized ones,
//!  │               border tables
//!  ├─ 4. Shell     join fragments, wrap in a minimal HTML document
//!  ├─ 5. Docx      package as an OOXML altChunk container
//!  └─ 6. Write     persist to the configured output path
//! ```
//!
//! Documents are processed strictly sequentially: output order must match
//! sidebar order, so exactly one read, probe, or write is in flight at any
//! time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docs2docx::{assemble_to_file, AssembleConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssembleConfig::builder()
//!         .contents("docs/_sidebar.md")
//!         .root_path("./docs")
//!         .path_to_public("./manual.docx")
//!         .build();
//!     let stats = assemble_to_file(&config).await?;
//!     eprintln!("{} documents, {} bytes", stats.documents, stats.docx_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docs2docx` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! docs2docx = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod docx;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{AssembleConfig, AssembleConfigBuilder, Margins, Orientation};
pub use convert::{assemble, assemble_sync, assemble_to_file, write_docx};
pub use error::Docs2DocxError;
pub use output::{AssemblyOutput, AssemblyStats, DocumentResult};
pub use progress::{AssemblyProgressCallback, NoopProgressCallback, ProgressCallback};
