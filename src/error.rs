//! Error types for the docs2docx library.
//!
//! Every failure kind here is fatal for the run: the pipeline has no
//! per-document skip-and-continue and no retries. A run either produces one
//! complete output file or produces none: the orchestrator propagates the
//! first error with `?`, and because the output write is the final stage, a
//! failed run never leaves a partial file behind. The CLI catches the error
//! once at the outermost level and logs the raw detail.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the docs2docx library.
#[derive(Debug, Error)]
pub enum Docs2DocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The table-of-contents file could not be read.
    #[error("Failed to read contents file '{path}': {source}\nCheck the path exists and is readable.")]
    ContentsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document referenced from the contents file could not be read.
    #[error("Failed to read document '{path}': {source}")]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Image errors ──────────────────────────────────────────────────────
    /// An image referenced from a document could not be read.
    #[error("Failed to read image '{path}': {source}")]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image was read but its dimensions could not be probed
    /// (unsupported format or corrupt header).
    #[error("Failed to probe image dimensions for '{path}': {detail}")]
    ImageProbeFailed { path: PathBuf, detail: String },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// Packaging the assembled HTML into a docx container failed.
    #[error("Failed to build docx container: {detail}")]
    DocxConversionFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the output docx file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
