//! Result and statistics types returned by the assembly pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The complete result of one assembly run.
///
/// Returned by [`crate::convert::assemble`]. The docx bytes are held in
/// memory so callers can persist them anywhere; [`crate::convert::assemble_to_file`]
/// writes them to the configured output path instead.
pub struct AssemblyOutput {
    /// The finished Word-compatible container, ready to write to disk.
    pub docx: Vec<u8>,

    /// The full assembled HTML document handed to the converter. Useful for
    /// debugging image or table rewriting without unzipping the container.
    pub html: String,

    /// Per-document results, in table-of-contents order.
    pub documents: Vec<DocumentResult>,

    /// Aggregate statistics for the run.
    pub stats: AssemblyStats,
}

/// Result for a single source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// 1-indexed position in table-of-contents order.
    pub index: usize,

    /// The path as written in the contents file.
    pub path: PathBuf,

    /// Byte length of the rewritten HTML fragment.
    pub html_len: usize,

    /// Images embedded as data URIs in this document.
    pub images_inlined: usize,
}

/// Aggregate statistics for an assembly run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Documents listed in the contents file and assembled.
    pub documents: usize,

    /// Images embedded as data URIs across all documents.
    pub images_inlined: usize,

    /// Images that exceeded the configured maximum width and were downscaled.
    pub images_resized: usize,

    /// Tables that received border attributes.
    pub tables_bordered: usize,

    /// Byte length of the assembled HTML document.
    pub html_bytes: usize,

    /// Byte length of the docx container.
    pub docx_bytes: usize,

    /// Time spent reading and resolving the contents file.
    pub resolve_duration_ms: u64,

    /// Time spent transforming documents (read + render + rewrite).
    pub transform_duration_ms: u64,

    /// Time spent building the docx container.
    pub convert_duration_ms: u64,

    /// Wall-clock time for the whole run.
    pub total_duration_ms: u64,
}
