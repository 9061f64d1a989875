//! Assembly entry points: table-of-contents → single docx.
//!
//! The pipeline is a strictly sequential chain of awaits: the contents file
//! is resolved once, then each referenced document is read, rendered, and
//! rewritten to completion before the next one starts. Final output order
//! must exactly match table-of-contents order, and fragments are appended to
//! one ordered list owned here; serialising all I/O is the simplest design
//! that keeps that ordering without a re-sorting step. Any failure at any
//! stage aborts the run; the output file is only written after every stage
//! has succeeded, so a failed run never leaves a partial file.

use crate::config::AssembleConfig;
use crate::docx;
use crate::error::Docs2DocxError;
use crate::output::{AssemblyOutput, AssemblyStats, DocumentResult};
use crate::pipeline::{contents, markdown, rewrite, shell};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Fragments are joined with a visible line break between documents.
const FRAGMENT_SEPARATOR: &str = "<br/>";

/// Assemble the configured documentation site into docx bytes.
///
/// This is the primary entry point for the library. Nothing is written to
/// disk; use [`assemble_to_file`] to also persist the result.
///
/// # Errors
/// Every failure is fatal for the run: an unreadable contents file or
/// document, an unresolvable or unprobable image, or a container packaging
/// error. There is no per-document partial-failure tolerance.
pub async fn assemble(config: &AssembleConfig) -> Result<AssemblyOutput, Docs2DocxError> {
    let total_start = Instant::now();
    info!("Starting assembly from {}", config.contents.display());

    // ── Step 1: Resolve the table of contents ────────────────────────────
    let resolve_start = Instant::now();
    let doc_refs = contents::resolve_contents(&config.contents).await?;
    let resolve_duration_ms = resolve_start.elapsed().as_millis() as u64;
    info!("Contents file lists {} documents", doc_refs.len());

    if let Some(ref cb) = config.progress_callback {
        cb.on_assembly_start(doc_refs.len());
    }

    // ── Step 2: Transform documents in order, one at a time ──────────────
    let transform_start = Instant::now();
    let mut fragments: Vec<String> = Vec::with_capacity(doc_refs.len() + 1);
    let mut documents: Vec<DocumentResult> = Vec::with_capacity(doc_refs.len());
    let mut stats = AssemblyStats::default();

    if let Some(ref cover) = config.cover_title {
        fragments.push(cover.clone());
    }

    let total = doc_refs.len();
    for (i, doc_ref) in doc_refs.iter().enumerate() {
        let index = i + 1;
        let doc_path = Path::new(doc_ref);
        if let Some(ref cb) = config.progress_callback {
            cb.on_document_start(index, total, doc_path);
        }

        let (fragment, doc_stats) = transform_document(doc_path, config).await?;
        info!("[{}/{}] {} → {} bytes", index, total, doc_ref, fragment.len());

        if let Some(ref cb) = config.progress_callback {
            cb.on_document_complete(index, total, doc_path, fragment.len());
        }

        documents.push(DocumentResult {
            index,
            path: doc_path.to_path_buf(),
            html_len: fragment.len(),
            images_inlined: doc_stats.images_inlined,
        });
        stats.images_inlined += doc_stats.images_inlined;
        stats.images_resized += doc_stats.images_resized;
        stats.tables_bordered += doc_stats.tables_bordered;
        fragments.push(fragment);
    }
    let transform_duration_ms = transform_start.elapsed().as_millis() as u64;

    // ── Step 3: Join fragments and build the document shell ──────────────
    let body = fragments.join(FRAGMENT_SEPARATOR);
    let html = shell::wrap_document(&body, &config.body_styles);
    debug!("Assembled HTML document: {} bytes", html.len());

    // ── Step 4: Convert to a docx container ──────────────────────────────
    let convert_start = Instant::now();
    let docx = docx::html_to_docx(&html, config.orientation, &config.margins)?;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    // ── Step 5: Finalise stats ───────────────────────────────────────────
    stats.documents = documents.len();
    stats.html_bytes = html.len();
    stats.docx_bytes = docx.len();
    stats.resolve_duration_ms = resolve_duration_ms;
    stats.transform_duration_ms = transform_duration_ms;
    stats.convert_duration_ms = convert_duration_ms;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Assembly complete: {} documents, {} bytes docx, {}ms total",
        stats.documents, stats.docx_bytes, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_assembly_complete(stats.documents, stats.docx_bytes);
    }

    Ok(AssemblyOutput {
        docx,
        html,
        documents,
        stats,
    })
}

/// Assemble and write the docx to the configured output path.
///
/// Uses atomic write (temp file + rename) so an interrupted write cannot
/// leave a truncated file at `path_to_public`; an existing file there is
/// overwritten without confirmation.
pub async fn assemble_to_file(config: &AssembleConfig) -> Result<AssemblyStats, Docs2DocxError> {
    let output = assemble(config).await?;
    write_docx(&config.path_to_public, &output.docx).await?;

    info!(
        "Wrote {} bytes to {}",
        output.stats.docx_bytes,
        config.path_to_public.display()
    );
    Ok(output.stats)
}

/// Write docx bytes to `path` atomically (temp file + rename), creating
/// missing parent directories.
///
/// Shared by [`assemble_to_file`] and callers that hold an
/// [`AssemblyOutput`] and persist it themselves.
pub async fn write_docx(path: &Path, docx: &[u8]) -> Result<(), Docs2DocxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                Docs2DocxError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("docx.tmp");
    tokio::fs::write(&tmp_path, docx)
        .await
        .map_err(|source| Docs2DocxError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    tokio::fs::rename(&tmp_path, path).await.map_err(|source| {
        Docs2DocxError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(())
}

/// Synchronous wrapper around [`assemble`].
///
/// Creates a temporary tokio runtime internally.
pub fn assemble_sync(config: &AssembleConfig) -> Result<AssemblyOutput, Docs2DocxError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Docs2DocxError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(assemble(config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Read, render, and rewrite one document into its HTML fragment.
async fn transform_document(
    path: &Path,
    config: &AssembleConfig,
) -> Result<(String, rewrite::RewriteStats), Docs2DocxError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| {
        Docs2DocxError::DocumentUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let fragment = markdown::to_html_fragment(&text, config.title_downgrade);
    rewrite::rewrite_fragment(&fragment, &config.root_path, config.img_max_width).await
}
