//! Pipeline stages for Markdown-site-to-docx assembly.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the Markdown renderer) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! contents ──▶ markdown ──▶ rewrite ──▶ shell
//! (link list)  (md → html)  (img/table) (full document)
//! ```
//!
//! 1. [`contents`]: extract the ordered document list from the
//!    table-of-contents file
//! 2. [`markdown`]: demote headings and render one document to an HTML
//!    fragment
//! 3. [`rewrite`]: embed images as data URIs (downscaling oversized ones)
//!    and add borders to tables; uses [`inline`] per image
//! 4. [`inline`]: raw image bytes → base64 data URI
//! 5. [`shell`]: wrap the joined fragments in a minimal HTML skeleton

pub mod contents;
pub mod inline;
pub mod markdown;
pub mod rewrite;
pub mod shell;
