//! Progress-callback trait for per-document assembly events.
//!
//! Inject an [`Arc<dyn AssemblyProgressCallback>`] via
//! [`crate::config::AssembleConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline processes each document in
//! table-of-contents order.
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a log file, or a terminal without the
//! library knowing anything about how the host application communicates.
//! Documents are processed strictly sequentially, so events for document
//! `n + 1` never arrive before `on_document_complete` for document `n`; the
//! trait is still `Send + Sync` so configs can cross thread boundaries.

use std::path::Path;
use std::sync::Arc;

/// Called by the assembly pipeline as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait AssemblyProgressCallback: Send + Sync {
    /// Called once after the contents file has been resolved.
    ///
    /// # Arguments
    /// * `total_documents`: number of documents that will be processed
    fn on_assembly_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called just before a document is read and transformed.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in table-of-contents order
    /// * `total`: total documents in the run
    /// * `path`: the document path as written in the contents file
    fn on_document_start(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called when a document's HTML fragment has been produced.
    ///
    /// # Arguments
    /// * `html_len`: byte length of the rewritten fragment
    fn on_document_complete(&self, index: usize, total: usize, path: &Path, html_len: usize) {
        let _ = (index, total, path, html_len);
    }

    /// Called once after the docx container has been built.
    ///
    /// # Arguments
    /// * `total_documents`: documents assembled
    /// * `docx_bytes`: size of the produced container
    fn on_assembly_complete(&self, total_documents: usize, docx_bytes: usize) {
        let _ = (total_documents, docx_bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl AssemblyProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::AssembleConfig`].
pub type ProgressCallback = Arc<dyn AssemblyProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        order: Mutex<Vec<PathBuf>>,
    }

    impl AssemblyProgressCallback for TrackingCallback {
        fn on_document_start(&self, _index: usize, _total: usize, _path: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_complete(&self, _index: usize, _total: usize, path: &Path, _len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
            self.order.lock().unwrap().push(path.to_path_buf());
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_assembly_start(2);
        cb.on_document_start(1, 2, Path::new("a.md"));
        cb.on_document_complete(1, 2, Path::new("a.md"), 128);
        cb.on_assembly_complete(2, 4096);
    }

    #[test]
    fn tracking_callback_receives_events_in_order() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            order: Mutex::new(Vec::new()),
        };

        tracker.on_document_start(1, 2, Path::new("a.md"));
        tracker.on_document_complete(1, 2, Path::new("a.md"), 10);
        tracker.on_document_start(2, 2, Path::new("b.md"));
        tracker.on_document_complete(2, 2, Path::new("b.md"), 20);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(
            *tracker.order.lock().unwrap(),
            vec![PathBuf::from("a.md"), PathBuf::from("b.md")]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn AssemblyProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_assembly_start(3);
        cb.on_document_complete(1, 3, Path::new("intro.md"), 512);
    }
}
