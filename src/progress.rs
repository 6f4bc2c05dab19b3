//! Progress-callback trait for per-image conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! an event as the pipeline reaches each image.
//!
//! The callback is the least-invasive integration point for a surrounding
//! UI: callers can forward events to a status bar, a channel, or a terminal
//! progress bar without the library knowing how the host application
//! communicates. Events fire synchronously between pipeline steps, once per
//! image, in input order; implementations must return promptly because the
//! pipeline does not continue until the call returns.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each image.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The trait is `Send + Sync` so a single callback can
/// be shared with whatever thread drives the conversion.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before the first image is loaded.
    ///
    /// # Arguments
    /// * `total` — number of images that will be converted
    fn on_run_start(&self, total: usize) {
        let _ = total;
    }

    /// Called when an image begins processing, before it is decoded.
    ///
    /// # Arguments
    /// * `index`       — 1-indexed position in the input sequence
    /// * `total`       — total images in the run
    /// * `source_name` — file name of the image being processed
    fn on_image_start(&self, index: usize, total: usize, source_name: &str) {
        let _ = (index, total, source_name);
    }

    /// Called after an image's page has been appended to the document.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in the input sequence
    /// * `total` — total images in the run
    fn on_image_complete(&self, index: usize, total: usize) {
        let _ = (index, total);
    }

    /// Called once after the document has been finalized.
    ///
    /// Not called when the run fails or is cancelled — the terminal error
    /// carries that outcome instead.
    fn on_run_complete(&self, total: usize) {
        let _ = total;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        run_total: AtomicUsize,
        names: Mutex<Vec<String>>,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_run_start(&self, total: usize) {
            self.run_total.store(total, Ordering::SeqCst);
        }

        fn on_image_start(&self, _index: usize, _total: usize, source_name: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
            self.names.lock().unwrap().push(source_name.to_string());
        }

        fn on_image_complete(&self, _index: usize, _total: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(3);
        cb.on_image_start(1, 3, "a.png");
        cb.on_image_complete(1, 3);
        cb.on_run_complete(3);
    }

    #[test]
    fn tracking_callback_receives_events_in_order() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            run_total: AtomicUsize::new(0),
            names: Mutex::new(Vec::new()),
        };

        tracker.on_run_start(2);
        tracker.on_image_start(1, 2, "first.png");
        tracker.on_image_complete(1, 2);
        tracker.on_image_start(2, 2, "second.jpg");
        tracker.on_image_complete(2, 2);

        assert_eq!(tracker.run_total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(*tracker.names.lock().unwrap(), vec!["first.png", "second.jpg"]);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(10);
        cb.on_image_start(1, 10, "x.bmp");
    }
}
