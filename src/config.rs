//! Configuration types for image-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The page geometry itself is not
//! configurable: every page is US Letter, portrait or landscape chosen per
//! image, with a fixed half-inch margin (see [`crate::pipeline::layout`]).
//! What the config carries is the run's collaboration surface — the progress
//! sink, the cancel token, and the internal document title.

use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag, checked between images.
///
/// Clone the token, hand one copy to the conversion config and keep the
/// other; calling [`cancel`](CancelToken::cancel) makes the pipeline stop
/// before it loads the next image and return
/// [`ConvertError::Cancelled`](crate::error::ConvertError::Cancelled).
/// Cancellation is never observed mid-image: a page that has started is
/// finished first.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; safe from any thread.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use img2pdf::{CancelToken, ConversionConfig};
///
/// let cancel = CancelToken::new();
/// let config = ConversionConfig::builder()
///     .title("Holiday photos")
///     .cancel_token(cancel.clone())
///     .build();
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Progress sink, invoked once per image in input order. `None` = silent.
    pub progress_callback: Option<ProgressCallback>,

    /// Cooperative stop flag, checked between images. `None` = never cancelled.
    pub cancel: Option<CancelToken>,

    /// Internal PDF document title. Defaults to the destination file stem.
    ///
    /// This is the name stored in the document catalog, not user-visible
    /// metadata in any richer sense; the output intentionally carries no
    /// other document metadata.
    pub title: Option<String>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .field("cancel", &self.cancel)
            .field("title", &self.title)
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Receive per-image progress events on `cb`.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Observe `token` between images and stop when it is raised.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.config.cancel = Some(token);
        self
    }

    /// Set the internal PDF document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;

    #[test]
    fn cancel_token_starts_clear_and_latches() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled(), "clones share the flag");

        // Idempotent
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn builder_sets_all_fields() {
        let config = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .cancel_token(CancelToken::new())
            .title("scans")
            .build();

        assert!(config.progress_callback.is_some());
        assert!(config.cancel.is_some());
        assert_eq!(config.title.as_deref(), Some("scans"));
    }

    #[test]
    fn debug_elides_the_callback() {
        let config = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build();
        let dbg = format!("{config:?}");
        assert!(dbg.contains("<dyn callback>"), "got: {dbg}");
    }
}
