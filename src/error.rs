//! Error types for the img2pdf library.
//!
//! A conversion run has exactly one terminal outcome: `Ok(ConversionOutput)`
//! or a single [`ConvertError`]. There is no per-image skip-and-continue —
//! the output document must contain every input image in order, so the first
//! failure aborts the run and identifies the offending source. Whatever was
//! already written to the destination is left in place; deleting a
//! half-written file is the caller's decision, not the library's.
//!
//! None of these failures is retried: every operation in the pipeline is
//! deterministic given the same input, so retrying without changing the
//! input cannot succeed.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the img2pdf library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The caller supplied no images at all.
    #[error("No input images were supplied.\nPass at least one image path.")]
    EmptyInput,

    /// An input image could not be read or decoded.
    ///
    /// Covers missing files, permission problems, zero-byte files, and
    /// content that no enabled decoder (PNG, JPEG, BMP, TIFF) recognises.
    #[error("Cannot load image '{path}': {detail}\nCheck the file exists and is a readable PNG/JPEG/BMP/TIFF.")]
    Load { path: PathBuf, detail: String },

    /// An image decoded successfully but has a zero-area pixel raster.
    ///
    /// Guarded explicitly before any layout math — a 0×N image would
    /// otherwise divide by zero in the scale computation.
    #[error("Image '{path}' has degenerate dimensions {width}x{height}; cannot place it on a page")]
    InvalidImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The destination path could not be opened for writing.
    #[error("Cannot write to destination '{path}': {source}\nCheck the directory exists and is writable.")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialising or flushing the finished PDF failed.
    #[error("Failed to write PDF to '{path}': {detail}")]
    PdfWrite { path: PathBuf, detail: String },

    /// The document writer was driven out of its open → finalize lifecycle.
    ///
    /// Appending after finalize, or finalizing twice, is a programming
    /// error in the caller; the writer reports it instead of panicking.
    #[error("Document writer misuse: {0}")]
    InvalidState(&'static str),

    // ── Cooperative stop ──────────────────────────────────────────────────
    /// The cancel token was raised between images.
    ///
    /// The destination is left unfinalized; `completed` counts the pages
    /// appended before the stop was observed.
    #[error("Conversion cancelled after {completed} of {total} images")]
    Cancelled { completed: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_display_names_the_source() {
        let e = ConvertError::Load {
            path: PathBuf::from("/tmp/broken.png"),
            detail: "unexpected end of file".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/broken.png"), "got: {msg}");
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn invalid_image_display_shows_dimensions() {
        let e = ConvertError::InvalidImage {
            path: PathBuf::from("zero.bmp"),
            width: 0,
            height: 240,
        };
        assert!(e.to_string().contains("0x240"));
    }

    #[test]
    fn cancelled_display_shows_progress() {
        let e = ConvertError::Cancelled {
            completed: 3,
            total: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("3 of 10"), "got: {msg}");
    }

    #[test]
    fn destination_preserves_io_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = ConvertError::Destination {
            path: PathBuf::from("/root/out.pdf"),
            source: io,
        };
        assert!(e.source().is_some());
    }
}
