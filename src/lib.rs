//! # img2pdf
//!
//! Convert an ordered collection of raster images into a single multi-page
//! PDF, one page per image.
//!
//! ## Why this crate?
//!
//! "Print my photos as a PDF" sounds trivial until the inputs are real:
//! phone photos carry their rotation in an EXIF tag instead of their
//! pixels, screenshots and logos have alpha channels that most PDF viewers
//! render as black, and a mixed batch of portrait and landscape shots looks
//! wrong forced onto one page orientation. This crate normalizes each image
//! (orientation corrected, transparency flattened onto white) and gives
//! each one a Letter page in whichever orientation fits it, scaled and
//! centered inside a half-inch margin.
//!
//! ## Pipeline Overview
//!
//! ```text
//! images (ordered)
//!  │
//!  ├─ 1. Normalize  decode, apply EXIF orientation, flatten alpha → RGB8
//!  ├─ 2. Layout     portrait/landscape Letter, scale-to-fit, center
//!  ├─ 3. Write      append one PDF page per image, in input order
//!  └─ 4. Finalize   serialise and flush the document to the destination
//! ```
//!
//! Execution is strictly sequential and synchronous: one image at a time,
//! one decoded bitmap in memory, progress reported once per image in input
//! order, cancellation observed between images.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img2pdf::{convert, ConversionConfig};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sources = vec![
//!         PathBuf::from("photos/cover.png"),
//!         PathBuf::from("photos/page-2.jpg"),
//!     ];
//!     let output = convert(&sources, "album.pdf", &ConversionConfig::default())?;
//!     println!("wrote {} pages to {}", output.stats.page_count, output.destination.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! img2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CancelToken, ConversionConfig, ConversionConfigBuilder};
pub use convert::convert;
pub use error::ConvertError;
pub use output::{ConversionOutput, ConversionStats, PageRecord};
pub use pipeline::layout::{PageGeometry, Placement, MARGIN_PT};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
