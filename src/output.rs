//! Result types returned by a successful conversion run.
//!
//! Everything here is plain data, `Serialize`-able so the CLI's `--json`
//! mode can emit it directly. The per-page records double as a machine-
//! readable audit of the layout decisions (chosen orientation, scale) the
//! pipeline made for each input.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a completed conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// Where the finished PDF was written.
    pub destination: PathBuf,
    /// One record per input image, in input order.
    pub pages: Vec<PageRecord>,
    /// Aggregate counters and timings.
    pub stats: ConversionStats,
}

/// Layout decisions for a single emitted page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// 1-indexed page number, equal to the image's position in the input.
    pub page_num: usize,
    /// File name of the source image.
    pub source_name: String,
    /// Emitted page width in PostScript points.
    pub page_width_pt: f32,
    /// Emitted page height in PostScript points.
    pub page_height_pt: f32,
    /// Uniform scale applied to the normalized bitmap (points per pixel).
    pub scale: f32,
}

impl PageRecord {
    /// Whether this page came out portrait (height > width).
    ///
    /// Square pages cannot occur: the two fixed geometries are both
    /// rectangular.
    pub fn is_portrait(&self) -> bool {
        self.page_height_pt > self.page_width_pt
    }
}

/// Aggregate statistics for a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Pages emitted — always equal to the number of input images.
    pub page_count: usize,
    /// Pages that used the portrait geometry.
    pub portrait_pages: usize,
    /// Pages that used the landscape geometry.
    pub landscape_pages: usize,
    /// Wall-clock time spent decoding and normalizing images.
    pub normalize_duration_ms: u64,
    /// Wall-clock time spent serialising and writing the PDF.
    pub write_duration_ms: u64,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}
