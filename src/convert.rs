//! The conversion entry point: ordered images in, one PDF out.
//!
//! The pipeline is a plain sequential function — no event loop, no worker
//! pool. Images are processed one at a time in caller order because the
//! document's page sequence must match input order exactly and the writer
//! holds a single mutable document resource. Peak memory stays at one
//! decoded image: each bitmap moves into the document before the next load
//! begins.
//!
//! The first failing image aborts the whole run (there is no skip-and-
//! continue; a document missing pages in the middle is worse than no
//! document). Whatever the writer had already put on disk is left there —
//! callers decide whether to delete a half-written destination.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{ConversionOutput, ConversionStats, PageRecord};
use crate::pipeline::layout::{PageGeometry, Placement};
use crate::pipeline::normalize;
use crate::pipeline::writer::DocumentWriter;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

/// Convert an ordered sequence of images into a single multi-page PDF.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `sources`     — image paths, one page each, in page order (never sorted)
/// * `destination` — where the PDF is written
/// * `config`      — progress sink, cancel token, document title
///
/// # Errors
/// * [`ConvertError::EmptyInput`] — `sources` is empty; checked before the
///   destination is touched
/// * [`ConvertError::Destination`] — destination not writable; checked
///   before any image is decoded
/// * [`ConvertError::Load`] / [`ConvertError::InvalidImage`] — a source
///   failed; the error names it and the run stops there
/// * [`ConvertError::Cancelled`] — the cancel token was raised between
///   images; the destination is left unfinalized
pub fn convert(
    sources: &[PathBuf],
    destination: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    let destination = destination.as_ref();
    let total = sources.len();

    // ── Step 1: Validate input ───────────────────────────────────────────
    if sources.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    info!(total, destination = %destination.display(), "starting conversion");

    // ── Step 2: Open the destination ─────────────────────────────────────
    let title = config
        .title
        .clone()
        .or_else(|| {
            destination
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "converted images".to_string());
    let mut writer = DocumentWriter::create(destination, &title)?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    // ── Step 3: One page per image, in order ─────────────────────────────
    let mut pages: Vec<PageRecord> = Vec::with_capacity(total);
    let mut normalize_duration_ms = 0u64;
    let mut portrait_pages = 0usize;

    for (index, path) in sources.iter().enumerate() {
        if config.cancel.as_ref().is_some_and(|token| token.is_cancelled()) {
            info!(completed = index, total, "cancellation observed, stopping");
            return Err(ConvertError::Cancelled {
                completed: index,
                total,
            });
        }

        let source_name = display_name(path);
        if let Some(ref cb) = config.progress_callback {
            cb.on_image_start(index + 1, total, &source_name);
        }

        let normalize_start = Instant::now();
        let bitmap = normalize::load_image(path)?;
        normalize_duration_ms += normalize_start.elapsed().as_millis() as u64;

        let (width, height) = (bitmap.width(), bitmap.height());
        let geometry = PageGeometry::for_image(width, height);
        let placement = Placement::compute(geometry, width, height).ok_or(
            ConvertError::InvalidImage {
                path: path.clone(),
                width,
                height,
            },
        )?;

        writer.append_page(geometry, bitmap, placement)?;

        if geometry.is_portrait() {
            portrait_pages += 1;
        }
        pages.push(PageRecord {
            page_num: index + 1,
            source_name,
            page_width_pt: geometry.width_pt,
            page_height_pt: geometry.height_pt,
            scale: placement.scale,
        });

        debug!(page = index + 1, total, "image placed");
        if let Some(ref cb) = config.progress_callback {
            cb.on_image_complete(index + 1, total);
        }
    }

    // ── Step 4: Finalize the document ────────────────────────────────────
    let write_start = Instant::now();
    let written = writer.finalize()?;
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total);
    }

    let stats = ConversionStats {
        page_count: pages.len(),
        portrait_pages,
        landscape_pages: pages.len() - portrait_pages,
        normalize_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        pages = stats.page_count,
        total_ms = stats.total_duration_ms,
        "conversion complete"
    );

    Ok(ConversionOutput {
        destination: written,
        pages,
        stats,
    })
}

/// File name component of a source path, for progress and error display.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_fails_before_touching_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("never.pdf");

        let err = convert(&[], &dest, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput));
        assert!(!dest.exists(), "destination must not be created");
    }

    #[test]
    fn unwritable_destination_fails_before_decoding() {
        // The source path does not exist; if the destination check came
        // second we would see a Load error instead.
        let sources = vec![PathBuf::from("/no/such/image.png")];
        let err = convert(
            &sources,
            "/no/such/dir/out.pdf",
            &ConversionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Destination { .. }));
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("/a/b/photo.jpeg")), "photo.jpeg");
    }
}
