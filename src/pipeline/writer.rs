//! Document writer — accumulate pages in call order, finalize exactly once.
//!
//! Built on `printpdf` 0.8's data-oriented API: each appended page becomes a
//! `PdfPage` holding one `Op::UseXobject` that draws the image XObject at
//! its computed placement, and `finalize` serialises the whole document in
//! one `save` call through the file handle opened up front.
//!
//! The writer owns the single mutable "current document" resource for the
//! run. Pages are strictly sequential — no random access, no reordering
//! after append — and the open → append… → finalize lifecycle is enforced
//! with an explicit state tag: misuse surfaces as
//! [`ConvertError::InvalidState`], never as a panic or a silently corrupt
//! file.

use crate::error::ConvertError;
use crate::pipeline::layout::{PageGeometry, Placement};
use crate::pipeline::normalize::NormalizedImage;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, warn};

/// `printpdf` page sizes are given in millimetres; placement math is in
/// points (72 per inch, 25.4 mm per inch).
const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Finalized,
}

/// Sequential-append PDF writer for one conversion run.
#[derive(Debug)]
pub struct DocumentWriter {
    destination: PathBuf,
    file: File,
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    state: WriterState,
}

impl DocumentWriter {
    /// Begin a new document at `destination`.
    ///
    /// The file is created (and truncated) eagerly so an unwritable path —
    /// missing directory, permission denied — fails with
    /// [`ConvertError::Destination`] before any image has been decoded.
    pub fn create(destination: &Path, title: &str) -> Result<Self, ConvertError> {
        let file = File::create(destination).map_err(|err| ConvertError::Destination {
            path: destination.to_path_buf(),
            source: err,
        })?;

        info!(destination = %destination.display(), title, "document opened");

        Ok(Self {
            destination: destination.to_path_buf(),
            file,
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            state: WriterState::Open,
        })
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one page of `geometry` drawing `bitmap` at `placement`.
    ///
    /// Consumes the bitmap: its pixel buffer moves into the document's
    /// image XObject, so the pipeline never holds two decoded images.
    pub fn append_page(
        &mut self,
        geometry: PageGeometry,
        bitmap: NormalizedImage,
        placement: Placement,
    ) -> Result<(), ConvertError> {
        if self.state == WriterState::Finalized {
            return Err(ConvertError::InvalidState(
                "append_page called after finalize",
            ));
        }

        let width = bitmap.width() as usize;
        let height = bitmap.height() as usize;
        let raw = RawImage {
            pixels: RawImageData::U8(bitmap.image.into_raw()),
            width,
            height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // dpi 72 makes the XObject's native size one point per pixel, so
        // `scale` applies the placement math unchanged.
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placement.x_pt)),
                translate_y: Some(Pt(placement.y_pt)),
                scale_x: Some(placement.scale),
                scale_y: Some(placement.scale),
                dpi: Some(72.0),
                rotate: None,
            },
        }];

        self.pages.push(PdfPage::new(
            Mm(geometry.width_pt * MM_PER_PT),
            Mm(geometry.height_pt * MM_PER_PT),
            ops,
        ));

        debug!(
            page = self.pages.len(),
            width,
            height,
            scale = placement.scale,
            portrait = geometry.is_portrait(),
            "page appended"
        );

        Ok(())
    }

    /// Serialise all appended pages and flush them to the destination.
    ///
    /// One-shot: a second call fails with [`ConvertError::InvalidState`].
    /// A writer with zero appended pages still produces a structurally
    /// valid, zero-page document.
    pub fn finalize(&mut self) -> Result<PathBuf, ConvertError> {
        if self.state == WriterState::Finalized {
            return Err(ConvertError::InvalidState("finalize called twice"));
        }
        self.state = WriterState::Finalized;

        let pages = std::mem::take(&mut self.pages);
        let page_count = pages.len();
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings during save");
        }

        self.file
            .write_all(&bytes)
            .and_then(|_| self.file.flush())
            .map_err(|err| ConvertError::PdfWrite {
                path: self.destination.clone(),
                detail: err.to_string(),
            })?;

        info!(
            destination = %self.destination.display(),
            pages = page_count,
            bytes = bytes.len(),
            "document finalized"
        );

        Ok(self.destination.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn bitmap(width: u32, height: u32) -> NormalizedImage {
        NormalizedImage {
            image: RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30])),
        }
    }

    fn placement_for(geometry: PageGeometry, width: u32, height: u32) -> Placement {
        Placement::compute(geometry, width, height).unwrap()
    }

    #[test]
    fn create_fails_on_missing_directory() {
        let err = DocumentWriter::create(Path::new("/no/such/dir/out.pdf"), "t").unwrap_err();
        assert!(matches!(err, ConvertError::Destination { .. }));
    }

    #[test]
    fn append_and_finalize_produces_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("one.pdf");

        let mut writer = DocumentWriter::create(&dest, "one").unwrap();
        let geometry = PageGeometry::for_image(80, 60);
        writer
            .append_page(geometry, bitmap(80, 60), placement_for(geometry, 80, 60))
            .unwrap();
        assert_eq!(writer.page_count(), 1);

        let written = writer.finalize().unwrap();
        assert_eq!(written, dest);

        let bytes = std::fs::read(&dest).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
    }

    #[test]
    fn finalize_twice_is_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DocumentWriter::create(&dir.path().join("x.pdf"), "x").unwrap();
        writer.finalize().unwrap();

        let err = writer.finalize().unwrap_err();
        assert!(matches!(err, ConvertError::InvalidState(_)));
    }

    #[test]
    fn append_after_finalize_is_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DocumentWriter::create(&dir.path().join("x.pdf"), "x").unwrap();
        writer.finalize().unwrap();

        let geometry = PageGeometry::PORTRAIT;
        let err = writer
            .append_page(geometry, bitmap(10, 10), placement_for(geometry, 10, 10))
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidState(_)));
    }

    #[test]
    fn zero_page_finalize_is_a_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.pdf");

        let mut writer = DocumentWriter::create(&dest, "empty").unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&bytes).expect("parseable empty document");
        assert_eq!(doc.get_pages().len(), 0);
    }
}
