//! Image normalization: decode, correct orientation, resolve transparency.
//!
//! Phone cameras record rotation in the EXIF orientation tag (0x0112)
//! instead of rotating pixels; the `image` decoders hand back the raw
//! buffer with the tag untouched. PDF viewers would show those photos
//! sideways, so the tag is read from the original bytes with `kamadak-exif`
//! and applied here, after which the normalized image carries no
//! orientation metadata at all — it is already upright.
//!
//! Transparency is resolved the same way the page will be printed: PDF
//! pages have a white background, so alpha-bearing pixels are composited
//! over opaque white (src-over, per channel) and the alpha channel is
//! dropped. The normalized result is always an RGB8 raster.

use crate::error::ConvertError;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use tracing::debug;

/// An opaque, correctly-oriented raster ready for page placement.
///
/// Owned by a single pipeline iteration and dropped as soon as its page has
/// been appended; the pipeline never holds more than one of these alive.
#[derive(Debug)]
pub struct NormalizedImage {
    /// Fully opaque pixel data in RGB8.
    pub image: RgbImage,
}

impl NormalizedImage {
    /// Pixel width after orientation correction.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height after orientation correction.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Pixel-model classification, resolved once per image at decode time.
///
/// Each variant maps to exactly one normalization procedure. Paletted
/// sources with a transparent index arrive through [`Transparency::Alpha`]:
/// the `image` decoders expand palette + tRNS into RGBA before any pixel is
/// visible to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// No alpha channel; direct conversion to RGB8.
    Opaque,
    /// Alpha channel present; composite over white, then drop alpha.
    Alpha,
}

impl Transparency {
    /// Classify a decoded image by its pixel model.
    pub fn classify(image: &DynamicImage) -> Self {
        if image.color().has_alpha() {
            Transparency::Alpha
        } else {
            Transparency::Opaque
        }
    }
}

/// Load one source image and normalize it for page placement.
///
/// Fails with [`ConvertError::Load`] when the file is missing, unreadable,
/// or not decodable by any enabled format (PNG, JPEG, BMP, TIFF). Detection
/// is by content, not extension — a PNG named `.jpg` decodes fine.
pub fn load_image(path: &Path) -> Result<NormalizedImage, ConvertError> {
    let bytes = std::fs::read(path).map_err(|err| ConvertError::Load {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|err| ConvertError::Load {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    let orientation = read_exif_orientation(&bytes);
    let oriented = apply_orientation(decoded, orientation);

    let transparency = Transparency::classify(&oriented);
    let image = match transparency {
        Transparency::Alpha => flatten_onto_white(&oriented.to_rgba8()),
        Transparency::Opaque => oriented.to_rgb8(),
    };

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        orientation,
        ?transparency,
        "image normalized"
    );

    Ok(NormalizedImage { image })
}

/// Read the EXIF orientation tag from raw image bytes.
///
/// Returns 1 (upright) when there is no EXIF data or no orientation field —
/// PNG and BMP files land here, as do most scanner outputs.
pub fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let reader = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(r) => r,
        Err(_) => return 1,
    };

    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

/// Apply an EXIF orientation value to a decoded image.
///
/// The eight defined values cover rotation, mirroring, and their
/// combinations; anything out of range is treated as upright.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        1 => img,
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Composite an RGBA raster over opaque white and drop the alpha channel.
///
/// Per channel: `out = src * a + 255 * (1 - a)` with `a` in [0, 1],
/// rounded to the nearest integer.
fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        let over = |src: u8| -> u8 {
            ((src as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        out.put_pixel(x, y, Rgb([over(r), over(g), over(b)]));
    }

    out
}
