//! Page geometry selection and scale-to-fit placement.
//!
//! Every page is US Letter in PostScript points — 612×792 portrait or
//! 792×612 landscape — with a fixed half-inch (36 pt) margin on all four
//! sides. The orientation is chosen per image from its corrected pixel
//! dimensions, so a mixed input sequence produces a mixed-orientation
//! document.
//!
//! This module is pure math: no I/O, no pixel access, nothing but the two
//! decisions the page compositor makes — which geometry, and where the
//! bitmap lands on it.

/// Margin on every page edge, in points (half an inch).
pub const MARGIN_PT: f32 = 36.0;

/// Dimensions of one output page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageGeometry {
    /// US Letter, portrait.
    pub const PORTRAIT: Self = Self {
        width_pt: 612.0,
        height_pt: 792.0,
    };

    /// US Letter, landscape.
    pub const LANDSCAPE: Self = Self {
        width_pt: 792.0,
        height_pt: 612.0,
    };

    /// Choose the page orientation for an image of the given pixel size.
    ///
    /// Height ≥ width selects portrait, so square images land on portrait
    /// pages; anything wider than tall gets landscape.
    pub fn for_image(width: u32, height: u32) -> Self {
        if height >= width {
            Self::PORTRAIT
        } else {
            Self::LANDSCAPE
        }
    }

    /// Width of the printable area (page minus both margins).
    pub fn printable_width(&self) -> f32 {
        self.width_pt - 2.0 * MARGIN_PT
    }

    /// Height of the printable area (page minus both margins).
    pub fn printable_height(&self) -> f32 {
        self.height_pt - 2.0 * MARGIN_PT
    }

    /// Whether this geometry is the portrait preset.
    pub fn is_portrait(&self) -> bool {
        self.height_pt > self.width_pt
    }
}

/// Where a bitmap lands on its page: a uniform scale and the lower-left
/// origin of the scaled image, in points.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Points per pixel. May exceed 1.0 — small images are scaled up until
    /// the constraining axis fills the printable area.
    pub scale: f32,
    /// Horizontal origin of the scaled image on the page.
    pub x_pt: f32,
    /// Vertical origin of the scaled image on the page.
    pub y_pt: f32,
}

impl Placement {
    /// Compute the centered scale-to-fit placement for an image on `geometry`.
    ///
    /// The scale is the minimum of the two axis-wise fit ratios, so the
    /// image fits the printable area entirely, undistorted, touching it on
    /// at least one axis. Returns `None` for a zero-area image — that check
    /// must happen here, before the ratios divide by the dimensions.
    pub fn compute(geometry: PageGeometry, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let scale = (geometry.printable_width() / width as f32)
            .min(geometry.printable_height() / height as f32);

        let x_pt = (geometry.width_pt - width as f32 * scale) / 2.0;
        let y_pt = (geometry.height_pt - height as f32 * scale) / 2.0;

        Some(Self { scale, x_pt, y_pt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    // ── Orientation rule ──

    #[test]
    fn taller_than_wide_selects_portrait() {
        assert_eq!(PageGeometry::for_image(600, 800), PageGeometry::PORTRAIT);
    }

    #[test]
    fn wider_than_tall_selects_landscape() {
        assert_eq!(PageGeometry::for_image(800, 600), PageGeometry::LANDSCAPE);
    }

    #[test]
    fn square_selects_portrait() {
        assert_eq!(PageGeometry::for_image(800, 800), PageGeometry::PORTRAIT);
    }

    #[test]
    fn printable_area_is_positive() {
        for geometry in [PageGeometry::PORTRAIT, PageGeometry::LANDSCAPE] {
            assert!(geometry.printable_width() > 0.0);
            assert!(geometry.printable_height() > 0.0);
        }
    }

    // ── Scale-to-fit invariants ──

    #[test]
    fn scaled_image_fits_and_touches_one_axis() {
        for (w, h) in [(800u32, 600u32), (600, 800), (800, 800), (3000, 50), (50, 3000)] {
            let geometry = PageGeometry::for_image(w, h);
            let p = Placement::compute(geometry, w, h).unwrap();

            let scaled_w = w as f32 * p.scale;
            let scaled_h = h as f32 * p.scale;

            assert!(scaled_w <= geometry.printable_width() + EPS, "{w}x{h}");
            assert!(scaled_h <= geometry.printable_height() + EPS, "{w}x{h}");

            let touches_w = (scaled_w - geometry.printable_width()).abs() < EPS;
            let touches_h = (scaled_h - geometry.printable_height()).abs() < EPS;
            assert!(touches_w || touches_h, "{w}x{h} fills neither axis");
        }
    }

    #[test]
    fn placement_is_centered() {
        for (w, h) in [(800u32, 600u32), (123, 457), (10, 10)] {
            let geometry = PageGeometry::for_image(w, h);
            let p = Placement::compute(geometry, w, h).unwrap();

            let scaled_w = w as f32 * p.scale;
            let scaled_h = h as f32 * p.scale;

            assert!(
                (p.x_pt + scaled_w / 2.0 - geometry.width_pt / 2.0).abs() < EPS,
                "{w}x{h} off-center horizontally"
            );
            assert!(
                (p.y_pt + scaled_h / 2.0 - geometry.height_pt / 2.0).abs() < EPS,
                "{w}x{h} off-center vertically"
            );
        }
    }

    #[test]
    fn small_images_are_upscaled() {
        // A 54×72 image in a 540×720 printable area scales 10×.
        let p = Placement::compute(PageGeometry::PORTRAIT, 54, 72).unwrap();
        assert!((p.scale - 10.0).abs() < EPS, "scale = {}", p.scale);
    }

    #[test]
    fn margins_are_respected() {
        let geometry = PageGeometry::PORTRAIT;
        let p = Placement::compute(geometry, 1080, 1440).unwrap();
        // Same 3:4 aspect as the printable area, so both axes touch the margin.
        assert!((p.x_pt - MARGIN_PT).abs() < EPS);
        assert!((p.y_pt - MARGIN_PT).abs() < EPS);
    }

    // ── Degenerate input ──

    #[test]
    fn zero_width_is_rejected() {
        assert!(Placement::compute(PageGeometry::PORTRAIT, 0, 100).is_none());
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(Placement::compute(PageGeometry::PORTRAIT, 100, 0).is_none());
    }
}
