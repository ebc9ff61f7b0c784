//! Crop region geometry.
//!
//! Regions are normally kept in percent of the image so they survive
//! the image being displayed at a different size than its natural
//! resolution. Pixel conversion happens only when rasterizing.
//!
//! The initial region follows the usual aspect-crop recipe: take a width
//! equal to [`MIN_DIMENSION`] pixels, derive the height from the aspect
//! ratio, shrink to fit the image, then center.

use serde::{Deserialize, Serialize};

/// Width / height ratio enforced on every region.
pub const ASPECT_RATIO: f64 = 1.0;

/// Smallest allowed crop side, in natural image pixels.
pub const MIN_DIMENSION: f64 = 150.0;

/// Natural image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Units a [`CropRegion`] is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropUnit {
    /// Percent of the image's width (for `x`/`width`) or height (for `y`/`height`).
    #[default]
    Percent,
    /// Absolute pixels.
    Pixels,
}

/// A crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Unit of all four fields.
    pub unit: CropUnit,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CropRegion {
    /// A region in percent units.
    #[must_use]
    pub const fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Percent,
            x,
            y,
            width,
            height,
        }
    }

    /// A region in pixel units.
    #[must_use]
    pub const fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Pixels,
            x,
            y,
            width,
            height,
        }
    }

    /// Express this region in percent of an image of size `w`×`h`.
    #[must_use]
    pub fn to_percent(self, w: f64, h: f64) -> Self {
        match self.unit {
            CropUnit::Percent => self,
            CropUnit::Pixels => Self::percent(
                self.x / w * 100.0,
                self.y / h * 100.0,
                self.width / w * 100.0,
                self.height / h * 100.0,
            ),
        }
    }
}

/// A crop rectangle in absolute pixels, always inside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PixelRect {
    /// Snap to whole pixels for cropping a raster of size `bounds`.
    ///
    /// Edges are rounded independently so adjacent crops tile without
    /// gaps; the result never extends past `bounds`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn snap(self, bounds: Dimensions) -> (u32, u32, u32, u32) {
        let max_x = f64::from(bounds.width);
        let max_y = f64::from(bounds.height);
        let left = finite_or_zero(self.x.round()).clamp(0.0, max_x);
        let top = finite_or_zero(self.y.round()).clamp(0.0, max_y);
        let right = finite_or_zero((self.x + self.width).round()).clamp(left, max_x);
        let bottom = finite_or_zero((self.y + self.height).round()).clamp(top, max_y);
        (
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

/// Convert `region` to pixels against an image of `width`×`height`.
///
/// The result is clamped so it lies within `[0, width] × [0, height]`
/// even if the region was dragged partly outside. Non-finite or negative
/// image sizes are treated as zero.
#[must_use]
pub fn to_pixel_rect(region: &CropRegion, width: f64, height: f64) -> PixelRect {
    let width = finite_or_zero(width).max(0.0);
    let height = finite_or_zero(height).max(0.0);
    let (x, y, w, h) = match region.unit {
        CropUnit::Pixels => (region.x, region.y, region.width, region.height),
        CropUnit::Percent => (
            region.x / 100.0 * width,
            region.y / 100.0 * height,
            region.width / 100.0 * width,
            region.height / 100.0 * height,
        ),
    };
    let x = finite_or_zero(x).clamp(0.0, width);
    let y = finite_or_zero(y).clamp(0.0, height);
    PixelRect {
        x,
        y,
        width: finite_or_zero(w).clamp(0.0, width - x),
        height: finite_or_zero(h).clamp(0.0, height - y),
    }
}

const fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Build a percent region of the given width with its height derived
/// from `aspect`, shrunk (aspect preserved) until it fits an image of
/// `media_width`×`media_height` anchored at the origin.
#[must_use]
pub fn make_aspect_crop(
    width_percent: f64,
    aspect: f64,
    media_width: f64,
    media_height: f64,
) -> CropRegion {
    let mut w = width_percent / 100.0 * media_width;
    let mut h = w / aspect;
    if h > media_height {
        h = media_height;
        w = h * aspect;
    }
    if w > media_width {
        w = media_width;
        h = w / aspect;
    }
    CropRegion::pixels(0.0, 0.0, w, h).to_percent(media_width, media_height)
}

/// Center a percent region within the image.
#[must_use]
pub fn center_crop(region: CropRegion, media_width: f64, media_height: f64) -> CropRegion {
    let r = region.to_percent(media_width, media_height);
    CropRegion::percent(
        (100.0 - r.width) / 2.0,
        (100.0 - r.height) / 2.0,
        r.width,
        r.height,
    )
}

/// The starting region for a freshly loaded image: a centered square
/// [`MIN_DIMENSION`] pixels wide, or the largest centered square when
/// the image is smaller than that.
#[must_use]
pub fn initialize_crop(natural_width: u32, natural_height: u32) -> CropRegion {
    let w = f64::from(natural_width);
    let h = f64::from(natural_height);
    let width_percent = MIN_DIMENSION / w * 100.0;
    center_crop(make_aspect_crop(width_percent, ASPECT_RATIO, w, h), w, h)
}

/// Owns the live crop region for whichever image is in the cropper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropAdapter {
    loaded: Option<(u64, Dimensions)>,
    region: Option<CropRegion>,
}

impl CropAdapter {
    /// Create an adapter with no image loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify that image `image_id` finished loading in the cropper.
    ///
    /// Computes a fresh centered region the first time a given image is
    /// seen; later calls for the same image keep the user's edits.
    pub fn image_loaded(&mut self, image_id: u64, natural: Dimensions) -> CropRegion {
        if let (Some((id, _)), Some(region)) = (self.loaded, self.region)
            && id == image_id
        {
            return region;
        }
        let region = initialize_crop(natural.width, natural.height);
        tracing::debug!(image_id, ?natural, ?region, "initialized crop region");
        self.loaded = Some((image_id, natural));
        self.region = Some(region);
        region
    }

    /// Replace the live region.
    pub fn update_crop(&mut self, region: CropRegion) {
        self.region = Some(region);
    }

    /// The live region, if an image is loaded.
    #[must_use]
    pub const fn region(&self) -> Option<CropRegion> {
        self.region
    }

    /// Natural size of the loaded image.
    #[must_use]
    pub fn natural(&self) -> Option<Dimensions> {
        self.loaded.map(|(_, d)| d)
    }

    /// Drop the loaded image and its region.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Translate the region by a percent offset, keeping it inside the image.
    pub fn move_by(&mut self, dx_percent: f64, dy_percent: f64) {
        let (Some(natural), Some(region)) = (self.natural(), self.region) else {
            return;
        };
        let r = region.to_percent(f64::from(natural.width), f64::from(natural.height));
        self.region = Some(CropRegion::percent(
            (r.x + dx_percent).clamp(0.0, (100.0 - r.width).max(0.0)),
            (r.y + dy_percent).clamp(0.0, (100.0 - r.height).max(0.0)),
            r.width,
            r.height,
        ));
    }

    /// Grow or shrink the region from its top-left anchor by a percent of
    /// the image width, keeping the aspect lock, the minimum side, and
    /// the image bounds.
    pub fn resize_by(&mut self, dw_percent: f64) {
        let (Some(natural), Some(region)) = (self.natural(), self.region) else {
            return;
        };
        let mw = f64::from(natural.width);
        let mh = f64::from(natural.height);
        let px = to_pixel_rect(&region, mw, mh);

        let max_w = (mw - px.x).min((mh - px.y) * ASPECT_RATIO);
        let min_w = MIN_DIMENSION.max(MIN_DIMENSION * ASPECT_RATIO).min(max_w);
        let w = dw_percent
            .mul_add(mw / 100.0, px.width)
            .clamp(min_w, max_w);
        let h = w / ASPECT_RATIO;

        self.region = Some(CropRegion::pixels(px.x, px.y, w, h).to_percent(mw, mh));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pixel_size(region: &CropRegion, w: u32, h: u32) -> PixelRect {
        to_pixel_rect(region, f64::from(w), f64::from(h))
    }

    #[test]
    fn initial_crop_is_min_square_centered() {
        let region = initialize_crop(600, 400);
        assert_eq!(region.unit, CropUnit::Percent);
        assert!((region.width - 25.0).abs() < EPS);
        assert!((region.height - 37.5).abs() < EPS);
        assert!((region.x - 37.5).abs() < EPS);
        assert!((region.y - 31.25).abs() < EPS);
    }

    #[test]
    fn initial_crop_honors_min_dimension_and_aspect() {
        let sizes = [
            (150, 150),
            (151, 900),
            (4000, 3000),
            (150, 2000),
            (2000, 150),
            (333, 777),
        ];
        for (w, h) in sizes {
            let px = pixel_size(&initialize_crop(w, h), w, h);
            assert!(px.width >= MIN_DIMENSION - EPS, "{w}x{h}: width {}", px.width);
            assert!(px.height >= MIN_DIMENSION - EPS, "{w}x{h}: height {}", px.height);
            assert!(
                (px.width / px.height - ASPECT_RATIO).abs() < 1e-6,
                "{w}x{h}: aspect {}",
                px.width / px.height
            );
        }
    }

    #[test]
    fn small_image_gets_largest_square() {
        let px = pixel_size(&initialize_crop(100, 80), 100, 80);
        assert!((px.width - 80.0).abs() < EPS);
        assert!((px.height - 80.0).abs() < EPS);
        assert!((px.x - 10.0).abs() < EPS);
        assert!(px.y.abs() < EPS);
    }

    #[test]
    fn pixel_rect_is_contained() {
        let cases = [
            CropRegion::percent(10.0, 10.0, 50.0, 50.0),
            CropRegion::percent(80.0, 90.0, 50.0, 50.0),
            CropRegion::percent(-5.0, -20.0, 120.0, 130.0),
            CropRegion::pixels(900.0, 10.0, 300.0, 300.0),
            CropRegion::percent(f64::NAN, 0.0, f64::INFINITY, 10.0),
        ];
        let (w, h) = (640.0, 480.0);
        for region in cases {
            let r = to_pixel_rect(&region, w, h);
            assert!(r.x >= 0.0 && r.y >= 0.0, "{region:?} -> {r:?}");
            assert!(r.x + r.width <= w + EPS, "{region:?} -> {r:?}");
            assert!(r.y + r.height <= h + EPS, "{region:?} -> {r:?}");
            assert!(r.width >= 0.0 && r.height >= 0.0, "{region:?} -> {r:?}");
        }
    }

    #[test]
    fn degenerate_image_size_yields_empty_rect() {
        let region = CropRegion::percent(10.0, 10.0, 50.0, 50.0);
        for (w, h) in [(f64::NAN, 100.0), (-1.0, 100.0), (100.0, f64::INFINITY)] {
            let r = to_pixel_rect(&region, w, h);
            assert!(r.x.is_finite() && r.y.is_finite(), "{w}x{h} -> {r:?}");
            assert!(r.width >= 0.0 && r.height >= 0.0, "{w}x{h} -> {r:?}");
        }
        assert!(to_pixel_rect(&region, -1.0, 100.0).width.abs() < EPS);
    }

    #[test]
    fn snap_tolerates_nan_edges() {
        let rect = PixelRect {
            x: f64::NAN,
            y: 5.0,
            width: 10.0,
            height: f64::NAN,
        };
        let (x, _, w, h) = rect.snap(Dimensions::new(20, 20));
        assert_eq!((x, w, h), (0, 0, 0));
    }

    #[test]
    fn percent_to_pixels() {
        let r = to_pixel_rect(&CropRegion::percent(25.0, 50.0, 50.0, 25.0), 200.0, 400.0);
        assert_eq!(
            r,
            PixelRect {
                x: 50.0,
                y: 200.0,
                width: 100.0,
                height: 100.0
            }
        );
    }

    #[test]
    fn snap_stays_in_bounds() {
        let rect = PixelRect {
            x: 10.4,
            y: 0.6,
            width: 89.9,
            height: 99.9,
        };
        let (x, y, w, h) = rect.snap(Dimensions::new(100, 100));
        assert_eq!((x, y), (10, 1));
        assert!(x + w <= 100 && y + h <= 100);
    }

    #[test]
    fn adapter_initializes_once_per_image() {
        let mut adapter = CropAdapter::new();
        let dims = Dimensions::new(600, 600);
        let first = adapter.image_loaded(1, dims);

        let edited = CropRegion::percent(0.0, 0.0, 50.0, 50.0);
        adapter.update_crop(edited);
        assert_eq!(adapter.image_loaded(1, dims), edited, "same image keeps edits");

        let next = adapter.image_loaded(2, dims);
        assert_eq!(next, first, "new image recomputes the centered region");
    }

    #[test]
    fn move_is_clamped_to_image() {
        let mut adapter = CropAdapter::new();
        adapter.image_loaded(1, Dimensions::new(300, 300));
        adapter.move_by(500.0, -500.0);
        let r = adapter.region().unwrap();
        assert!((r.x - 50.0).abs() < EPS);
        assert!(r.y.abs() < EPS);
    }

    #[test]
    fn resize_keeps_aspect_min_and_bounds() {
        let mut adapter = CropAdapter::new();
        let dims = Dimensions::new(400, 300);
        adapter.image_loaded(1, dims);

        adapter.resize_by(-100.0);
        let px = to_pixel_rect(&adapter.region().unwrap(), 400.0, 300.0);
        assert!((px.width - MIN_DIMENSION).abs() < 1e-6);
        assert!((px.height - MIN_DIMENSION).abs() < 1e-6);

        adapter.resize_by(1000.0);
        let px = to_pixel_rect(&adapter.region().unwrap(), 400.0, 300.0);
        assert!(px.y + px.height <= 300.0 + 1e-6);
        assert!(px.x + px.width <= 400.0 + 1e-6);
        assert!((px.width - px.height).abs() < 1e-6);
    }
}
