//! Pixel geometry: upright bounding rectangles and pixel-to-millimetre sizing.
//!
//! Size estimation is a deliberate approximation. The culture plate is a
//! circle of known diameter assumed to span the image's shorter side, which
//! fixes a millimetres-per-pixel scale; a region's longer side then stands in
//! for its diameter. Rotated or partially occluded colonies are therefore
//! still sized by their largest extent.

use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Inner diameter of the reference plate in millimetres (area 7854 mm²).
pub const PLATE_DIAMETER_MM: f64 = 99.96;

/// Physical reference used to convert pixel extents into millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateCalibration {
    /// Diameter of the circular reference object spanning the image's
    /// shorter side.
    pub reference_diameter_mm: f64,
}

impl Default for PlateCalibration {
    fn default() -> Self {
        Self {
            reference_diameter_mm: PLATE_DIAMETER_MM,
        }
    }
}

impl PlateCalibration {
    pub fn new(reference_diameter_mm: f64) -> Self {
        Self {
            reference_diameter_mm,
        }
    }

    /// Millimetres covered by one pixel of an image with shape `(h, w)`.
    ///
    /// Returns 0.0 for an image with a zero side.
    pub fn mm_per_pixel(&self, image_shape: (u32, u32)) -> f64 {
        let shorter = image_shape.0.min(image_shape.1);
        if shorter == 0 {
            return 0.0;
        }
        self.reference_diameter_mm / f64::from(shorter)
    }

    /// Estimated diameter (mm) of a region with shape `(h, w)` found in an
    /// image with shape `(h, w)`.
    pub fn estimate_size(&self, image_shape: (u32, u32), region_shape: (u32, u32)) -> f64 {
        let longer = region_shape.0.max(region_shape.1);
        f64::from(longer) * self.mm_per_pixel(image_shape)
    }
}

/// [`PlateCalibration::estimate_size`] with the default plate diameter.
pub fn estimate_size(image_shape: (u32, u32), region_shape: (u32, u32)) -> f64 {
    PlateCalibration::default().estimate_size(image_shape, region_shape)
}

/// Upright rectangle in pixel units; `(x, y)` is the top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// Smallest rectangle covering every point, counting pixels inclusively.
    ///
    /// Returns `None` for an empty point set or points with negative
    /// coordinates.
    pub fn from_points(points: &[Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if min_x < 0 || min_y < 0 {
            return None;
        }
        Some(Self {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// `true` when either side is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `width / height`, or `None` for a degenerate rectangle.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }

    /// Shape as `(height, width)`.
    pub fn shape(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// Corners as `[x1, y1, x2, y2]` with exclusive far edge.
    pub fn corners(&self) -> [u32; 4] {
        [
            self.x,
            self.y,
            self.x + self.width,
            self.y + self.height,
        ]
    }
}
