//! vibrio: colour-space detector and size estimator for vibrio colonies on
//! culture plate photographs.
//!
//! No learned model is involved. The pipeline stages are:
//!
//! 1. **Resize** – bound the longer image side, preserving aspect ratio.
//! 2. **Mask** – RGB → 8-bit HSV, keep pixels inside a colour target's range.
//! 3. **Denoise** – morphological opening (3x3 erosion then dilation).
//! 4. **Contours** – trace region borders, gate by bounding-box aspect ratio.
//! 5. **Size** – convert each region's longer side to millimetres using the
//!    plate diameter as the in-frame reference.
//!
//! Stages 2–4 run once per configured [`ColorTarget`]; the default
//! configuration has a single yellow target.
//!
//! # Public API
//! - [`Detector`] as the entry point, [`DetectConfig`] for tuning
//! - [`DetectionResult`] / [`BoxAttribute`] as output
//! - stage functions ([`resize_keep_ratio`], [`mask_image`], [`remove_noise`],
//!   [`detect_by_contour`], [`estimate_size`]) for callers composing their own
//!   flow
//! - [`overlay`] helpers for annotated output images

mod api;
mod color;
mod debug_dump;
mod detector;
mod error;
mod geometry;
mod morphology;
pub mod overlay;
mod pipeline;
mod preprocess;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::Detector;
pub use color::{
    luma, rgb_to_hsv, ColorTarget, HsvRange, HUE_MAX, VIBRIO_YELLOW_LABEL, VIBRIO_YELLOW_LOWER,
    VIBRIO_YELLOW_UPPER,
};
pub use debug_dump::{DebugDump, TargetDebug, DEBUG_SCHEMA};
pub use detector::{
    detect_by_contour, detect_by_contour_with_stats, find_region_contours, ContourStats,
    DetectConfig, ShapeFilter, DEFAULT_MAX_IMAGE_SIZE,
};
pub use error::DetectError;
pub use geometry::{estimate_size, BoundingRect, PlateCalibration, PLATE_DIAMETER_MM};
pub use morphology::{dilate, erode, remove_noise};
pub use pipeline::{BoxAttribute, DetectionResult};
pub use preprocess::{
    bounded_dimensions, count_foreground, mask_image, resize_keep_ratio, rgb_from_raw,
};
