//! Detector building blocks: configuration and the contour stage.

mod config;
mod contour;

pub use config::{DetectConfig, ShapeFilter, DEFAULT_MAX_IMAGE_SIZE};
pub use contour::{
    detect_by_contour, detect_by_contour_with_stats, find_region_contours, ContourStats,
};
