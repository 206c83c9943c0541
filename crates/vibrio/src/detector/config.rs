use std::path::Path;

use crate::color::ColorTarget;
use crate::error::DetectError;
use crate::geometry::PlateCalibration;

/// Default bound on the longer side of the working image (pixels).
pub const DEFAULT_MAX_IMAGE_SIZE: u32 = 480;

/// Aspect-ratio gate applied to contour bounding rectangles.
///
/// Colonies are roughly round, so rectangles much wider than tall (or the
/// reverse) are treated as streaks, plate rims or glare.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeFilter {
    /// Smallest accepted `width / height` (inclusive).
    pub min_aspect_ratio: f64,
    /// Largest accepted `width / height` (inclusive).
    pub max_aspect_ratio: f64,
}

impl Default for ShapeFilter {
    fn default() -> Self {
        Self {
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 1.5,
        }
    }
}

impl ShapeFilter {
    #[inline]
    pub fn accepts(&self, aspect_ratio: f64) -> bool {
        self.min_aspect_ratio <= aspect_ratio && aspect_ratio <= self.max_aspect_ratio
    }
}

/// Top-level detection configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Bound on the longer side of the working image; inputs are resized so
    /// that side equals this value.
    pub max_image_size: u32,
    /// Colour classes, each masked and detected independently, results
    /// concatenated in this order.
    pub targets: Vec<ColorTarget>,
    /// Physical reference used for size estimation.
    pub calibration: PlateCalibration,
    /// Aspect-ratio gate for candidate regions.
    pub shape_filter: ShapeFilter,
    /// Report boxes normalized to `[0, 1]` instead of working-frame pixels.
    pub normalize_output: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            targets: vec![ColorTarget::vibrio_yellow()],
            calibration: PlateCalibration::default(),
            shape_filter: ShapeFilter::default(),
            normalize_output: true,
        }
    }
}

impl DetectConfig {
    /// Default configuration with a different working-size bound.
    pub fn with_max_image_size(max_image_size: u32) -> Self {
        Self {
            max_image_size,
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration; missing fields take
    /// their defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self, DetectError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DetectError::config(format!("malformed config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, DetectError> {
        let data = std::fs::read_to_string(path).map_err(|source| DetectError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Check every field that would make detection meaningless.
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.max_image_size == 0 {
            return Err(DetectError::config("max_image_size must be > 0"));
        }
        if self.targets.is_empty() {
            return Err(DetectError::config("at least one colour target is required"));
        }
        if let Some(t) = self.targets.iter().find(|t| t.label.trim().is_empty()) {
            return Err(DetectError::config(format!(
                "colour target with range {:?}..{:?} has an empty label",
                t.range.lower, t.range.upper
            )));
        }
        let d = self.calibration.reference_diameter_mm;
        if !d.is_finite() || d <= 0.0 {
            return Err(DetectError::config(format!(
                "reference_diameter_mm must be finite and > 0, got {d}"
            )));
        }
        let sf = &self.shape_filter;
        if !sf.min_aspect_ratio.is_finite()
            || !sf.max_aspect_ratio.is_finite()
            || sf.min_aspect_ratio <= 0.0
            || sf.min_aspect_ratio > sf.max_aspect_ratio
        {
            return Err(DetectError::config(format!(
                "aspect ratio gate must satisfy 0 < min <= max, got [{}, {}]",
                sf.min_aspect_ratio, sf.max_aspect_ratio
            )));
        }
        for t in &self.targets {
            let inverted = t.range.inverted_channels();
            if !inverted.is_empty() {
                tracing::warn!(
                    "colour target '{}' has lower > upper on channel(s) {:?}; it will match nothing",
                    t.label,
                    inverted
                );
            }
        }
        Ok(())
    }

    /// Labels of the configured targets, in detection order.
    pub fn target_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.targets.iter().map(|t| t.label.as_str())
    }
}
