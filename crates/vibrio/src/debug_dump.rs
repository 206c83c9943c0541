//! Per-invocation stage statistics for diagnosing colour ranges and gates.

use serde::{Deserialize, Serialize};

use crate::detector::ContourStats;

pub const DEBUG_SCHEMA: &str = "vibrio.debug.v1";

/// Statistics of one colour target through the mask → denoise → contour
/// stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDebug {
    pub label: String,
    /// Pixels inside the HSV range.
    pub mask_pixels: usize,
    /// Foreground pixels left after noise removal.
    pub denoised_pixels: usize,
    pub contours: ContourStats,
}

/// Debug dump for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugDump {
    pub schema: String,
    /// Input image dimensions [width, height].
    pub input_size: [u32; 2],
    /// Working image dimensions after resize [width, height].
    pub working_size: [u32; 2],
    /// Millimetres per working-frame pixel.
    pub mm_per_pixel: f64,
    pub targets: Vec<TargetDebug>,
}

impl DebugDump {
    pub(crate) fn new(input_size: [u32; 2], working_size: [u32; 2], mm_per_pixel: f64) -> Self {
        Self {
            schema: DEBUG_SCHEMA.to_string(),
            input_size,
            working_size,
            mm_per_pixel,
            targets: Vec::new(),
        }
    }

    /// Total accepted detections over all targets.
    pub fn n_accepted(&self) -> usize {
        self.targets.iter().map(|t| t.contours.n_accepted).sum()
    }
}
