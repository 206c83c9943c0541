//! High-level detection API.
//!
//! [`Detector`] is the primary entry point. It owns a validated
//! [`DetectConfig`]; create it once and run it on many images.

use image::{GrayImage, RgbImage};

use crate::debug_dump::DebugDump;
use crate::detector::DetectConfig;
use crate::error::DetectError;
use crate::pipeline::{self, DetectionResult};

/// Primary detection interface.
///
/// The detector holds no per-image state, so one instance can be shared
/// across threads and reused without reset.
///
/// # Examples
///
/// ```no_run
/// use vibrio::Detector;
///
/// let detector = Detector::with_max_image_size(480)?;
/// let image = image::open("plate.jpg").unwrap().to_rgb8();
/// let result = detector.detect(&image)?;
/// println!("Found {} colonies", result.len());
/// # Ok::<(), vibrio::DetectError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Create a detector, rejecting an unusable configuration.
    pub fn new(config: DetectConfig) -> Result<Self, DetectError> {
        config.validate()?;
        tracing::info!(
            "initializing detector: max_image_size={}, targets={:?}",
            config.max_image_size,
            config.target_labels().collect::<Vec<_>>()
        );
        Ok(Self { config })
    }

    /// Default configuration with a different working-size bound.
    pub fn with_max_image_size(max_image_size: u32) -> Result<Self, DetectError> {
        Self::new(DetectConfig::with_max_image_size(max_image_size))
    }

    /// Access the configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Detect colonies of every configured colour target in an RGB image.
    pub fn detect(&self, image: &RgbImage) -> Result<DetectionResult, DetectError> {
        pipeline::detect(image, &self.config)
    }

    /// Detect and collect per-stage statistics.
    pub fn detect_with_debug(
        &self,
        image: &RgbImage,
    ) -> Result<(DetectionResult, DebugDump), DetectError> {
        pipeline::detect_with_debug(image, &self.config)
    }

    /// Denoised foreground mask of target `target_index` at the working
    /// resolution, as fed to the contour stage.
    ///
    /// An index past the configured targets gives [`DetectError::TargetIndex`].
    pub fn preprocess(
        &self,
        image: &RgbImage,
        target_index: usize,
    ) -> Result<GrayImage, DetectError> {
        let target = self
            .config
            .targets
            .get(target_index)
            .ok_or(DetectError::TargetIndex {
                index: target_index,
                n_targets: self.config.targets.len(),
            })?;
        pipeline::preprocess(image, &self.config, target)
    }
}
