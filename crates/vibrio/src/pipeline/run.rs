//! Top-level pipeline orchestrator: resize → mask → denoise → contour.

use image::{GrayImage, RgbImage};

use super::DetectionResult;
use crate::color::ColorTarget;
use crate::debug_dump::{DebugDump, TargetDebug};
use crate::detector::{detect_by_contour, detect_by_contour_with_stats, DetectConfig};
use crate::error::DetectError;
use crate::morphology::remove_noise;
use crate::preprocess::{count_foreground, ensure_non_empty, mask_image, resize_keep_ratio};

/// Validate the input and bring it to the working resolution.
fn working_image(image: &RgbImage, config: &DetectConfig) -> Result<RgbImage, DetectError> {
    let (w, h) = image.dimensions();
    ensure_non_empty(w, h)?;
    let working = resize_keep_ratio(image, config.max_image_size)?;
    tracing::debug!(
        "working image {}x{} (input {}x{})",
        working.width(),
        working.height(),
        w,
        h
    );
    Ok(working)
}

/// Colour mask of one target after noise removal.
fn target_mask(working: &RgbImage, target: &ColorTarget) -> GrayImage {
    remove_noise(&mask_image(working, &target.range))
}

fn log_summary(result: &DetectionResult, config: &DetectConfig) {
    for (label, n) in result.count_by_class(config.target_labels()) {
        tracing::debug!("{}: {} detections", label, n);
    }
}

/// Run every configured target and concatenate the detections.
pub(crate) fn detect(
    image: &RgbImage,
    config: &DetectConfig,
) -> Result<DetectionResult, DetectError> {
    let working = working_image(image, config)?;
    let (w, h) = working.dimensions();
    let mut result = DetectionResult::empty(w, h, config.normalize_output);
    for target in &config.targets {
        let mask = target_mask(&working, target);
        result.append(detect_by_contour(&mask, &target.label, config));
    }
    log_summary(&result, config);
    Ok(result)
}

/// [`detect`] plus per-target stage statistics.
pub(crate) fn detect_with_debug(
    image: &RgbImage,
    config: &DetectConfig,
) -> Result<(DetectionResult, DebugDump), DetectError> {
    let working = working_image(image, config)?;
    let (w, h) = working.dimensions();
    let mut dump = DebugDump::new(
        [image.width(), image.height()],
        [w, h],
        config.calibration.mm_per_pixel((h, w)),
    );
    let mut result = DetectionResult::empty(w, h, config.normalize_output);

    for target in &config.targets {
        let mask = mask_image(&working, &target.range);
        let denoised = remove_noise(&mask);
        let (target_result, contours) =
            detect_by_contour_with_stats(&denoised, &target.label, config);
        dump.targets.push(TargetDebug {
            label: target.label.clone(),
            mask_pixels: count_foreground(&mask),
            denoised_pixels: count_foreground(&denoised),
            contours,
        });
        result.append(target_result);
    }

    log_summary(&result, config);
    Ok((result, dump))
}

/// Denoised foreground mask of one target at the working resolution.
pub(crate) fn preprocess(
    image: &RgbImage,
    config: &DetectConfig,
    target: &ColorTarget,
) -> Result<GrayImage, DetectError> {
    let working = working_image(image, config)?;
    Ok(target_mask(&working, target))
}
