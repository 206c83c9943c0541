//! Contour-based region detection on a denoised foreground mask.
//!
//! Borders of every foreground region (outer borders and hole borders, full
//! hierarchy) are traced in raster discovery order. Each border's upright
//! bounding rectangle is gated by aspect ratio, sized against the plate
//! calibration and emitted as one box.

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};

use super::config::DetectConfig;
use crate::geometry::BoundingRect;
use crate::pipeline::{BoxAttribute, DetectionResult};

/// Per-mask contour statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContourStats {
    /// Borders traced in the mask.
    pub n_contours: usize,
    /// Borders skipped because they had no usable rectangle.
    pub n_degenerate: usize,
    /// Borders rejected by the aspect-ratio gate.
    pub n_rejected_aspect: usize,
    /// Borders emitted as detections.
    pub n_accepted: usize,
}

/// Trace all region borders of a mask (nonzero = foreground).
///
/// The mask is traced inside a one-pixel background frame so regions that
/// touch the image border, up to the whole frame, still get an outer border.
/// Returned points are in mask coordinates.
pub fn find_region_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    let (w, h) = mask.dimensions();
    let mut padded = GrayImage::new(w + 2, h + 2);
    image::imageops::replace(&mut padded, mask, 1, 1);

    let mut contours = find_contours::<i32>(&padded);
    for p in contours.iter_mut().flat_map(|c| c.points.iter_mut()) {
        p.x -= 1;
        p.y -= 1;
    }
    contours
}

/// Detect regions in `mask` and label them `class_label`.
///
/// See [`detect_by_contour_with_stats`].
pub fn detect_by_contour(
    mask: &GrayImage,
    class_label: &str,
    config: &DetectConfig,
) -> DetectionResult {
    detect_by_contour_with_stats(mask, class_label, config).0
}

/// Detect regions in `mask`, also returning per-stage contour counts.
///
/// Boxes are `(x, y, x + w, y + h)` in mask pixels, divided by the mask
/// width/height when `config.normalize_output` is set. Order follows contour
/// discovery. A mask without foreground yields an empty result.
pub fn detect_by_contour_with_stats(
    mask: &GrayImage,
    class_label: &str,
    config: &DetectConfig,
) -> (DetectionResult, ContourStats) {
    let contours = find_region_contours(mask);
    let (result, stats) = boxes_from_contours(&contours, mask.dimensions(), class_label, config);

    tracing::debug!(
        "{}: {} contours, {} accepted, {} rejected by aspect, {} degenerate",
        class_label,
        stats.n_contours,
        stats.n_accepted,
        stats.n_rejected_aspect,
        stats.n_degenerate,
    );

    (result, stats)
}

/// Gate, size and emit traced borders of a `(width, height)` mask.
pub(crate) fn boxes_from_contours(
    contours: &[Contour<i32>],
    (img_w, img_h): (u32, u32),
    class_label: &str,
    config: &DetectConfig,
) -> (DetectionResult, ContourStats) {
    let normalize = config.normalize_output;
    let mut result = DetectionResult::empty(img_w, img_h, normalize);
    let mut stats = ContourStats {
        n_contours: contours.len(),
        ..Default::default()
    };

    for contour in contours {
        let Some((rect, aspect)) = BoundingRect::from_points(&contour.points)
            .and_then(|r| r.aspect_ratio().map(|a| (r, a)))
        else {
            stats.n_degenerate += 1;
            continue;
        };
        if !config.shape_filter.accepts(aspect) {
            stats.n_rejected_aspect += 1;
            continue;
        }

        let size_mm = config
            .calibration
            .estimate_size((img_h, img_w), rect.shape());
        let [x1, y1, x2, y2] = rect.corners().map(|v| v as f32);
        let bbox = if normalize {
            let (w, h) = (img_w as f32, img_h as f32);
            [x1 / w, y1 / h, x2 / w, y2 / h]
        } else {
            [x1, y1, x2, y2]
        };
        result.push(
            bbox,
            BoxAttribute {
                class_label: class_label.to_string(),
                size_mm,
            },
        );
        stats.n_accepted += 1;
    }

    (result, stats)
}
