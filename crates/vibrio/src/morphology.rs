//! Binary morphology on foreground masks.
//!
//! Foreground is any nonzero pixel. Both operators use a 3x3 all-ones
//! structuring element (L∞ radius 1) and one iteration; outputs are binary
//! (0 or 255). Pixels outside the image never count as background, so regions
//! touching the border are not eroded from that side.

use image::GrayImage;
use imageproc::distance_transform::Norm;

/// L∞ radius of the square structuring element.
const KERNEL_RADIUS: u8 = 1;

/// Shrink foreground regions: a pixel survives only if its whole 3x3
/// neighbourhood (within the image) is foreground.
pub fn erode(mask: &GrayImage) -> GrayImage {
    imageproc::morphology::erode(mask, Norm::LInf, KERNEL_RADIUS)
}

/// Grow foreground regions: a pixel becomes foreground if any pixel of its
/// 3x3 neighbourhood is foreground.
pub fn dilate(mask: &GrayImage) -> GrayImage {
    imageproc::morphology::dilate(mask, Norm::LInf, KERNEL_RADIUS)
}

/// Morphological opening: erosion followed by dilation.
///
/// Removes isolated pixels and features thinner than three pixels, then
/// restores surviving regions to their original extent.
pub fn remove_noise(mask: &GrayImage) -> GrayImage {
    dilate(&erode(mask))
}
