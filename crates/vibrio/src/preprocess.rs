//! Image preprocessing: bounded resize, raw-buffer validation and HSV masking.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};

use crate::color::{luma, rgb_to_hsv, HsvRange};
use crate::error::DetectError;

/// Fail fast on an image with a zero side.
pub(crate) fn ensure_non_empty(width: u32, height: u32) -> Result<(), DetectError> {
    if width == 0 || height == 0 {
        return Err(DetectError::InputShape { width, height });
    }
    Ok(())
}

/// Build an [`RgbImage`] from an interleaved raw buffer.
///
/// Rejects zero dimensions, any channel count other than 3, and a buffer
/// whose length differs from `width * height * channels`.
pub fn rgb_from_raw(
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
) -> Result<RgbImage, DetectError> {
    ensure_non_empty(width, height)?;
    if channels != 3 {
        return Err(DetectError::ChannelCount { channels });
    }
    let expected = width as usize * height as usize * 3;
    let got = data.len();
    if got != expected {
        return Err(DetectError::BufferSize {
            width,
            height,
            expected,
            got,
        });
    }
    RgbImage::from_raw(width, height, data).ok_or(DetectError::BufferSize {
        width,
        height,
        expected,
        got,
    })
}

/// Working dimensions `(width, height)` after bounding the longer side to
/// `max_size`.
///
/// The longer side becomes exactly `max_size`; the shorter side is scaled by
/// the same factor and truncated (never below 1). A square image takes the
/// width branch.
pub fn bounded_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let scale = |short: u32, long: u32| -> u32 {
        let v = u64::from(short) * u64::from(max_size) / u64::from(long);
        (v as u32).max(1)
    };
    if height > width {
        (scale(width, height), max_size)
    } else {
        (max_size, scale(height, width))
    }
}

/// Resize so that the longer side equals `max_size`, preserving aspect ratio.
///
/// Images are always rescaled, including upsampling of small inputs.
pub fn resize_keep_ratio(image: &RgbImage, max_size: u32) -> Result<RgbImage, DetectError> {
    let (w, h) = image.dimensions();
    ensure_non_empty(w, h)?;
    if max_size == 0 {
        return Err(DetectError::config("max_image_size must be > 0"));
    }
    let (new_w, new_h) = bounded_dimensions(w, h, max_size);
    tracing::trace!("resize {}x{} -> {}x{}", w, h, new_w, new_h);
    Ok(imageops::resize(image, new_w, new_h, FilterType::Triangle))
}

/// Keep only pixels whose HSV value lies in `range` and reduce to luma.
///
/// The input is interpreted in RGB order. Pixels outside the range map to 0;
/// retained pixels keep their luma, so any nonzero output is foreground.
pub fn mask_image(image: &RgbImage, range: &HsvRange) -> GrayImage {
    let (w, h) = image.dimensions();
    let mut out = GrayImage::new(w, h);
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        if range.contains(rgb_to_hsv(src.0)) {
            *dst = Luma([luma(src.0)]);
        }
    }
    out
}

/// Number of nonzero pixels in a mask.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.as_raw().iter().filter(|&&v| v != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorTarget;
    use image::Rgb;

    #[test]
    fn wide_image_width_becomes_bound() {
        assert_eq!(bounded_dimensions(100, 50, 480), (480, 240));
        assert_eq!(bounded_dimensions(1920, 1080, 480), (480, 270));
    }

    #[test]
    fn tall_image_height_becomes_bound() {
        assert_eq!(bounded_dimensions(30, 90, 480), (160, 480));
        // 33 * 480 / 100 = 158.4 -> truncated
        assert_eq!(bounded_dimensions(33, 100, 480), (158, 480));
    }

    #[test]
    fn square_image_keeps_square() {
        assert_eq!(bounded_dimensions(7, 7, 480), (480, 480));
        assert_eq!(bounded_dimensions(1000, 1000, 480), (480, 480));
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        assert_eq!(bounded_dimensions(2000, 1, 480), (480, 1));
    }

    #[test]
    fn aspect_ratio_preserved_within_one_pixel() {
        for &(w, h) in &[(640u32, 481u32), (123, 457), (999, 1000), (3000, 17)] {
            let (nw, nh) = bounded_dimensions(w, h, 480);
            assert_eq!(nw.max(nh), 480);
            let expected_short = f64::from(w.min(h)) * 480.0 / f64::from(w.max(h));
            let short = f64::from(nw.min(nh));
            assert!(
                (short - expected_short).abs() <= 1.0,
                "{w}x{h} -> {nw}x{nh}"
            );
        }
    }

    #[test]
    fn resize_produces_bounded_image() {
        let img = RgbImage::from_pixel(64, 200, Rgb([10, 20, 30]));
        let out = resize_keep_ratio(&img, 100).unwrap();
        assert_eq!(out.dimensions(), (32, 100));
        let up = resize_keep_ratio(&RgbImage::new(20, 10), 480).unwrap();
        assert_eq!(up.dimensions(), (480, 240));
    }

    #[test]
    fn resize_rejects_empty_input_and_zero_bound() {
        assert!(matches!(
            resize_keep_ratio(&RgbImage::new(0, 10), 480),
            Err(DetectError::InputShape { width: 0, height: 10 })
        ));
        assert!(matches!(
            resize_keep_ratio(&RgbImage::new(10, 10), 0),
            Err(DetectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn mask_keeps_only_in_range_pixels() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 0]));
        img.put_pixel(3, 2, Rgb([230, 200, 40]));
        let target = ColorTarget::vibrio_yellow();
        let mask = mask_image(&img, &target.range);

        assert_eq!(mask.dimensions(), (4, 3));
        assert_eq!(mask.get_pixel(1, 1)[0], luma([255, 255, 0]));
        assert_eq!(mask.get_pixel(3, 2)[0], luma([230, 200, 40]));
        assert_eq!(count_foreground(&mask), 2);
        for (x, y, p) in mask.enumerate_pixels() {
            if (x, y) != (1, 1) && (x, y) != (3, 2) {
                assert_eq!(p[0], 0, "pixel ({x}, {y}) should be background");
            }
        }
    }

    #[test]
    fn raw_buffer_validation() {
        assert!(rgb_from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            rgb_from_raw(2, 2, 4, vec![0; 16]),
            Err(DetectError::ChannelCount { channels: 4 })
        ));
        assert!(matches!(
            rgb_from_raw(2, 2, 1, vec![0; 4]),
            Err(DetectError::ChannelCount { channels: 1 })
        ));
        assert!(matches!(
            rgb_from_raw(2, 2, 3, vec![0; 11]),
            Err(DetectError::BufferSize {
                expected: 12,
                got: 11,
                ..
            })
        ));
        assert!(matches!(
            rgb_from_raw(0, 2, 3, Vec::new()),
            Err(DetectError::InputShape { .. })
        ));
    }
}
