//! Synthetic images shared by the unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Saturated yellow, well inside the default colony range.
pub(crate) const YELLOW: Rgb<u8> = Rgb([240, 210, 30]);
/// Deep blue background, outside the default colony range.
pub(crate) const BACKGROUND: Rgb<u8> = Rgb([20, 30, 120]);

/// Binary mask of size `w x h` with one filled `rw x rh` rectangle at `(x, y)`.
pub(crate) fn filled_rect_mask(w: u32, h: u32, x: u32, y: u32, rw: u32, rh: u32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    fill_rect(&mut img, x, y, rw, rh, Luma([255]));
    img
}

/// Set the listed pixels of a mask to `value`.
pub(crate) fn set_pixels(mask: &mut GrayImage, points: &[(u32, u32)], value: u8) {
    for &(x, y) in points {
        mask.put_pixel(x, y, Luma([value]));
    }
}

/// Fill a rectangle clipped to the image bounds.
pub(crate) fn fill_rect<P: image::Pixel>(
    img: &mut image::ImageBuffer<P, Vec<P::Subpixel>>,
    x: u32,
    y: u32,
    rw: u32,
    rh: u32,
    value: P,
) {
    let (w, h) = img.dimensions();
    for yy in y..(y + rh).min(h) {
        for xx in x..(x + rw).min(w) {
            img.put_pixel(xx, yy, value);
        }
    }
}

/// RGB plate photo stand-in: background colour with yellow squares
/// `(x, y, side)`.
pub(crate) fn plate_with_colonies(w: u32, h: u32, colonies: &[(u32, u32, u32)]) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, BACKGROUND);
    for &(x, y, side) in colonies {
        fill_rect(&mut img, x, y, side, side, YELLOW);
    }
    img
}
