//! Visualization helpers: draw detection boxes, size labels and contours.
//!
//! These never modify their input; each returns an annotated copy. Boxes are
//! mapped onto whatever canvas size is passed, so a result computed at the
//! working resolution can be drawn on a larger display image.

use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage};
use imageproc::contours::Contour;
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::pipeline::DetectionResult;

/// Box outline colour.
pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Size label colour.
pub const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
/// Contour point colour.
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Default label glyph height in pixels.
pub const DEFAULT_LABEL_SCALE: f32 = 16.0;

/// Labels sit this many pixels above the box's top edge.
const LABEL_OFFSET_PX: i32 = 10;

/// Text drawn next to a box: the estimated size in millimetres.
pub fn size_label(size_mm: f64) -> String {
    format!("{size_mm:.2} mm")
}

/// Draw a 1-px outline around every detection.
pub fn draw_boxes(image: &RgbImage, result: &DetectionResult) -> RgbImage {
    let mut canvas = image.clone();
    let (w, h) = canvas.dimensions();
    for [x1, y1, x2, y2] in result.pixel_boxes(w, h) {
        // Corners are inclusive, as for a pixel-grid rectangle.
        let rw = (x2 - x1 + 1).max(1) as u32;
        let rh = (y2 - y1 + 1).max(1) as u32;
        draw_hollow_rect_mut(&mut canvas, Rect::at(x1, y1).of_size(rw, rh), BOX_COLOR);
    }
    canvas
}

/// Write each detection's size label above its box.
pub fn draw_labels<F: Font>(
    image: &RgbImage,
    result: &DetectionResult,
    font: &F,
    scale: f32,
) -> RgbImage {
    let mut canvas = image.clone();
    let (w, h) = canvas.dimensions();
    let scale = PxScale::from(scale);
    for (bbox, attr) in result.pixel_boxes(w, h).iter().zip(&result.box_attributes) {
        let x = bbox[0].max(0);
        let y = (bbox[1] - LABEL_OFFSET_PX).max(0);
        draw_text_mut(
            &mut canvas,
            LABEL_COLOR,
            x,
            y,
            scale,
            font,
            &size_label(attr.size_mm),
        );
    }
    canvas
}

/// Paint every contour point that falls on the canvas.
pub fn draw_contours(image: &RgbImage, contours: &[Contour<i32>]) -> RgbImage {
    let mut canvas = image.clone();
    let (w, h) = canvas.dimensions();
    for p in contours.iter().flat_map(|c| c.points.iter()) {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < w && (p.y as u32) < h {
            canvas.put_pixel(p.x as u32, p.y as u32, CONTOUR_COLOR);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{detect_by_contour, find_region_contours, DetectConfig};
    use crate::test_utils::filled_rect_mask;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn boxes_are_drawn_at_denormalized_corners() {
        let mask = filled_rect_mask(50, 50, 5, 5, 20, 20);
        let result = detect_by_contour(&mask, "c", &DetectConfig::default());
        // Draw on a canvas twice the working size.
        let canvas = RgbImage::from_pixel(100, 100, WHITE);
        let out = draw_boxes(&canvas, &result);

        assert_eq!(*out.get_pixel(10, 10), BOX_COLOR);
        assert_eq!(*out.get_pixel(50, 10), BOX_COLOR);
        assert_eq!(*out.get_pixel(10, 50), BOX_COLOR);
        assert_eq!(*out.get_pixel(50, 50), BOX_COLOR);
        assert_eq!(*out.get_pixel(30, 30), WHITE);
        // Input untouched.
        assert_eq!(*canvas.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn boxes_at_the_far_edge_are_clipped() {
        let mask = filled_rect_mask(40, 40, 30, 30, 10, 10);
        let result = detect_by_contour(&mask, "c", &DetectConfig::default());
        let out = draw_boxes(&RgbImage::from_pixel(40, 40, WHITE), &result);
        assert_eq!(*out.get_pixel(30, 30), BOX_COLOR);
        assert_eq!(*out.get_pixel(30, 39), BOX_COLOR);
        assert_eq!(*out.get_pixel(35, 35), WHITE);
    }

    #[test]
    fn empty_result_leaves_image_unchanged() {
        let canvas = RgbImage::from_pixel(20, 20, WHITE);
        let out = draw_boxes(&canvas, &DetectionResult::empty(20, 20, true));
        assert_eq!(out, canvas);
    }

    #[test]
    fn contours_are_painted() {
        let mask = filled_rect_mask(30, 30, 10, 10, 6, 6);
        let contours = find_region_contours(&mask);
        let out = draw_contours(&RgbImage::from_pixel(30, 30, WHITE), &contours);
        assert_eq!(*out.get_pixel(10, 10), CONTOUR_COLOR);
        assert_eq!(*out.get_pixel(15, 15), CONTOUR_COLOR);
        assert_eq!(*out.get_pixel(12, 12), WHITE);
    }

    #[test]
    fn size_label_has_two_decimals() {
        assert_eq!(size_label(4.56789), "4.57 mm");
        assert_eq!(size_label(12.0), "12.00 mm");
    }
}
