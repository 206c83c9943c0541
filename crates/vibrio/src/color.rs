//! Colour model: 8-bit HSV conversion, inclusive HSV ranges and named targets.
//!
//! Hue follows the 8-bit convention where degrees are halved (0–179) so that a
//! hue fits in one byte; saturation and value span 0–255.

use serde::{Deserialize, Serialize};

/// Class label of the default colour target.
pub const VIBRIO_YELLOW_LABEL: &str = "vibrio-yellow";
/// Lower HSV bound of the yellow colony colour.
pub const VIBRIO_YELLOW_LOWER: [u8; 3] = [15, 120, 110];
/// Upper HSV bound of the yellow colony colour.
pub const VIBRIO_YELLOW_UPPER: [u8; 3] = [36, 255, 255];

/// Largest hue value in the halved-degree convention.
pub const HUE_MAX: u8 = 179;

/// Convert one RGB pixel to `[h, s, v]` in the 8-bit HSV convention.
///
/// `v = max(r, g, b)`, `s = round(255 * (v - min) / v)`, hue is computed in
/// degrees, halved and rounded. Achromatic pixels get hue 0. When two
/// channels share the maximum, red wins over green and green over blue.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(i32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0 { 0 } else { round_div(255 * diff, v) };

    let h = if diff == 0 {
        0
    } else {
        // Offset within the 60-degree sextant, scaled to 30 hue units each.
        let num = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = round_div(num * 30, diff);
        if h < 0 {
            h + 180
        } else {
            h
        }
    };

    [h as u8, s as u8, v as u8]
}

/// BT.601 luma with 14-bit fixed-point weights, rounded.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 4899 + g * 9617 + b * 1868 + (1 << 13)) >> 14) as u8
}

/// `floor(num / den + 0.5)` for a positive denominator.
#[inline]
fn round_div(num: i32, den: i32) -> i32 {
    (2 * num + den).div_euclid(2 * den)
}

/// Inclusive per-channel HSV interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lower bound `[h, s, v]`.
    pub lower: [u8; 3],
    /// Upper bound `[h, s, v]`.
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// `true` when every channel of `hsv` lies within `[lower, upper]`.
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }

    /// `true` when the pixel's HSV value falls inside the range.
    #[inline]
    pub fn matches_rgb(&self, rgb: [u8; 3]) -> bool {
        self.contains(rgb_to_hsv(rgb))
    }

    /// Indices of channels whose lower bound exceeds the upper bound.
    ///
    /// Such a channel matches no pixel at all.
    pub fn inverted_channels(&self) -> Vec<usize> {
        (0..3).filter(|&i| self.lower[i] > self.upper[i]).collect()
    }
}

/// A named colour class detected independently of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTarget {
    /// Class label written to every box attribute of this target.
    pub label: String,
    /// HSV interval selecting the target's pixels.
    pub range: HsvRange,
}

impl ColorTarget {
    pub fn new(label: impl Into<String>, range: HsvRange) -> Self {
        Self {
            label: label.into(),
            range,
        }
    }

    /// Yellow vibrio colonies, the single class detected by default.
    pub fn vibrio_yellow() -> Self {
        Self::new(
            VIBRIO_YELLOW_LABEL,
            HsvRange::new(VIBRIO_YELLOW_LOWER, VIBRIO_YELLOW_UPPER),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_map_to_expected_hues() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([255, 255, 0]), [30, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 255]), [90, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        assert_eq!(rgb_to_hsv([255, 0, 255]), [150, 255, 255]);
    }

    #[test]
    fn achromatic_pixels_have_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(rgb_to_hsv([255, 255, 255]), [0, 0, 255]);
    }

    #[test]
    fn hue_wraps_into_upper_range_for_magenta_reds() {
        // Red dominant with blue above green: negative sextant offset.
        let [h, s, v] = rgb_to_hsv([255, 0, 128]);
        assert!(h > 150 && h <= HUE_MAX, "h = {h}");
        assert_eq!(s, 255);
        assert_eq!(v, 255);
    }

    #[test]
    fn saturation_rounds_to_nearest() {
        // diff = 100, v = 200 -> 127.5 -> 128
        assert_eq!(rgb_to_hsv([200, 100, 100])[1], 128);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = HsvRange::new(VIBRIO_YELLOW_LOWER, VIBRIO_YELLOW_UPPER);
        assert!(range.contains([15, 120, 110]));
        assert!(range.contains([36, 255, 255]));
        assert!(!range.contains([14, 200, 200]));
        assert!(!range.contains([37, 200, 200]));
        assert!(!range.contains([20, 119, 200]));
        assert!(!range.contains([20, 200, 109]));
    }

    #[test]
    fn yellow_target_accepts_yellow_and_rejects_other_colours() {
        let target = ColorTarget::vibrio_yellow();
        assert_eq!(target.label, VIBRIO_YELLOW_LABEL);
        assert!(target.range.matches_rgb([255, 255, 0]));
        assert!(target.range.matches_rgb([230, 200, 40]));
        assert!(!target.range.matches_rgb([0, 0, 255]));
        assert!(!target.range.matches_rgb([0, 200, 0]));
        assert!(!target.range.matches_rgb([0, 0, 0]));
        // Too dark: value below 110.
        assert!(!target.range.matches_rgb([90, 90, 0]));
    }

    #[test]
    fn inverted_channels_are_reported() {
        let range = HsvRange::new([40, 0, 0], [20, 255, 255]);
        assert_eq!(range.inverted_channels(), vec![0]);
        assert!(!range.matches_rgb([255, 255, 0]));
        assert!(ColorTarget::vibrio_yellow()
            .range
            .inverted_channels()
            .is_empty());
    }

    #[test]
    fn luma_uses_bt601_weights() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
    }
}
