use std::collections::BTreeMap;

/// Metadata attached to one detection box.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxAttribute {
    /// Class label of the colour target that produced the box.
    #[serde(rename = "class")]
    pub class_label: String,
    /// Estimated colony diameter in millimetres.
    #[serde(rename = "size")]
    pub size_mm: f64,
}

/// Full detection result for a single image.
///
/// `boxes[i]` and `box_attributes[i]` describe the same region.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectionResult {
    /// Boxes as `[x1, y1, x2, y2]`, normalized to `[0, 1]` when
    /// [`normalized`](Self::normalized) is set, working-frame pixels otherwise.
    pub boxes: Vec<[f32; 4]>,
    /// Per-box class label and size, aligned with `boxes`.
    pub box_attributes: Vec<BoxAttribute>,
    /// Working image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Whether `boxes` are normalized.
    pub normalized: bool,
}

impl DetectionResult {
    /// Construct an empty result for an image with the provided dimensions.
    pub fn empty(width: u32, height: u32, normalized: bool) -> Self {
        Self {
            boxes: Vec::new(),
            box_attributes: Vec::new(),
            image_size: [width, height],
            normalized,
        }
    }

    pub(crate) fn push(&mut self, bbox: [f32; 4], attr: BoxAttribute) {
        self.boxes.push(bbox);
        self.box_attributes.push(attr);
    }

    /// Append another result computed on the same working frame.
    pub(crate) fn append(&mut self, other: DetectionResult) {
        debug_assert_eq!(self.image_size, other.image_size);
        debug_assert_eq!(self.normalized, other.normalized);
        self.boxes.extend(other.boxes);
        self.box_attributes.extend(other.box_attributes);
    }

    /// Number of detections.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterate over `(box, attribute)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32; 4], &BoxAttribute)> + '_ {
        self.boxes.iter().zip(self.box_attributes.iter())
    }

    /// Count detections per class label.
    ///
    /// Labels in `expected` are always present, with 0 when nothing of that
    /// class was found.
    pub fn count_by_class<'a>(
        &self,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> =
            expected.into_iter().map(|l| (l.to_string(), 0)).collect();
        for attr in &self.box_attributes {
            *counts.entry(attr.class_label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Boxes in pixel coordinates of a `width x height` canvas.
    ///
    /// Normalized boxes are scaled to the canvas; absolute boxes are rescaled
    /// from the working frame. Coordinates are truncated toward zero.
    pub fn pixel_boxes(&self, width: u32, height: u32) -> Vec<[i32; 4]> {
        let (sx, sy) = if self.normalized {
            (width as f32, height as f32)
        } else {
            (
                width as f32 / self.image_size[0].max(1) as f32,
                height as f32 / self.image_size[1].max(1) as f32,
            )
        };
        self.boxes
            .iter()
            .map(|b| {
                [
                    (b[0] * sx) as i32,
                    (b[1] * sy) as i32,
                    (b[2] * sx) as i32,
                    (b[3] * sy) as i32,
                ]
            })
            .collect()
    }
}
