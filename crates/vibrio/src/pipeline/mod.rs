//! High-level detection pipeline.
//!
//! Internal glue that wires the stages together for every configured colour
//! target: resize → HSV mask → noise removal → contour detection. Stage
//! primitives live in `crate::preprocess`, `crate::morphology` and
//! `crate::detector`; this layer owns call order and result merging.

mod result;
mod run;

pub use result::{BoxAttribute, DetectionResult};

pub(crate) use run::{detect, detect_with_debug, preprocess};
