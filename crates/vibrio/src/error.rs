//! Error type shared by configuration, input validation and config loading.

/// Errors surfaced by the detector.
///
/// Degenerate contour geometry and empty detections are not errors: the
/// contour stage filters the former and returns an empty result for the latter.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The detector configuration cannot be used (fatal, raised before any
    /// image is processed).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The input image has a zero dimension.
    #[error("input image must be non-empty, got {width}x{height}")]
    InputShape {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// The raw input buffer does not have three interleaved RGB channels.
    #[error("expected 3 interleaved RGB channels, got {channels}")]
    ChannelCount {
        /// Channel count supplied by the caller.
        channels: usize,
    },
    /// The raw input buffer length does not match its declared shape.
    #[error("buffer holds {got} bytes, {width}x{height}x3 needs {expected}")]
    BufferSize {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Required byte count.
        expected: usize,
        /// Provided byte count.
        got: usize,
    },
    /// A per-target operation named a target the configuration does not have.
    #[error("target index {index} out of range ({n_targets} targets configured)")]
    TargetIndex {
        /// Requested index.
        index: usize,
        /// Number of configured targets.
        n_targets: usize,
    },
    /// Reading a configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DetectError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
