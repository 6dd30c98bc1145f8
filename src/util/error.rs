//! Error types for framematch.

use thiserror::Error;

/// Result alias for framematch operations.
pub type FrameMatchResult<T> = std::result::Result<T, FrameMatchError>;

/// Errors that can occur when building inputs or running the engine.
///
/// Per-tick failures inside a detection call never reach the caller as
/// errors; the engine absorbs them and reports a miss for that tick. Only
/// caller mistakes (invalid buffers, use after dispose) surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameMatchError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer does not cover the described image.
    #[error("pixel buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A template was registered with unusable pixel data.
    #[error("invalid template `{name}`: {reason}")]
    InvalidTemplate { name: String, reason: &'static str },
    /// An operation was attempted on a disposed template store.
    #[error("template store has been disposed")]
    StoreDisposed,
    /// A lookup used an index outside the valid range.
    #[error("index {index} out of bounds for {context} of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// Unexpected failure inside a single similarity search.
    #[error("match fault: {reason}")]
    MatchFault { reason: &'static str },
    /// Loading or decoding an image file failed.
    #[cfg(feature = "image-io")]
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}
