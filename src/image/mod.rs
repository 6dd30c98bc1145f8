//! RGBA image views and owned buffers.
//!
//! `RgbaView` is a borrowed 2D view into an interleaved RGBA byte buffer with
//! an explicit stride. The stride counts pixels between the starts of
//! consecutive rows, so a stride larger than the width represents padded
//! rows. Views are read-only; the engine never mutates a frame buffer passed
//! to it.

use crate::util::{FrameMatchError, FrameMatchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Bytes per interleaved RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Borrowed RGBA image view with an explicit pixel stride.
#[derive(Copy, Clone)]
pub struct RgbaView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RgbaView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_rgba8(data: &'a [u8], width: usize, height: usize) -> FrameMatchResult<Self> {
        Self::with_stride(data, width, height, width)
    }

    /// Creates a view with an explicit stride in pixels.
    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> FrameMatchResult<Self> {
        let needed = required_bytes(width, height, stride)?;
        if data.len() < needed {
            return Err(FrameMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing byte slice including any row padding.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the interleaved bytes of row `y`, `width * 4` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?.checked_mul(RGBA_CHANNELS)?;
        let end = start.checked_add(self.width.checked_mul(RGBA_CHANNELS)?)?;
        self.data.get(start..end)
    }

    /// Returns the RGBA channels of the pixel at `(x, y)` if in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y
            .checked_mul(self.stride)?
            .checked_add(x)?
            .checked_mul(RGBA_CHANNELS)?;
        let bytes = self.data.get(idx..idx.checked_add(RGBA_CHANNELS)?)?;
        bytes.try_into().ok()
    }
}

/// Owned contiguous RGBA image.
#[derive(Clone)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Creates an owned image from an interleaved RGBA buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> FrameMatchResult<Self> {
        let needed = required_bytes(width, height, width)?;
        if data.len() < needed {
            return Err(FrameMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> RgbaView<'_> {
        RgbaView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

fn required_bytes(width: usize, height: usize, stride: usize) -> FrameMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(FrameMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(FrameMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_mul(RGBA_CHANNELS))
        .ok_or(FrameMatchError::InvalidDimensions { width, height })
}
