//! Packed 8-bit, three-channel image frames.

use thiserror::Error;

/// Channel order of packed pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    /// Native order of most video decoders.
    Bgr,
}

/// Errors constructing a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("frame data is {actual} bytes, expected {expected} for {width}x{height}x3")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// One decoded image, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap packed pixel data, validating its length.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions { width, height });
        }
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// All-black RGB frame used by the single-frame latency probe.
    ///
    /// Zero dimensions are clamped to one pixel.
    pub fn blank(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            layout: PixelLayout::Rgb,
            data: vec![0; Self::byte_len(width, height)],
        }
    }

    /// Number of bytes a packed frame of this size occupies.
    pub const fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 3
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Convert to RGB order, swapping channels in place when needed.
    #[must_use]
    pub fn into_rgb(mut self) -> Self {
        if self.layout == PixelLayout::Bgr {
            for pixel in self.data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
            self.layout = PixelLayout::Rgb;
        }
        self
    }

    /// Channel values at `(x, y)` in the frame's own layout, `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        let channels = self.data.get(offset..offset + 3)?;
        Some([channels[0], channels[1], channels[2]])
    }
}
