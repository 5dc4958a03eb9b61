use crate::error::{DisplayError, Result};

/// Packed BGR888 bitmap, row-major with no row padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    pub const CHANNELS: usize = 3;

    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if pixels.len() != expected {
            return Err(DisplayError::FrameSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Caller guarantees `pixels.len() == width * height * 3`
    pub(crate) fn from_raw_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * Self::CHANNELS);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Frame filled with one BGR color
    pub fn solid(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: bgr.repeat(count),
        }
    }

    /// Frame repeating one BGR row of `width * 3` bytes
    pub fn solid_rows(width: u32, height: u32, row: &[u8]) -> Result<Self> {
        let row_len = width as usize * Self::CHANNELS;
        if row.len() != row_len {
            return Err(DisplayError::FrameSizeMismatch {
                width,
                height,
                expected: row_len * height as usize,
                actual: row.len() * height as usize,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: row.repeat(height as usize),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// BGR triple at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}
