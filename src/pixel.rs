use crate::error::{DisplayError, Result};

/// Native framebuffer pixel encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16bpp, 5-6-5, little-endian words
    Rgb565,
    /// 32bpp, bytes B, G, R, A
    Bgra8888,
}

impl PixelFormat {
    pub fn from_depth(bits_per_pixel: u32) -> Result<Self> {
        match bits_per_pixel {
            16 => Ok(PixelFormat::Rgb565),
            32 => Ok(PixelFormat::Bgra8888),
            other => Err(DisplayError::UnsupportedPixelDepth(other)),
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Bgra8888 => 4,
        }
    }

    /// Encode packed BGR888 pixels into `out`, replacing its contents
    pub fn convert(self, bgr: &[u8], out: &mut Vec<u8>) {
        let pixels = bgr.chunks_exact(3);
        out.clear();
        out.reserve(pixels.len() * self.bytes_per_pixel());

        match self {
            PixelFormat::Rgb565 => {
                for px in pixels {
                    out.extend_from_slice(&rgb565(px[2], px[1], px[0]).to_le_bytes());
                }
            }
            PixelFormat::Bgra8888 => {
                for px in pixels {
                    out.extend_from_slice(&[px[0], px[1], px[2], 0xFF]);
                }
            }
        }
    }
}

/// Pack 8-bit channels into RGB565
#[inline]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3)
}
