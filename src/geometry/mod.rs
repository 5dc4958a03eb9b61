pub mod layout;
pub mod probe;
pub mod sysfs;

pub use layout::{FixLayout, WordWidth, FBIOGET_FSCREENINFO, FBIOGET_VSCREENINFO, VAR_SCREENINFO_LEN};
pub use probe::{FieldSource, GeometryProbe, ProbeReport, ScreenInfoChannel, ScreenInfoRequest};
pub use sysfs::SysfsAttributes;

/// Probed screen geometry - immutable once the display is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    /// Visible width in pixels
    pub width: u32,
    /// Visible height in pixels
    pub height: u32,
    /// Color depth
    pub bits_per_pixel: u32,
    /// Bytes from the start of one row to the start of the next
    pub row_stride: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32, bits_per_pixel: u32, row_stride: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            row_stride,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// Row size without padding
    pub fn tight_row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Size of the mapped display buffer
    pub fn buffer_len(&self) -> usize {
        self.row_stride as usize * self.height as usize
    }

    /// True when rows carry trailing alignment bytes
    pub fn is_padded(&self) -> bool {
        self.row_stride as usize != self.tight_row_bytes()
    }
}

impl std::fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} {}bpp, line_length={}",
            self.width, self.height, self.bits_per_pixel, self.row_stride
        )
    }
}
