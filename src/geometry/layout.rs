//! Byte layouts of the kernel framebuffer screen-info records.
//!
//! Offsets follow `struct fb_var_screeninfo` and `struct fb_fix_screeninfo`
//! in `<linux/fb.h>`. The fixed record opens with `char id[16]` followed by
//! `unsigned long smem_start`, so every later field moves with the native
//! word width: `line_length` sits at 44 on 32-bit hosts and at 48 on 64-bit
//! hosts (where `ywrapstep` is followed by two bytes of alignment padding).

/// `FBIOGET_VSCREENINFO` request number
pub const FBIOGET_VSCREENINFO: u64 = 0x4600;
/// `FBIOGET_FSCREENINFO` request number
pub const FBIOGET_FSCREENINFO: u64 = 0x4602;

/// Size of `struct fb_var_screeninfo` (40 `__u32` fields)
pub const VAR_SCREENINFO_LEN: usize = 160;

const VAR_XRES: usize = 0;
const VAR_YRES: usize = 4;
const VAR_BITS_PER_PIXEL: usize = 24;

/// Native word width, which decides the size of `unsigned long`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    Bits32,
    Bits64,
}

impl WordWidth {
    /// Word width of the running process
    pub fn native() -> Self {
        match std::mem::size_of::<usize>() {
            8 => WordWidth::Bits64,
            _ => WordWidth::Bits32,
        }
    }
}

/// Field offsets of `struct fb_fix_screeninfo` for one word width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixLayout {
    /// Total record size
    pub len: usize,
    /// Offset of `__u32 line_length`
    pub line_length: usize,
}

impl FixLayout {
    pub const BITS_32: FixLayout = FixLayout {
        len: 68,
        line_length: 44,
    };

    pub const BITS_64: FixLayout = FixLayout {
        len: 80,
        line_length: 48,
    };

    pub fn for_width(width: WordWidth) -> Self {
        match width {
            WordWidth::Bits32 => Self::BITS_32,
            WordWidth::Bits64 => Self::BITS_64,
        }
    }

    /// Read `line_length` from a raw fixed record
    pub fn line_length(&self, record: &[u8]) -> u32 {
        read_u32(record, self.line_length)
    }
}

/// Fields of interest from `struct fb_var_screeninfo`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarFields {
    pub xres: u32,
    pub yres: u32,
    pub bits_per_pixel: u32,
}

impl VarFields {
    pub fn parse(record: &[u8]) -> Self {
        Self {
            xres: read_u32(record, VAR_XRES),
            yres: read_u32(record, VAR_YRES),
            bits_per_pixel: read_u32(record, VAR_BITS_PER_PIXEL),
        }
    }
}

/// Native-endian u32 at `offset`, zero when the record is too short
fn read_u32(record: &[u8], offset: usize) -> u32 {
    record
        .get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u32::from_ne_bytes)
        .unwrap_or(0)
}
