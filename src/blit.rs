use crate::error::{DisplayError, Result};
use crate::geometry::ScreenGeometry;

/// Writable display memory - every write is bounds-checked
pub trait DisplayBuffer {
    /// Capacity in bytes
    fn size(&self) -> usize;

    /// Copy `bytes` to `offset`; nothing is written when the span does not fit
    fn write_span(&mut self, offset: usize, bytes: &[u8]) -> Result<()>;
}

/// Bounds-checked copy into a byte slice
pub fn write_into(dst: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    let capacity = dst.len();
    let overrun = || DisplayError::BufferOverrun {
        offset,
        len: bytes.len(),
        capacity,
    };
    let end = offset.checked_add(bytes.len()).ok_or_else(overrun)?;
    dst.get_mut(offset..end)
        .ok_or_else(overrun)?
        .copy_from_slice(bytes);
    Ok(())
}

impl DisplayBuffer for memmap::MmapMut {
    fn size(&self) -> usize {
        self.len()
    }

    fn write_span(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        write_into(self, offset, bytes)
    }
}

impl DisplayBuffer for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }

    fn write_span(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        write_into(self, offset, bytes)
    }
}

/// What one blit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitStats {
    pub writes: usize,
    pub bytes: usize,
}

/// Write a converted frame honoring row stride.
///
/// `converted` holds `height` tightly packed rows. With no row padding the
/// frame goes out in a single write; otherwise row by row, leaving the
/// padding bytes between rows untouched.
pub fn blit<B: DisplayBuffer + ?Sized>(
    buffer: &mut B,
    geometry: &ScreenGeometry,
    converted: &[u8],
) -> Result<BlitStats> {
    let row_bytes = geometry.tight_row_bytes();
    let stride = geometry.row_stride as usize;
    let rows = geometry.height as usize;

    if converted.len() != row_bytes * rows {
        return Err(DisplayError::BufferOverrun {
            offset: 0,
            len: converted.len(),
            capacity: row_bytes * rows,
        });
    }

    if converted.is_empty() {
        return Ok(BlitStats { writes: 0, bytes: 0 });
    }

    if !geometry.is_padded() {
        buffer.write_span(0, converted)?;
        return Ok(BlitStats {
            writes: 1,
            bytes: converted.len(),
        });
    }

    for (row, pixels) in converted.chunks_exact(row_bytes).enumerate() {
        buffer.write_span(row * stride, pixels)?;
    }

    Ok(BlitStats {
        writes: rows,
        bytes: converted.len(),
    })
}
