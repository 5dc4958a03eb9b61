use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use memmap::{MmapMut, MmapOptions};

use crate::blit::DisplayBuffer;
use crate::geometry::{ScreenInfoChannel, ScreenInfoRequest};

/// Larger than either screen-info record on any word width
const IOCTL_SCRATCH_LEN: usize = 256;

/// An open display device: control channel plus shared mapping
pub trait DisplayDevice: ScreenInfoChannel {
    type Buffer: DisplayBuffer;

    /// Map `len` bytes of display memory shared read/write
    fn map(&self, len: usize) -> io::Result<Self::Buffer>;
}

/// Opens display devices by path
pub trait DeviceOpener {
    type Device: DisplayDevice;

    fn open(&self, path: &Path) -> io::Result<Self::Device>;
}

/// Linux fbdev node such as `/dev/fb0`, closed on drop
#[derive(Debug)]
pub struct FbDevice {
    file: File,
}

impl FbDevice {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }
}

impl ScreenInfoChannel for FbDevice {
    fn read_screen_info(&self, request: ScreenInfoRequest, record: &mut [u8]) -> io::Result<()> {
        // The kernel writes the full native struct regardless of `record.len()`
        let mut scratch = [0u8; IOCTL_SCRATCH_LEN];
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                request.code() as _,
                scratch.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        let len = record.len().min(IOCTL_SCRATCH_LEN);
        record[..len].copy_from_slice(&scratch[..len]);
        Ok(())
    }
}

impl DisplayDevice for FbDevice {
    type Buffer = MmapMut;

    fn map(&self, len: usize) -> io::Result<MmapMut> {
        // Safety: the mapping is owned by the display session and never
        // outlives it; writes go through bounds-checked `write_span`.
        unsafe { MmapOptions::new().len(len).map_mut(&self.file) }
    }
}

/// Opens real fbdev nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct FbdevOpener;

impl DeviceOpener for FbdevOpener {
    type Device = FbDevice;

    fn open(&self, path: &Path) -> io::Result<FbDevice> {
        FbDevice::open(path)
    }
}
