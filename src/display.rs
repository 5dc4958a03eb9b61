use std::path::{Path, PathBuf};

use crate::blit::{self, BlitStats, DisplayBuffer};
use crate::config::DisplayConfig;
use crate::device::{DeviceAcquirer, DeviceOpener, DisplayDevice, FbdevOpener, ModuleLoader, Modprobe};
use crate::error::{DisplayError, Result};
use crate::frame::Frame;
use crate::geometry::{GeometryProbe, ScreenGeometry};
use crate::pixel::PixelFormat;
use crate::scale::NearestScaler;
use crate::traits::FrameScaler;

/// Resources held while the display is open.
///
/// Field order is drop order: the mapping goes before the device handle.
struct Session<D: DisplayDevice> {
    buffer: D::Buffer,
    // Held open for as long as the mapping lives
    #[allow(dead_code)]
    device: D,
    geometry: ScreenGeometry,
    format: PixelFormat,
    converted: Vec<u8>,
}

/// Framebuffer display engine: acquire -> probe -> map, then render frames.
///
/// `render` is only valid between `open` and `close`. Closing is idempotent
/// and also happens on drop.
pub struct FramebufferDisplay<O: DeviceOpener = FbdevOpener, L: ModuleLoader = Modprobe> {
    device_path: PathBuf,
    acquirer: DeviceAcquirer<L>,
    opener: O,
    probe: GeometryProbe,
    scaler: NearestScaler,
    session: Option<Session<O::Device>>,
}

impl FramebufferDisplay {
    /// Closed display for the configured device
    pub fn new(config: &DisplayConfig) -> Self {
        Self::with_parts(&config.device, config.acquirer(), FbdevOpener, config.probe())
    }

    /// Open the configured device straight away
    pub fn open_config(config: &DisplayConfig) -> Result<Self> {
        let mut display = Self::new(config);
        display.open()?;
        Ok(display)
    }
}

impl<O: DeviceOpener, L: ModuleLoader> FramebufferDisplay<O, L> {
    pub fn with_parts(
        device_path: impl AsRef<Path>,
        acquirer: DeviceAcquirer<L>,
        opener: O,
        probe: GeometryProbe,
    ) -> Self {
        Self {
            device_path: device_path.as_ref().to_path_buf(),
            acquirer,
            opener,
            probe,
            scaler: NearestScaler,
            session: None,
        }
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Probed geometry while open
    pub fn geometry(&self) -> Option<ScreenGeometry> {
        self.session.as_ref().map(|s| s.geometry)
    }

    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.session.as_ref().map(|s| s.format)
    }

    pub fn acquirer(&self) -> &DeviceAcquirer<L> {
        &self.acquirer
    }

    /// Acquire the device, probe its geometry and map its memory.
    ///
    /// Any failure leaves the display closed with no handle held.
    pub fn open(&mut self) -> Result<ScreenGeometry> {
        if let Some(session) = &self.session {
            return Ok(session.geometry);
        }

        self.acquirer.ensure(&self.device_path)?;

        let device = self.opener.open(&self.device_path).map_err(|err| {
            DisplayError::io(format!("failed to open {}", self.device_path.display()), err)
        })?;

        let geometry = self.probe.probe(&device)?.geometry;
        let format = PixelFormat::from_depth(geometry.bits_per_pixel)?;

        let buffer = device.map(geometry.buffer_len()).map_err(|err| {
            DisplayError::io(
                format!("failed to map {} bytes of {}", geometry.buffer_len(), self.device_path.display()),
                err,
            )
        })?;

        log::info!("framebuffer opened: {} ({})", self.device_path.display(), geometry);

        self.session = Some(Session {
            buffer,
            device,
            geometry,
            format,
            converted: Vec::with_capacity(geometry.tight_row_bytes() * geometry.height as usize),
        });
        Ok(geometry)
    }

    /// Scale, convert and write one BGR frame
    pub fn render(&mut self, frame: &Frame) -> Result<BlitStats> {
        let session = self.session.as_mut().ok_or(DisplayError::NotOpen)?;
        let geometry = session.geometry;

        let scaled = self.scaler.scale(frame, geometry.width, geometry.height);
        session.format.convert(scaled.pixels(), &mut session.converted);

        blit::blit(&mut session.buffer, &geometry, &session.converted)
    }

    /// Unmap and release the device; safe to call repeatedly
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("closing {} ({} bytes mapped)", self.device_path.display(), session.buffer.size());
            drop(session);
        }
    }
}

impl<O: DeviceOpener, L: ModuleLoader> Drop for FramebufferDisplay<O, L> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<O: DeviceOpener, L: ModuleLoader> std::fmt::Debug for FramebufferDisplay<O, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramebufferDisplay")
            .field("device_path", &self.device_path)
            .field("geometry", &self.geometry())
            .finish()
    }
}
