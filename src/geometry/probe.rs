use std::io;

use super::layout::{FixLayout, VarFields, WordWidth, FBIOGET_FSCREENINFO, FBIOGET_VSCREENINFO, VAR_SCREENINFO_LEN};
use super::sysfs::SysfsAttributes;
use super::ScreenGeometry;
use crate::error::{DisplayError, Result};

/// Screen-info queries understood by the kernel control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenInfoRequest {
    Variable,
    Fixed,
}

impl ScreenInfoRequest {
    /// ioctl request number
    pub fn code(self) -> u64 {
        match self {
            ScreenInfoRequest::Variable => FBIOGET_VSCREENINFO,
            ScreenInfoRequest::Fixed => FBIOGET_FSCREENINFO,
        }
    }
}

/// Kernel control channel of an open framebuffer handle
pub trait ScreenInfoChannel {
    /// Fill `record` with the raw kernel record for `request`
    fn read_screen_info(&self, request: ScreenInfoRequest, record: &mut [u8]) -> io::Result<()>;
}

/// Probe stage that supplied a geometry field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Channel,
    Sysfs,
    Derived,
    Missing,
}

/// Probed geometry plus the stage each field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub geometry: ScreenGeometry,
    pub width_from: FieldSource,
    pub height_from: FieldSource,
    pub bits_per_pixel_from: FieldSource,
    pub row_stride_from: FieldSource,
}

#[derive(Debug, Clone, Copy)]
struct Field {
    value: u32,
    from: FieldSource,
}

impl Field {
    fn new(value: u32, from: FieldSource) -> Self {
        if value == 0 {
            Self::missing()
        } else {
            Self { value, from }
        }
    }

    fn missing() -> Self {
        Self {
            value: 0,
            from: FieldSource::Missing,
        }
    }

    fn is_missing(&self) -> bool {
        self.value == 0
    }

    /// Take `candidate` only if nothing earlier produced a value
    fn fill(&mut self, candidate: Option<u32>, from: FieldSource) {
        if self.is_missing() {
            if let Some(value) = candidate.filter(|v| *v != 0) {
                *self = Self { value, from };
            }
        }
    }
}

/// Geometry discovery: ioctl channel, then sysfs, then derivation
#[derive(Debug, Clone)]
pub struct GeometryProbe {
    fix_layout: FixLayout,
    sysfs: Option<SysfsAttributes>,
}

impl GeometryProbe {
    /// Probe using the native word width
    pub fn new(sysfs: Option<SysfsAttributes>) -> Self {
        Self::with_word_width(WordWidth::native(), sysfs)
    }

    pub fn with_word_width(width: WordWidth, sysfs: Option<SysfsAttributes>) -> Self {
        Self {
            fix_layout: FixLayout::for_width(width),
            sysfs,
        }
    }

    pub fn probe<C: ScreenInfoChannel + ?Sized>(&self, channel: &C) -> Result<ProbeReport> {
        let (mut width, mut height, mut bpp, mut stride) = self.query_channel(channel);

        if [width, height, bpp, stride].iter().any(Field::is_missing) {
            if let Some(sysfs) = &self.sysfs {
                log::info!("probe: filling zero fields from {}", sysfs.dir().display());
                let size = sysfs.virtual_size();
                width.fill(size.map(|(w, _)| w), FieldSource::Sysfs);
                height.fill(size.map(|(_, h)| h), FieldSource::Sysfs);
                bpp.fill(sysfs.bits_per_pixel(), FieldSource::Sysfs);
                stride.fill(sysfs.stride(), FieldSource::Sysfs);
            }
        }

        if stride.is_missing() && !width.is_missing() && !bpp.is_missing() {
            // Overflow leaves the stride missing
            stride.fill(width.value.checked_mul(bpp.value / 8), FieldSource::Derived);
        }

        let geometry = ScreenGeometry::new(width.value, height.value, bpp.value, stride.value);

        if geometry.buffer_len() == 0 || bpp.is_missing() {
            return Err(DisplayError::GeometryUnavailable {
                width: geometry.width,
                height: geometry.height,
                bits_per_pixel: geometry.bits_per_pixel,
                row_stride: geometry.row_stride,
            });
        }

        if (geometry.row_stride as usize) < geometry.tight_row_bytes() {
            return Err(DisplayError::StrideTooSmall {
                row_stride: geometry.row_stride,
                tight_row_bytes: geometry.tight_row_bytes() as u32,
            });
        }

        let report = ProbeReport {
            geometry,
            width_from: width.from,
            height_from: height.from,
            bits_per_pixel_from: bpp.from,
            row_stride_from: stride.from,
        };
        log::info!(
            "probe: {} (width: {:?}, height: {:?}, bpp: {:?}, stride: {:?})",
            geometry,
            report.width_from,
            report.height_from,
            report.bits_per_pixel_from,
            report.row_stride_from
        );
        Ok(report)
    }

    fn query_channel<C: ScreenInfoChannel + ?Sized>(&self, channel: &C) -> (Field, Field, Field, Field) {
        let mut var = [0u8; VAR_SCREENINFO_LEN];
        let vars = match channel.read_screen_info(ScreenInfoRequest::Variable, &mut var) {
            Ok(()) => VarFields::parse(&var),
            Err(err) => {
                log::warn!("probe: FBIOGET_VSCREENINFO failed: {}", err);
                VarFields::default()
            }
        };

        let mut fix = vec![0u8; self.fix_layout.len];
        let line_length = match channel.read_screen_info(ScreenInfoRequest::Fixed, &mut fix) {
            Ok(()) => self.fix_layout.line_length(&fix),
            Err(err) => {
                log::warn!("probe: FBIOGET_FSCREENINFO failed: {}", err);
                0
            }
        };

        log::debug!(
            "probe: channel reports {}x{} {}bpp, line_length={}",
            vars.xres,
            vars.yres,
            vars.bits_per_pixel,
            line_length
        );

        (
            Field::new(vars.xres, FieldSource::Channel),
            Field::new(vars.yres, FieldSource::Channel),
            Field::new(vars.bits_per_pixel, FieldSource::Channel),
            Field::new(line_length, FieldSource::Channel),
        )
    }
}
