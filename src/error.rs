use std::io;
use std::path::PathBuf;

/// Errors raised by the framebuffer display engine
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// No candidate driver module produced the device node
    #[error(
        "framebuffer device {} could not be created\ntried modprobe for: {}\n\n{hint}",
        .device.display(),
        .modules.join(", ")
    )]
    DeviceNotFound {
        device: PathBuf,
        modules: Vec<String>,
        hint: String,
    },

    /// Every probe stage left the buffer size at zero
    #[error(
        "framebuffer reports no usable geometry ({width}x{height}, {bits_per_pixel}bpp, stride={row_stride})\n\
         no display appears to be attached. Check that:\n  \
         - the HDMI cable is connected before boot\n  \
         - hdmi_force_hotplug=1 is set in the boot config\n  \
         - hdmi_group/hdmi_mode force a resolution if the monitor is not detected"
    )]
    GeometryUnavailable {
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        row_stride: u32,
    },

    /// Row stride shorter than one row of pixels
    #[error("row stride {row_stride} is smaller than a {tight_row_bytes}-byte pixel row")]
    StrideTooSmall { row_stride: u32, tight_row_bytes: u32 },

    #[error("unsupported framebuffer depth: {0}bpp")]
    UnsupportedPixelDepth(u32),

    /// Render called while the engine is closed
    #[error("display is not open")]
    NotOpen,

    #[error("frame {width}x{height} needs {expected} BGR bytes, got {actual}")]
    FrameSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("write of {len} bytes at offset {offset} exceeds display buffer of {capacity} bytes")]
    BufferOverrun {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl DisplayError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_not_found_lists_modules_and_hint() {
        let err = DisplayError::DeviceNotFound {
            device: PathBuf::from("/dev/fb0"),
            modules: vec!["vc4".into(), "bcm2708_fb".into()],
            hint: "A reboot may be required.".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/dev/fb0"));
        assert!(msg.contains("vc4, bcm2708_fb"));
        assert!(msg.contains("A reboot may be required."));
    }

    #[test]
    fn geometry_unavailable_carries_last_known_values() {
        let err = DisplayError::GeometryUnavailable {
            width: 1920,
            height: 0,
            bits_per_pixel: 32,
            row_stride: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("1920x0"));
        assert!(msg.contains("32bpp"));
        assert!(msg.contains("hdmi_force_hotplug"));
    }
}
