use std::fs;
use std::path::{Path, PathBuf};

/// Default sysfs class directory for framebuffer devices
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/graphics";

/// Read-only view of `/sys/class/graphics/fbN`
#[derive(Debug, Clone)]
pub struct SysfsAttributes {
    dir: PathBuf,
}

impl SysfsAttributes {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Attribute directory for a device node, e.g. `/dev/fb1` -> `<root>/fb1`
    pub fn for_device(root: &Path, device: &Path) -> Option<Self> {
        device.file_name().map(|name| Self::new(root.join(name)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `virtual_size` as (width, height)
    pub fn virtual_size(&self) -> Option<(u32, u32)> {
        parse_pair(&self.read("virtual_size")?)
    }

    pub fn bits_per_pixel(&self) -> Option<u32> {
        self.read("bits_per_pixel")?.trim().parse().ok()
    }

    pub fn stride(&self) -> Option<u32> {
        self.read("stride")?.trim().parse().ok()
    }

    fn read(&self, attribute: &str) -> Option<String> {
        let path = self.dir.join(attribute);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::debug!("sysfs: cannot read {}: {}", path.display(), err);
                None
            }
        }
    }
}

fn parse_pair(input: &str) -> Option<(u32, u32)> {
    let (w, h) = input.trim().split_once(',')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
