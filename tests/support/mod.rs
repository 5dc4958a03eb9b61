#![allow(dead_code)]

//! Fake display devices shared by the integration tests

use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use fbstream::blit::{write_into, DisplayBuffer};
use fbstream::device::{BootConfig, DeviceAcquirer, DeviceOpener, DisplayDevice, ModuleLoader};
use fbstream::geometry::{FixLayout, GeometryProbe, ScreenInfoChannel, ScreenInfoRequest, SysfsAttributes, WordWidth};
use fbstream::FramebufferDisplay;

/// State observable after the engine has taken ownership of the fakes
#[derive(Default)]
pub struct Shared {
    pub memory: RefCell<Vec<u8>>,
    pub writes: RefCell<Vec<(usize, usize)>>,
    pub opens: Cell<usize>,
    pub device_closed: Cell<bool>,
    pub drops: RefCell<Vec<&'static str>>,
    pub loads: RefCell<Vec<String>>,
}

/// What the kernel channel reports
#[derive(Debug, Clone, Copy)]
pub struct ChannelInfo {
    pub xres: u32,
    pub yres: u32,
    pub bits_per_pixel: u32,
    pub line_length: u32,
}

impl ChannelInfo {
    pub fn new(xres: u32, yres: u32, bits_per_pixel: u32, line_length: u32) -> Self {
        Self {
            xres,
            yres,
            bits_per_pixel,
            line_length,
        }
    }
}

pub struct FakeBuffer {
    shared: Rc<Shared>,
}

impl DisplayBuffer for FakeBuffer {
    fn size(&self) -> usize {
        self.shared.memory.borrow().len()
    }

    fn write_span(&mut self, offset: usize, bytes: &[u8]) -> fbstream::Result<()> {
        write_into(&mut self.shared.memory.borrow_mut(), offset, bytes)?;
        self.shared.writes.borrow_mut().push((offset, bytes.len()));
        Ok(())
    }
}

impl Drop for FakeBuffer {
    fn drop(&mut self) {
        self.shared.drops.borrow_mut().push("buffer");
    }
}

pub struct FakeDevice {
    shared: Rc<Shared>,
    info: ChannelInfo,
}

impl ScreenInfoChannel for FakeDevice {
    fn read_screen_info(&self, request: ScreenInfoRequest, record: &mut [u8]) -> io::Result<()> {
        let mut put = |offset: usize, value: u32| {
            record[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
        };
        match request {
            ScreenInfoRequest::Variable => {
                put(0, self.info.xres);
                put(4, self.info.yres);
                put(24, self.info.bits_per_pixel);
            }
            ScreenInfoRequest::Fixed => {
                let layout = FixLayout::for_width(WordWidth::native());
                put(layout.line_length, self.info.line_length);
            }
        }
        Ok(())
    }
}

impl DisplayDevice for FakeDevice {
    type Buffer = FakeBuffer;

    fn map(&self, len: usize) -> io::Result<FakeBuffer> {
        let mut memory = self.shared.memory.borrow_mut();
        if memory.len() != len {
            *memory = vec![0xAA; len];
        }
        Ok(FakeBuffer {
            shared: Rc::clone(&self.shared),
        })
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.shared.device_closed.set(true);
        self.shared.drops.borrow_mut().push("device");
    }
}

pub struct FakeOpener {
    pub shared: Rc<Shared>,
    pub info: ChannelInfo,
}

impl DeviceOpener for FakeOpener {
    type Device = FakeDevice;

    fn open(&self, _path: &Path) -> io::Result<FakeDevice> {
        self.shared.opens.set(self.shared.opens.get() + 1);
        self.shared.device_closed.set(false);
        Ok(FakeDevice {
            shared: Rc::clone(&self.shared),
            info: self.info,
        })
    }
}

pub struct FakeLoader {
    pub shared: Rc<Shared>,
}

impl ModuleLoader for FakeLoader {
    fn load(&self, module: &str) -> io::Result<()> {
        self.shared.loads.borrow_mut().push(module.to_string());
        Ok(())
    }
}

pub type FakeDisplay = FramebufferDisplay<FakeOpener, FakeLoader>;

/// Test fixture: a device node that exists on disk plus fake hardware
pub struct Rig {
    pub dir: tempfile::TempDir,
    pub device: PathBuf,
    pub shared: Rc<Shared>,
}

impl Rig {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("fb0");
        std::fs::write(&device, b"").unwrap();
        Self {
            dir,
            device,
            shared: Rc::new(Shared::default()),
        }
    }

    /// Rig whose device node is missing
    pub fn without_node() -> Self {
        let rig = Self::new();
        std::fs::remove_file(&rig.device).unwrap();
        rig
    }

    pub fn sysfs(&self) -> SysfsAttributes {
        let dir = self.dir.path().join("sysfs");
        std::fs::create_dir_all(&dir).unwrap();
        SysfsAttributes::new(dir)
    }

    pub fn display(&self, info: ChannelInfo) -> FakeDisplay {
        self.display_with_probe(info, GeometryProbe::new(None))
    }

    pub fn display_with_probe(&self, info: ChannelInfo, probe: GeometryProbe) -> FakeDisplay {
        let acquirer = DeviceAcquirer::new(FakeLoader {
            shared: Rc::clone(&self.shared),
        })
        .with_boot_config(BootConfig::new(Vec::<PathBuf>::new()))
        .with_polling(Duration::from_millis(20), Duration::from_millis(5));

        let opener = FakeOpener {
            shared: Rc::clone(&self.shared),
            info,
        };
        FramebufferDisplay::with_parts(&self.device, acquirer, opener, probe)
    }
}
