pub mod acquire;
pub mod boot_config;
pub mod fbdev;

pub use acquire::{DeviceAcquirer, ModuleLoader, Modprobe, DEFAULT_MODULES};
pub use boot_config::{BootConfig, DEFAULT_BOOT_CONFIGS, DISPLAY_OVERLAYS};
pub use fbdev::{DeviceOpener, DisplayDevice, FbDevice, FbdevOpener};
