use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::device::{BootConfig, DeviceAcquirer, Modprobe, DEFAULT_BOOT_CONFIGS, DEFAULT_MODULES};
use crate::geometry::sysfs::DEFAULT_SYSFS_ROOT;
use crate::geometry::{GeometryProbe, SysfsAttributes};

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub stream: StreamConfig,
}

impl AppConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Defaults when no file is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Framebuffer device and discovery settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Device node to render into
    pub device: PathBuf,
    /// Driver modules tried when the node is missing, in order
    pub modules: Vec<String>,
    /// Boot config files inspected for display overlays
    pub boot_configs: Vec<PathBuf>,
    /// How long to wait for the node after each module load
    pub poll_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Module loader program and leading arguments
    pub modprobe_command: Vec<String>,
    pub modprobe_timeout_ms: u64,
    /// Parent of the per-device sysfs attribute directories
    pub sysfs_root: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            boot_configs: DEFAULT_BOOT_CONFIGS.iter().map(PathBuf::from).collect(),
            poll_timeout_ms: 2000,
            poll_interval_ms: 200,
            modprobe_command: vec!["sudo".to_string(), "modprobe".to_string()],
            modprobe_timeout_ms: 10_000,
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

impl DisplayConfig {
    pub fn acquirer(&self) -> DeviceAcquirer<Modprobe> {
        let loader = Modprobe {
            command: self.modprobe_command.clone(),
            timeout: Duration::from_millis(self.modprobe_timeout_ms),
        };
        DeviceAcquirer::new(loader)
            .with_modules(self.modules.iter().cloned())
            .with_boot_config(BootConfig::new(self.boot_configs.iter().cloned()))
            .with_polling(
                Duration::from_millis(self.poll_timeout_ms),
                Duration::from_millis(self.poll_interval_ms),
            )
    }

    pub fn probe(&self) -> GeometryProbe {
        GeometryProbe::new(SysfsAttributes::for_device(&self.sysfs_root, &self.device))
    }
}

/// Streaming loop settings for the binary
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub target_fps: f32,
    /// Seconds between FPS log lines
    pub fps_report_secs: f32,
    /// Back-off after the source fails to deliver a frame
    pub retry_delay_ms: u64,
    /// Size of the synthetic test pattern
    pub pattern_width: u32,
    pub pattern_height: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            target_fps: 30.0,
            fps_report_secs: 5.0,
            retry_delay_ms: 100,
            pattern_width: 640,
            pattern_height: 480,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display.device, PathBuf::from("/dev/fb0"));
        assert_eq!(config.display.modules, vec!["bcm2708_fb", "vc4", "drm_fbdev_generic"]);
        assert_eq!(config.stream.target_fps, 30.0);
        assert_eq!(config.display.modprobe_command, vec!["sudo", "modprobe"]);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "display": { "device": "/dev/fb1" }, "stream": { "target_fps": 15.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.display.device, PathBuf::from("/dev/fb1"));
        assert_eq!(config.display.poll_timeout_ms, 2000);
        assert_eq!(config.stream.target_fps, 15.0);
        assert_eq!(config.stream.retry_delay_ms, 100);
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn acquirer_uses_configured_modules() {
        let config = DisplayConfig {
            modules: vec!["simplefb".into()],
            ..DisplayConfig::default()
        };
        assert_eq!(config.acquirer().modules(), &["simplefb".to_string()]);
    }
}
