use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::boot_config::BootConfig;
use crate::error::{DisplayError, Result};

/// Driver modules to try, most likely first
pub const DEFAULT_MODULES: [&str; 3] = ["bcm2708_fb", "vc4", "drm_fbdev_generic"];

/// Loads a kernel module by name
pub trait ModuleLoader {
    fn load(&self, module: &str) -> io::Result<()>;
}

/// Runs `<command> <module>`, by default `sudo modprobe <module>`, with a hard timeout
#[derive(Debug, Clone)]
pub struct Modprobe {
    /// Program and leading arguments; the module name is appended
    pub command: Vec<String>,
    pub timeout: Duration,
}

impl Default for Modprobe {
    fn default() -> Self {
        Self {
            command: vec!["sudo".to_string(), "modprobe".to_string()],
            timeout: Duration::from_secs(10),
        }
    }
}

impl ModuleLoader for Modprobe {
    fn load(&self, module: &str) -> io::Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty module load command"))?;

        let mut child = Command::new(program)
            .args(args)
            .arg(module)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return if status.success() {
                    Ok(())
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("modprobe {module} exited with {status}"),
                    ))
                };
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("modprobe {module} timed out after {:?}", self.timeout),
                ));
            }
            thread::sleep(Duration::from_millis(50));
        }
    }
}

/// Makes sure the framebuffer device node exists before it is opened
#[derive(Debug, Clone)]
pub struct DeviceAcquirer<L: ModuleLoader = Modprobe> {
    loader: L,
    modules: Vec<String>,
    boot_config: BootConfig,
    poll_timeout: Duration,
    poll_interval: Duration,
}

impl Default for DeviceAcquirer<Modprobe> {
    fn default() -> Self {
        Self::new(Modprobe::default())
    }
}

impl<L: ModuleLoader> DeviceAcquirer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            boot_config: BootConfig::default(),
            poll_timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(200),
        }
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_boot_config(mut self, boot_config: BootConfig) -> Self {
        self.boot_config = boot_config;
        self
    }

    pub fn with_polling(mut self, timeout: Duration, interval: Duration) -> Self {
        self.poll_timeout = timeout;
        self.poll_interval = interval;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Succeed once `device` exists, loading driver modules if needed
    pub fn ensure(&self, device: &Path) -> Result<()> {
        if device.exists() {
            return Ok(());
        }

        log::warn!(
            "{} not found, attempting to load framebuffer modules",
            device.display()
        );

        for module in &self.modules {
            log::info!("trying modprobe {}", module);
            if let Err(err) = self.loader.load(module) {
                log::warn!("modprobe {} failed: {}", module, err);
                continue;
            }
            if self.wait_for(device) {
                log::info!("{} appeared after loading {}", device.display(), module);
                return Ok(());
            }
            log::warn!(
                "{} still missing {:?} after loading {}",
                device.display(),
                self.poll_timeout,
                module
            );
        }

        Err(DisplayError::DeviceNotFound {
            device: PathBuf::from(device),
            modules: self.modules.clone(),
            hint: self.boot_config.diagnose(),
        })
    }

    /// Poll for the device node until the timeout runs out
    fn wait_for(&self, device: &Path) -> bool {
        let deadline = Instant::now() + self.poll_timeout;
        loop {
            if device.exists() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }
}
