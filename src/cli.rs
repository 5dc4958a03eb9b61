// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "fbstream")]
#[command(about = "Stream frames to the Linux framebuffer without X11", long_about = None)]
pub struct Cli {
    /// Framebuffer device path
    #[arg(short = 'f', long = "fb")]
    pub fb: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Target frames per second
    #[arg(long = "fps")]
    pub fps: Option<f32>,

    /// Show a still image instead of the test pattern
    #[arg(long = "image")]
    pub image: Option<PathBuf>,

    /// Stop after this many rendered frames
    #[arg(long = "frames")]
    pub frames: Option<u64>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Command-line flags take precedence over the config file
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(fb) = &self.fb {
            config.display.device = fb.clone();
        }
        if let Some(fps) = self.fps {
            config.stream.target_fps = fps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_config_alone() {
        let cli = Cli::parse_from(["fbstream"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AppConfig::default());
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["fbstream", "--fb", "/dev/fb1", "--fps", "12.5", "--frames", "3"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.display.device, PathBuf::from("/dev/fb1"));
        assert_eq!(config.stream.target_fps, 12.5);
        assert_eq!(cli.frames, Some(3));
    }
}
