use std::fs;
use std::path::PathBuf;

/// Overlays that enable the vc4 display driver
pub const DISPLAY_OVERLAYS: [&str; 2] = ["dtoverlay=vc4-kms-v3d", "dtoverlay=vc4-fkms-v3d"];

/// Bullseye and Bookworm locations of `config.txt`
pub const DEFAULT_BOOT_CONFIGS: [&str; 2] = ["/boot/config.txt", "/boot/firmware/config.txt"];

/// Read-only inspection of the host boot configuration
#[derive(Debug, Clone)]
pub struct BootConfig {
    paths: Vec<PathBuf>,
}

impl BootConfig {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Operator hint for a device node that never appeared.
    ///
    /// Uses the first config file that can be read.
    pub fn diagnose(&self) -> String {
        for path in &self.paths {
            if !path.is_file() {
                continue;
            }
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    log::debug!("boot config {} unreadable: {}", path.display(), err);
                    continue;
                }
            };

            if DISPLAY_OVERLAYS.iter().any(|overlay| text.contains(overlay)) {
                return format!(
                    "Found a vc4 overlay in {}, but the framebuffer device still did not appear. \
                     A reboot may be required.",
                    path.display()
                );
            }

            let lines: Vec<String> = DISPLAY_OVERLAYS.iter().map(|o| format!("  {o}")).collect();
            return format!(
                "No vc4 overlay found in {}. Add one of the following lines and reboot:\n{}",
                path.display(),
                lines.join("\n")
            );
        }

        "Could not locate /boot/config.txt to check for display overlays.".to_string()
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOOT_CONFIGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_present_suggests_reboot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "[all]\ndtoverlay=vc4-kms-v3d\nmax_framebuffers=2\n").unwrap();

        let hint = BootConfig::new([&path]).diagnose();
        assert!(hint.contains("reboot may be required"), "{hint}");
    }

    #[test]
    fn overlay_missing_lists_directives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "arm_64bit=1\n").unwrap();

        let hint = BootConfig::new([&path]).diagnose();
        assert!(hint.contains("No vc4 overlay found"));
        assert!(hint.contains("  dtoverlay=vc4-kms-v3d"));
        assert!(hint.contains("  dtoverlay=vc4-fkms-v3d"));
    }

    #[test]
    fn first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let firmware = dir.path().join("firmware.txt");
        fs::write(&firmware, "dtoverlay=vc4-fkms-v3d\n").unwrap();

        let hint = BootConfig::new([&missing, &firmware]).diagnose();
        assert!(hint.contains("firmware.txt"));
        assert!(hint.contains("reboot"));
    }

    #[test]
    fn no_config_found() {
        let dir = tempfile::tempdir().unwrap();
        let hint = BootConfig::new([dir.path().join("nope")]).diagnose();
        assert!(hint.starts_with("Could not locate"));
    }
}
