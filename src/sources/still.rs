use std::path::Path;

use anyhow::{Context, Result};

use crate::frame::Frame;
use crate::traits::FrameSource;

/// Source that repeats one decoded image
#[derive(Debug, Clone)]
pub struct StillImage {
    frame: Frame,
    name: String,
}

impl StillImage {
    /// Decode any format the `image` crate reads, stored as BGR
    pub fn open(path: &Path) -> Result<Self> {
        let rgb = image::open(path)
            .with_context(|| format!("Failed to load image: {}", path.display()))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut pixels = rgb.into_raw();
        for px in pixels.chunks_exact_mut(3) {
            px.swap(0, 2);
        }

        Ok(Self {
            frame: Frame::new(width, height, pixels)?,
            name: path.display().to_string(),
        })
    }
}

impl FrameSource for StillImage {
    fn grab(&mut self) -> Option<Frame> {
        Some(self.frame.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
