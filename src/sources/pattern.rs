use crate::error::Result;
use crate::frame::Frame;
use crate::traits::FrameSource;

/// SMPTE-style bars in BGR: white, yellow, cyan, green, magenta, red, blue, black
const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [0, 255, 255],
    [255, 255, 0],
    [0, 255, 0],
    [255, 0, 255],
    [0, 0, 255],
    [255, 0, 0],
    [0, 0, 0],
];

/// Synthetic source: vertical color bars scrolling one step per frame
#[derive(Debug, Clone)]
pub struct TestPattern {
    width: u32,
    height: u32,
    step: u32,
    offset: u32,
}

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            step: (width / 64).max(1),
            offset: 0,
        }
    }

    /// Frame for a given scroll offset
    pub fn render_at(&self, offset: u32) -> Result<Frame> {
        let bar_width = (self.width as usize / BARS.len()).max(1);
        let mut row = Vec::with_capacity(self.width as usize * Frame::CHANNELS);
        for x in 0..self.width as usize {
            let shifted = (x + offset as usize) % self.width.max(1) as usize;
            let bar = (shifted / bar_width).min(BARS.len() - 1);
            row.extend_from_slice(&BARS[bar]);
        }
        Frame::solid_rows(self.width, self.height, &row)
    }
}

impl FrameSource for TestPattern {
    fn grab(&mut self) -> Option<Frame> {
        let frame = self.render_at(self.offset);
        self.offset = (self.offset + self.step) % self.width.max(1);
        match frame {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::warn!("test pattern: {}", err);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "test-pattern"
    }
}
