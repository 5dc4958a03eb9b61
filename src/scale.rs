use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};

use crate::frame::Frame;
use crate::traits::FrameScaler;

/// Nearest-neighbor scaler backed by `image::imageops`
///
/// Channels are resampled independently, so BGR data passes through
/// unchanged in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestScaler;

impl FrameScaler for NearestScaler {
    fn scale<'a>(&self, frame: &'a Frame, width: u32, height: u32) -> Cow<'a, Frame> {
        if frame.dimensions() == (width, height) {
            return Cow::Borrowed(frame);
        }

        let source: Option<ImageBuffer<Rgb<u8>, &[u8]>> =
            ImageBuffer::from_raw(frame.width(), frame.height(), frame.pixels());

        match source {
            Some(source) if frame.width() > 0 && frame.height() > 0 => {
                let resized = imageops::resize(&source, width, height, FilterType::Nearest);
                Cow::Owned(Frame::from_raw_parts(width, height, resized.into_raw()))
            }
            _ => Cow::Owned(Frame::solid(width, height, [0, 0, 0])),
        }
    }
}
