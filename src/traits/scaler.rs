use std::borrow::Cow;

use crate::frame::Frame;

/// Resizes a frame to an exact target size
pub trait FrameScaler {
    /// Frame of exactly `width` x `height`; borrows when no resize is needed
    fn scale<'a>(&self, frame: &'a Frame, width: u32, height: u32) -> Cow<'a, Frame>;
}
