use crate::frame::Frame;

/// Supplier of BGR frames, one per tick
pub trait FrameSource {
    /// Next frame, or `None` when nothing could be acquired this tick.
    /// A `None` is transient: callers skip the tick and try again later.
    fn grab(&mut self) -> Option<Frame>;

    /// Short label for logs
    fn name(&self) -> &str;
}
