pub mod blit;
pub mod cli;
pub mod config;
pub mod core;
pub mod device;
pub mod display;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pixel;
pub mod scale;
pub mod shutdown;
pub mod sources;
pub mod traits;

pub use config::{AppConfig, DisplayConfig, StreamConfig};
pub use display::FramebufferDisplay;
pub use error::{DisplayError, Result};
pub use frame::Frame;
pub use geometry::ScreenGeometry;
pub use pixel::PixelFormat;
