pub mod pattern;
pub mod still;

pub use pattern::TestPattern;
pub use still::StillImage;
