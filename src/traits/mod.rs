pub mod frame;
pub mod scaler;

pub use frame::*;
pub use scaler::*;
