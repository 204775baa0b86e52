pub mod platform;
pub mod window;

pub use window::*;
