//! Stealth overlay window core
//!
//! Geometry arithmetic, the overlay window state machine and the per-platform
//! stealth attribute dispatch. Nothing in this crate talks to a windowing
//! toolkit directly; the toolkit plugs in through [`OverlayHost`],
//! [`NativeWindow`] and [`StealthTarget`].

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod session;
pub mod stealth;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use session::*;
pub use stealth::*;
