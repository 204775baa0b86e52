//! The seam between the overlay controller and the windowing toolkit

use serde::{Deserialize, Serialize};

use crate::{Error, StealthTarget, WindowGeometry, WorkArea};

/// Operations the controller issues against its one native window.
///
/// All coordinates are logical pixels.
pub trait NativeWindow {
    /// True once the native window has been torn down underneath us
    fn is_destroyed(&self) -> bool;

    /// Bounds as the OS currently reports them
    fn outer_geometry(&self) -> Result<WindowGeometry, Error>;

    fn set_geometry(&self, geometry: WindowGeometry) -> Result<(), Error>;

    fn set_position(&self, x: i32, y: i32) -> Result<(), Error>;

    /// Make the window visible without taking input focus
    fn show_inactive(&self) -> Result<(), Error>;

    fn hide(&self) -> Result<(), Error>;
}

/// Requested initial bounds for the overlay window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    pub x: i32,
    pub y: i32,
    /// `None` leaves the width to the toolkit default
    pub width: Option<f64>,
    pub height: f64,
}

/// Creates the overlay window and reports display information
pub trait OverlayHost {
    type Window: NativeWindow + StealthTarget;

    fn primary_work_area(&self) -> Result<WorkArea, Error>;

    /// Build the native window, hidden, frameless, transparent and on top
    fn create_window(&self, spec: &WindowSpec) -> Result<Self::Window, Error>;

    /// Start forwarding move/resize/close notifications for `window` back to
    /// the controller as [`NativeEvent`]s
    fn observe(&self, window: &Self::Window);
}

/// Geometry changes observed on the native window
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NativeEvent {
    Moved { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
    Closed,
}
