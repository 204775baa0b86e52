use std::sync::TryLockError;

use ghostpane_overlay::{
    Error, NativeEvent, NativeWindow, OverlayHost, StealthAttribute, StealthTarget,
    WindowGeometry, WindowSpec, WorkArea,
};
use tauri::{
    AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
    window::Color,
};
use tracing::{error, trace};

use crate::{OverlayState, overlay::platform};

/// Label of the one overlay window
pub const OVERLAY_LABEL: &str = "overlay";

/// Tauri's own default when no width is given
const DEFAULT_WIDTH: f64 = 800.0;

fn native(e: tauri::Error) -> Error {
    Error::NativeOperationFailed(e.to_string())
}

/// The overlay's webview window, addressed in logical pixels
pub struct TauriOverlayWindow(pub WebviewWindow);

impl TauriOverlayWindow {
    pub fn label(&self) -> &str {
        self.0.label()
    }
}

impl NativeWindow for TauriOverlayWindow {
    fn is_destroyed(&self) -> bool {
        self.0
            .app_handle()
            .get_webview_window(self.0.label())
            .is_none()
    }

    fn outer_geometry(&self) -> Result<WindowGeometry, Error> {
        let scale = self.0.scale_factor().map_err(native)?;
        let position = self
            .0
            .outer_position()
            .map_err(native)?
            .to_logical::<i32>(scale);
        let size = self.0.outer_size().map_err(native)?.to_logical::<u32>(scale);

        Ok(WindowGeometry {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn set_geometry(&self, geometry: WindowGeometry) -> Result<(), Error> {
        platform::set_frame(
            &self.0,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
        )
    }

    fn set_position(&self, x: i32, y: i32) -> Result<(), Error> {
        platform::set_origin(&self.0, x, y)
    }

    fn show_inactive(&self) -> Result<(), Error> {
        platform::show_without_focus(&self.0)
    }

    fn hide(&self) -> Result<(), Error> {
        self.0.hide().map_err(native)
    }
}

impl StealthTarget for TauriOverlayWindow {
    fn apply_stealth(&self, attribute: StealthAttribute) -> Result<(), Error> {
        platform::apply_attribute(&self.0, attribute)
    }
}

/// Builds the overlay window and reports the primary display through Tauri
pub struct TauriHost {
    app: AppHandle,
    entry_point: String,
}

impl TauriHost {
    pub fn new(app: AppHandle, entry_point: String) -> Self {
        Self { app, entry_point }
    }
}

impl OverlayHost for TauriHost {
    type Window = TauriOverlayWindow;

    fn primary_work_area(&self) -> Result<WorkArea, Error> {
        let monitor = self
            .app
            .primary_monitor()
            .map_err(native)?
            .ok_or_else(|| Error::NoDisplay("no primary monitor".to_string()))?;

        let size = monitor
            .work_area()
            .size
            .to_logical::<u32>(monitor.scale_factor());

        Ok(WorkArea {
            width: size.width,
            height: size.height,
        })
    }

    fn create_window(&self, spec: &WindowSpec) -> Result<TauriOverlayWindow, Error> {
        // Start hidden so the stealth attributes are in place before the
        // window can show up anywhere
        let window = WebviewWindowBuilder::new(
            &self.app,
            OVERLAY_LABEL,
            WebviewUrl::App(self.entry_point.clone().into()),
        )
        .title("Ghostpane")
        .inner_size(spec.width.unwrap_or(DEFAULT_WIDTH), spec.height)
        .position(f64::from(spec.x), f64::from(spec.y))
        .decorations(false)
        .transparent(true)
        .background_color(Color(0, 0, 0, 0))
        .always_on_top(true)
        .skip_taskbar(true)
        .shadow(false)
        .focused(false)
        .visible(false)
        .build()
        .map_err(|e| Error::WindowCreation(e.to_string()))?;

        Ok(TauriOverlayWindow(window))
    }

    fn observe(&self, window: &TauriOverlayWindow) {
        let app = self.app.clone();
        let label = window.label().to_string();

        window.0.on_window_event(move |event| {
            let scale = app
                .get_webview_window(&label)
                .and_then(|w| w.scale_factor().ok())
                .unwrap_or(1.0);

            let native = match event {
                WindowEvent::Moved(position) => {
                    let position = position.to_logical::<i32>(scale);
                    NativeEvent::Moved {
                        x: position.x,
                        y: position.y,
                    }
                }
                WindowEvent::Resized(size) => {
                    let size = size.to_logical::<u32>(scale);
                    NativeEvent::Resized {
                        width: size.width,
                        height: size.height,
                    }
                }
                WindowEvent::Destroyed => NativeEvent::Closed,
                _ => return,
            };

            forward_native_event(&app, native);
        });
    }
}

fn forward_native_event(app: &AppHandle, event: NativeEvent) {
    let Some(state) = app.try_state::<OverlayState>() else {
        return;
    };

    // Moves and resizes triggered by our own commands arrive while the
    // command still holds the lock; the command has already cached them
    let guard = match event {
        NativeEvent::Closed => state.0.lock().map_err(|_| ()),
        _ => match state.0.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => {
                trace!(?event, "overlay busy, dropping native event");
                return;
            }
            Err(TryLockError::Poisoned(_)) => Err(()),
        },
    };

    match guard {
        Ok(mut overlay) => overlay.handle_native_event(event),
        Err(()) => error!(?event, "overlay state lock poisoned"),
    }
}
