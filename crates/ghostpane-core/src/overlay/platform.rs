//! Platform-specific stealth calls for the overlay window
//!
//! Each [`StealthAttribute`] maps to a Tauri window call, sometimes followed by
//! a native one:
//! - macOS: collection behavior and window level through AppKit
//! - Windows: extended window styles and z-order through Win32
//! - Linux and others: Tauri calls only
//!
//! Attributes a platform has no way to express return
//! [`Error::CapabilityUnavailable`] so the caller can skip them.

use ghostpane_overlay::{Error, StealthAttribute, TopLevel};
use tauri::{WebviewWindow, window::Color};

fn native(e: tauri::Error) -> Error {
    Error::NativeOperationFailed(e.to_string())
}

pub fn apply_attribute(window: &WebviewWindow, attribute: StealthAttribute) -> Result<(), Error> {
    match attribute {
        StealthAttribute::ExcludeFromCapture => window.set_content_protected(true).map_err(native),
        StealthAttribute::HideFromMissionControl => hide_from_window_cycle(window),
        StealthAttribute::VisibleOnAllWorkspaces => {
            window.set_visible_on_all_workspaces(true).map_err(native)?;
            join_full_screen_spaces(window)
        }
        StealthAttribute::AlwaysOnTop(level) => {
            window.set_always_on_top(true).map_err(native)?;
            raise_level(window, level)
        }
        StealthAttribute::SkipTaskbar => window.set_skip_taskbar(true).map_err(native),
        StealthAttribute::HideMenuBar => window.hide_menu().map_err(native),
        StealthAttribute::TransparentBackground => window
            .set_background_color(Some(Color(0, 0, 0, 0)))
            .map_err(native),
        StealthAttribute::ToolWindow => mark_tool_window(window),
    }
}

/// Order the window front without making it key or active
pub fn show_without_focus(window: &WebviewWindow) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        let ns_window = macos::ns_window(window)?;
        ns_window.orderFrontRegardless();
        Ok(())
    }

    #[cfg(target_os = "windows")]
    {
        windows_impl::show_no_activate(window)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        window.show().map_err(native)
    }
}

/// Move and resize in logical pixels from a top-left origin. On macOS the
/// frame is set directly so AppKit does not push it below the menu bar.
pub fn set_frame(
    window: &WebviewWindow,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        macos::set_unconstrained_frame(window, x, y, Some((width, height)))
    }

    #[cfg(not(target_os = "macos"))]
    {
        window
            .set_size(tauri::LogicalSize::new(width, height))
            .map_err(native)?;
        set_origin(window, x, y)
    }
}

/// Move without touching the size
pub fn set_origin(window: &WebviewWindow, x: i32, y: i32) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        macos::set_unconstrained_frame(window, x, y, None)
    }

    #[cfg(not(target_os = "macos"))]
    {
        window
            .set_position(tauri::LogicalPosition::new(x, y))
            .map_err(native)
    }
}

/// AppKit measures y upward from the bottom of the primary screen. Negative
/// top-left `y` (the upward overhang) lands above the screen top.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn appkit_origin_y(screen_height: f64, y: i32, height: f64) -> f64 {
    screen_height - f64::from(y) - height
}

fn hide_from_window_cycle(window: &WebviewWindow) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        use objc2_app_kit::NSWindowCollectionBehavior;

        // Transient keeps window managers and Mission Control from picking the
        // window up, IgnoresCycle drops it from Cmd+` cycling
        macos::add_collection_behavior(
            window,
            NSWindowCollectionBehavior::Transient | NSWindowCollectionBehavior::IgnoresCycle,
        )
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = window;
        Err(Error::CapabilityUnavailable(
            "window cycle exclusion is only available on macOS".to_string(),
        ))
    }
}

fn join_full_screen_spaces(window: &WebviewWindow) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        use objc2_app_kit::NSWindowCollectionBehavior;

        macos::add_collection_behavior(
            window,
            NSWindowCollectionBehavior::CanJoinAllSpaces
                | NSWindowCollectionBehavior::Stationary
                | NSWindowCollectionBehavior::FullScreenAuxiliary,
        )
    }

    // set_visible_on_all_workspaces already covers every desktop here
    #[cfg(not(target_os = "macos"))]
    {
        let _ = window;
        Ok(())
    }
}

fn raise_level(window: &WebviewWindow, level: TopLevel) -> Result<(), Error> {
    #[cfg(target_os = "macos")]
    {
        use objc2_app_kit::{NSFloatingWindowLevel, NSScreenSaverWindowLevel, NSWindowLevel};

        let ns_level: NSWindowLevel = match level {
            TopLevel::Floating => NSFloatingWindowLevel,
            TopLevel::ScreenSaver => NSScreenSaverWindowLevel,
        };
        macos::ns_window(window)?.setLevel(ns_level);
        Ok(())
    }

    #[cfg(target_os = "windows")]
    {
        match level {
            TopLevel::ScreenSaver => windows_impl::set_topmost(window),
            TopLevel::Floating => Ok(()),
        }
    }

    // Linux has a single always-on-top layer, which set_always_on_top has
    // already requested
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let _ = (window, level);
        Ok(())
    }
}

fn mark_tool_window(window: &WebviewWindow) -> Result<(), Error> {
    #[cfg(target_os = "windows")]
    {
        windows_impl::add_tool_window_style(window)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = window;
        Err(Error::CapabilityUnavailable(
            "tool window style is only available on Windows".to_string(),
        ))
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use ghostpane_overlay::Error;
    use objc2::rc::Retained;
    use objc2_app_kit::{NSWindow, NSWindowCollectionBehavior};
    use tauri::WebviewWindow;
    use tracing::error;

    pub fn ns_window(window: &WebviewWindow) -> Result<Retained<NSWindow>, Error> {
        let ns_window_ptr = window.ns_window().map_err(|e| {
            Error::NativeOperationFailed(format!("Failed to get NSWindow handle: {}", e))
        })?;

        // SAFETY: the pointer is valid while the window exists, and retaining
        // keeps it alive for the duration of the call
        unsafe { Retained::retain(ns_window_ptr as *mut NSWindow) }
            .ok_or_else(|| Error::NativeOperationFailed("NSWindow pointer was null".to_string()))
    }

    /// Set the frame on the main thread, bypassing frame constraining.
    /// `size` of `None` keeps the current size.
    pub fn set_unconstrained_frame(
        window: &WebviewWindow,
        x: i32,
        y: i32,
        size: Option<(u32, u32)>,
    ) -> Result<(), Error> {
        // Only the address crosses threads; it is turned back into a window
        // on the main thread
        let ptr_addr = window.ns_window().map_err(|e| {
            Error::NativeOperationFailed(format!("Failed to get NSWindow handle: {}", e))
        })? as usize;

        window
            .run_on_main_thread(move || {
                use objc2::MainThreadMarker;
                use objc2_app_kit::NSScreen;
                use objc2_foundation::{NSPoint, NSRect, NSSize};

                // SAFETY: run_on_main_thread runs this on the main thread
                let mtm = unsafe { MainThreadMarker::new_unchecked() };

                // SAFETY: the pointer is valid while the window exists
                let Some(ns_window) = (unsafe { Retained::retain(ptr_addr as *mut NSWindow) })
                else {
                    error!("Failed to retain NSWindow pointer");
                    return;
                };

                let current = ns_window.frame().size;
                let (width, height) = match size {
                    Some((width, height)) => (f64::from(width), f64::from(height)),
                    None => (current.width, current.height),
                };

                let Some(primary) = NSScreen::screens(mtm).firstObject() else {
                    error!("No screen to position the overlay on");
                    return;
                };
                let macos_y = super::appkit_origin_y(primary.frame().size.height, y, height);

                let frame = NSRect::new(
                    NSPoint::new(f64::from(x), macos_y),
                    NSSize::new(width, height),
                );
                ns_window.setFrame_display(frame, false);
            })
            .map_err(|e| {
                Error::NativeOperationFailed(format!("Failed to run on main thread: {}", e))
            })
    }

    pub fn add_collection_behavior(
        window: &WebviewWindow,
        behavior: NSWindowCollectionBehavior,
    ) -> Result<(), Error> {
        let ns_window = ns_window(window)?;
        let current = ns_window.collectionBehavior();
        ns_window.setCollectionBehavior(current | behavior);
        Ok(())
    }
}

#[cfg(target_os = "windows")]
mod windows_impl {
    use ghostpane_overlay::Error;
    use tauri::WebviewWindow;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetWindowLongPtrW, HWND_TOPMOST, SW_SHOWNOACTIVATE, SWP_NOACTIVATE,
        SWP_NOMOVE, SWP_NOSIZE, SetWindowLongPtrW, SetWindowPos, ShowWindow, WS_EX_APPWINDOW,
        WS_EX_TOOLWINDOW,
    };

    fn hwnd(window: &WebviewWindow) -> Result<HWND, Error> {
        let hwnd = window.hwnd().map_err(|e| {
            Error::NativeOperationFailed(format!("Failed to get HWND handle: {}", e))
        })?;
        Ok(HWND(hwnd.0))
    }

    pub fn add_tool_window_style(window: &WebviewWindow) -> Result<(), Error> {
        let hwnd = hwnd(window)?;

        unsafe {
            // Tool windows stay out of the taskbar and Alt+Tab; APPWINDOW
            // would force them back in
            let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
            ex_style |= WS_EX_TOOLWINDOW.0 as isize;
            ex_style &= !(WS_EX_APPWINDOW.0 as isize);
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);
        }

        Ok(())
    }

    pub fn set_topmost(window: &WebviewWindow) -> Result<(), Error> {
        let hwnd = hwnd(window)?;

        unsafe {
            SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| Error::NativeOperationFailed(format!("Failed to raise window: {}", e)))
    }

    pub fn show_no_activate(window: &WebviewWindow) -> Result<(), Error> {
        let hwnd = hwnd(window)?;

        unsafe {
            // Returns the previous visibility, not an error
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        }

        Ok(())
    }
}
