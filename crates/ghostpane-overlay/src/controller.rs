//! The overlay window state machine
//!
//! The controller owns at most one native window for its whole lifetime and
//! keeps its own cache of the window's bounds. Hidden windows do not report
//! live geometry on every platform, so the cache (not the OS) is what resize,
//! movement and show/hide work from. Native notifications feed the same
//! cache; whichever write came last wins. Resizes and moves issued while
//! hidden also replace the bounds `show` will restore.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    ContentSize, Direction, Error, MovementState, NativeEvent, NativeWindow, OverlayCommand,
    OverlayConfig, OverlayHost, PlatformFamily, SessionFlags, StealthReport, WindowGeometry,
    WindowSpec, apply_stealth_attributes, compute_move, compute_resize_bounds,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Uncreated,
    Visible,
    Hidden,
}

/// Result of a controller operation that did not fail
#[must_use]
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    Ignored(Ignored),
}

/// Why an operation was a no-op
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Ignored {
    /// No window yet, or it was closed
    NotCreated,
    /// The native handle outlived its window
    WindowDestroyed,
    AlreadyCreated,
    AlreadyVisible,
    AlreadyHidden,
    /// Content with no area
    EmptyContent,
    /// Work area narrower than one step
    MovementDisabled,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// State that exists only while the native window does
struct LiveOverlay<W> {
    window: W,
    geometry: WindowGeometry,
    restore: Option<WindowGeometry>,
    movement: MovementState,
    visible: bool,
    stealth: StealthReport,
}

pub struct OverlayController<H: OverlayHost> {
    host: H,
    flags: Arc<SessionFlags>,
    config: OverlayConfig,
    platform: PlatformFamily,
    live: Option<LiveOverlay<H::Window>>,
}

impl<H: OverlayHost> OverlayController<H> {
    pub fn new(host: H, flags: Arc<SessionFlags>, config: OverlayConfig) -> Self {
        Self {
            host,
            flags,
            config,
            platform: PlatformFamily::current(),
            live: None,
        }
    }

    /// Override the stealth platform family (defaults to the build target)
    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = platform;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Create the overlay window. Calling this again while the window exists
    /// does nothing.
    pub fn create(&mut self) -> Result<Outcome, Error> {
        if self.live.is_some() {
            debug!("overlay already created");
            return Ok(Outcome::Ignored(Ignored::AlreadyCreated));
        }

        let work_area = self.host.primary_work_area()?;
        let spec = WindowSpec {
            x: 0,
            y: 0,
            width: self.config.initial_width,
            height: self.config.initial_height,
        };

        let window = self.host.create_window(&spec)?;
        let stealth = apply_stealth_attributes(self.platform, &window);
        if !stealth.is_complete() {
            warn!(
                skipped = stealth.skipped.len(),
                "overlay created without full stealth coverage"
            );
        }

        let geometry = window.outer_geometry().unwrap_or_else(|e| {
            warn!(error = %e, "could not read initial overlay bounds");
            WindowGeometry {
                x: spec.x,
                y: spec.y,
                width: spec.width.map_or(0, |w| w.ceil() as u32),
                height: spec.height.ceil() as u32,
            }
        });

        self.host.observe(&window);

        let movement = MovementState::new(work_area, geometry.x, geometry.y);
        info!(
            ?geometry,
            step = movement.step_size,
            ?work_area,
            "overlay window created"
        );

        let live = self.live.insert(LiveOverlay {
            window,
            geometry,
            restore: None,
            movement,
            visible: false,
            stealth,
        });

        live.window.show_inactive()?;
        live.visible = true;

        Ok(Outcome::Applied)
    }

    /// Fit the window to rendered content of `width` x `height`.
    pub fn resize_to_content(&mut self, width: f64, height: f64) -> Result<Outcome, Error> {
        let live = match live_window(&mut self.live, "resize") {
            Ok(live) => live,
            Err(ignored) => return Ok(Outcome::Ignored(ignored)),
        };

        let work_area = self.host.primary_work_area()?;
        let debug_mode = self.flags.get_has_debugged();
        let content = ContentSize { width, height };
        let current = (live.geometry.x, live.geometry.y);

        let Some(bounds) = compute_resize_bounds(content, current, work_area, debug_mode) else {
            debug!(width, height, "ignoring resize to empty content");
            return Ok(Outcome::Ignored(Ignored::EmptyContent));
        };

        live.window.set_geometry(bounds)?;
        live.geometry = bounds;
        live.movement.current_x = f64::from(bounds.x);
        if !live.visible {
            live.restore = Some(bounds);
        }
        debug!(?bounds, debug_mode, "overlay resized to content");

        Ok(Outcome::Applied)
    }

    pub fn hide(&mut self) -> Result<Outcome, Error> {
        let live = match live_window(&mut self.live, "hide") {
            Ok(live) => live,
            Err(ignored) => return Ok(Outcome::Ignored(ignored)),
        };
        if !live.visible {
            return Ok(Outcome::Ignored(Ignored::AlreadyHidden));
        }

        let snapshot = match live.window.outer_geometry() {
            Ok(geometry) => geometry,
            Err(e) => {
                debug!(error = %e, "using cached bounds for hide snapshot");
                live.geometry
            }
        };

        live.window.hide()?;
        live.geometry = snapshot;
        live.restore = Some(snapshot);
        live.visible = false;
        debug!(?snapshot, "overlay hidden");

        Ok(Outcome::Applied)
    }

    pub fn show(&mut self) -> Result<Outcome, Error> {
        let live = match live_window(&mut self.live, "show") {
            Ok(live) => live,
            Err(ignored) => return Ok(Outcome::Ignored(ignored)),
        };
        if live.visible {
            return Ok(Outcome::Ignored(Ignored::AlreadyVisible));
        }

        if let Some(restore) = live.restore {
            live.window.set_geometry(restore)?;
            live.geometry = restore;
            live.movement.current_x = f64::from(restore.x);
            live.movement.current_y = f64::from(restore.y);
        }

        live.window.show_inactive()?;
        live.visible = true;
        debug!(geometry = ?live.geometry, "overlay shown");

        Ok(Outcome::Applied)
    }

    pub fn toggle(&mut self) -> Result<Outcome, Error> {
        match self.visibility() {
            Visibility::Visible => self.hide(),
            Visibility::Hidden => self.show(),
            Visibility::Uncreated => {
                warn!("toggle ignored: overlay window does not exist");
                Ok(Outcome::Ignored(Ignored::NotCreated))
            }
        }
    }

    pub fn move_left(&mut self) -> Result<Outcome, Error> {
        self.move_window(Direction::Left)
    }

    pub fn move_right(&mut self) -> Result<Outcome, Error> {
        self.move_window(Direction::Right)
    }

    pub fn move_up(&mut self) -> Result<Outcome, Error> {
        self.move_window(Direction::Up)
    }

    pub fn move_down(&mut self) -> Result<Outcome, Error> {
        self.move_window(Direction::Down)
    }

    /// Move one step in `direction`. Only the position changes.
    pub fn move_window(&mut self, direction: Direction) -> Result<Outcome, Error> {
        let live = match live_window(&mut self.live, "move") {
            Ok(live) => live,
            Err(ignored) => return Ok(Outcome::Ignored(ignored)),
        };
        if !live.movement.movement_enabled() {
            debug!(?direction, "movement disabled on narrow work area");
            return Ok(Outcome::Ignored(Ignored::MovementDisabled));
        }

        let size = (live.geometry.width, live.geometry.height);
        let (x, y) = compute_move(direction, &live.movement, size);
        let (x, y) = (x.round() as i32, y.round() as i32);

        live.window.set_position(x, y)?;
        live.movement.current_x = f64::from(x);
        live.movement.current_y = f64::from(y);
        live.geometry.x = x;
        live.geometry.y = y;
        if !live.visible {
            live.restore = Some(live.geometry);
        }
        debug!(?direction, x, y, "overlay moved");

        Ok(Outcome::Applied)
    }

    pub fn dispatch(&mut self, command: OverlayCommand) -> Result<Outcome, Error> {
        match command {
            OverlayCommand::Create => self.create(),
            OverlayCommand::Show => self.show(),
            OverlayCommand::Hide => self.hide(),
            OverlayCommand::Toggle => self.toggle(),
            OverlayCommand::Move { direction } => self.move_window(direction),
            OverlayCommand::ResizeToContent { content } => {
                self.resize_to_content(content.width, content.height)
            }
        }
    }

    /// Fold an observed native change into the cache
    pub fn handle_native_event(&mut self, event: NativeEvent) {
        let Some(live) = self.live.as_mut() else {
            return;
        };

        match event {
            NativeEvent::Moved { x, y } => {
                live.geometry.x = x;
                live.geometry.y = y;
                live.movement.current_x = f64::from(x);
                live.movement.current_y = f64::from(y);
            }
            NativeEvent::Resized { width, height } => {
                live.geometry.width = width;
                live.geometry.height = height;
            }
            NativeEvent::Closed => {
                info!("overlay window closed");
                self.live = None;
            }
        }
    }

    pub fn visibility(&self) -> Visibility {
        match &self.live {
            None => Visibility::Uncreated,
            Some(live) if live.visible => Visibility::Visible,
            Some(_) => Visibility::Hidden,
        }
    }

    pub fn geometry(&self) -> Option<WindowGeometry> {
        self.live.as_ref().map(|live| live.geometry)
    }

    pub fn restore_geometry(&self) -> Option<WindowGeometry> {
        self.live.as_ref().and_then(|live| live.restore)
    }

    pub fn movement(&self) -> Option<MovementState> {
        self.live.as_ref().map(|live| live.movement)
    }

    pub fn stealth_report(&self) -> Option<&StealthReport> {
        self.live.as_ref().map(|live| &live.stealth)
    }

    /// The native window, if one exists
    pub fn window(&self) -> Option<&H::Window> {
        self.live.as_ref().map(|live| &live.window)
    }
}

fn live_window<'a, W: NativeWindow>(
    live: &'a mut Option<LiveOverlay<W>>,
    op: &'static str,
) -> Result<&'a mut LiveOverlay<W>, Ignored> {
    let Some(live) = live.as_mut() else {
        warn!(op, "ignored: overlay window does not exist");
        return Err(Ignored::NotCreated);
    };
    if live.window.is_destroyed() {
        warn!(op, "ignored: overlay window was destroyed");
        return Err(Ignored::WindowDestroyed);
    }
    Ok(live)
}
