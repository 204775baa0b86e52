//! In-memory windowing host that records every native call

use std::{cell::RefCell, rc::Rc};

use ghostpane_overlay::{
    Error, NativeWindow, OverlayHost, StealthAttribute, StealthTarget, WindowGeometry, WindowSpec,
    WorkArea,
};

/// Width a toolkit picks when none is requested
pub const DEFAULT_WIDTH: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Stealth(StealthAttribute),
    SetGeometry(WindowGeometry),
    SetPosition(i32, i32),
    ShowInactive,
    Hide,
}

#[derive(Debug)]
pub struct WindowState {
    pub geometry: WindowGeometry,
    pub visible: bool,
    pub destroyed: bool,
    /// When false, `outer_geometry` errors like a hidden window on some platforms
    pub reports_geometry: bool,
    pub fail_native_ops: bool,
    pub unsupported: Vec<StealthAttribute>,
    pub calls: Vec<Call>,
}

#[derive(Clone)]
pub struct FakeWindow(pub Rc<RefCell<WindowState>>);

impl FakeWindow {
    fn record(&self, call: Call) -> Result<(), Error> {
        let mut state = self.0.borrow_mut();
        state.calls.push(call);
        if state.fail_native_ops {
            return Err(Error::NativeOperationFailed(format!("{call:?} rejected")));
        }
        Ok(())
    }
}

impl NativeWindow for FakeWindow {
    fn is_destroyed(&self) -> bool {
        self.0.borrow().destroyed
    }

    fn outer_geometry(&self) -> Result<WindowGeometry, Error> {
        let state = self.0.borrow();
        if state.reports_geometry {
            Ok(state.geometry)
        } else {
            Err(Error::NativeOperationFailed("bounds unavailable".into()))
        }
    }

    fn set_geometry(&self, geometry: WindowGeometry) -> Result<(), Error> {
        self.record(Call::SetGeometry(geometry))?;
        self.0.borrow_mut().geometry = geometry;
        Ok(())
    }

    fn set_position(&self, x: i32, y: i32) -> Result<(), Error> {
        self.record(Call::SetPosition(x, y))?;
        let mut state = self.0.borrow_mut();
        state.geometry.x = x;
        state.geometry.y = y;
        Ok(())
    }

    fn show_inactive(&self) -> Result<(), Error> {
        self.record(Call::ShowInactive)?;
        self.0.borrow_mut().visible = true;
        Ok(())
    }

    fn hide(&self) -> Result<(), Error> {
        self.record(Call::Hide)?;
        self.0.borrow_mut().visible = false;
        Ok(())
    }
}

impl StealthTarget for FakeWindow {
    fn apply_stealth(&self, attribute: StealthAttribute) -> Result<(), Error> {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::Stealth(attribute));
        if state.unsupported.contains(&attribute) {
            return Err(Error::CapabilityUnavailable(format!("{attribute:?}")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct HostState {
    pub work_area: Option<WorkArea>,
    pub unsupported: Vec<StealthAttribute>,
    pub windows: Vec<FakeWindow>,
    pub observed: usize,
}

#[derive(Clone)]
pub struct FakeHost(pub Rc<RefCell<HostState>>);

impl FakeHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(RefCell::new(HostState {
            work_area: Some(WorkArea { width, height }),
            ..HostState::default()
        })))
    }

    pub fn unsupported(self, attributes: &[StealthAttribute]) -> Self {
        self.0.borrow_mut().unsupported = attributes.to_vec();
        self
    }

    pub fn created(&self) -> usize {
        self.0.borrow().windows.len()
    }

    pub fn observed(&self) -> usize {
        self.0.borrow().observed
    }

    /// The most recently created window
    pub fn window(&self) -> FakeWindow {
        self.0
            .borrow()
            .windows
            .last()
            .cloned()
            .expect("no window created")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.window().0.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.window().0.borrow_mut().calls.clear();
    }

    pub fn native_geometry(&self) -> WindowGeometry {
        self.window().0.borrow().geometry
    }
}

impl OverlayHost for FakeHost {
    type Window = FakeWindow;

    fn primary_work_area(&self) -> Result<WorkArea, Error> {
        self.0
            .borrow()
            .work_area
            .ok_or_else(|| Error::NoDisplay("no primary monitor".into()))
    }

    fn create_window(&self, spec: &WindowSpec) -> Result<FakeWindow, Error> {
        let mut host = self.0.borrow_mut();
        let window = FakeWindow(Rc::new(RefCell::new(WindowState {
            geometry: WindowGeometry {
                x: spec.x,
                y: spec.y,
                width: spec.width.map_or(DEFAULT_WIDTH, |w| w as u32),
                height: spec.height as u32,
            },
            visible: false,
            destroyed: false,
            reports_geometry: true,
            fail_native_ops: false,
            unsupported: host.unsupported.clone(),
            calls: Vec::new(),
        })));
        host.windows.push(window.clone());
        Ok(window)
    }

    fn observe(&self, _window: &FakeWindow) {
        self.0.borrow_mut().observed += 1;
    }
}
