use std::sync::{Arc, Mutex};

use ghostpane_overlay::{
    Direction, Outcome, OverlayController, SessionFlags, Visibility, WindowGeometry,
};
use tauri::{AppHandle, State, command};

use crate::{AppSettings, HealthEndpoint, HealthState, overlay::TauriHost};

pub struct OverlayState(pub Mutex<OverlayController<TauriHost>>);
pub struct SessionState(pub Arc<SessionFlags>);
pub struct SettingsState(pub Mutex<AppSettings>);

fn run(
    state: &State<'_, OverlayState>,
    op: impl FnOnce(&mut OverlayController<TauriHost>) -> Result<Outcome, ghostpane_overlay::Error>,
) -> Result<(), String> {
    let mut overlay = state.0.lock().map_err(|e| e.to_string())?;
    op(&mut overlay).map(|_| ()).map_err(|e| e.to_string())
}

#[command]
pub fn overlay_create(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, OverlayController::create)
}

#[command]
pub fn overlay_resize_to_content(
    state: State<'_, OverlayState>,
    width: f64,
    height: f64,
) -> Result<(), String> {
    run(&state, |overlay| overlay.resize_to_content(width, height))
}

#[command]
pub fn overlay_show(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, OverlayController::show)
}

#[command]
pub fn overlay_hide(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, OverlayController::hide)
}

#[command]
pub fn overlay_toggle(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, OverlayController::toggle)
}

#[command]
pub fn overlay_move_left(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, |overlay| overlay.move_window(Direction::Left))
}

#[command]
pub fn overlay_move_right(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, |overlay| overlay.move_window(Direction::Right))
}

#[command]
pub fn overlay_move_up(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, |overlay| overlay.move_window(Direction::Up))
}

#[command]
pub fn overlay_move_down(state: State<'_, OverlayState>) -> Result<(), String> {
    run(&state, |overlay| overlay.move_window(Direction::Down))
}

#[command]
pub fn overlay_visibility(state: State<'_, OverlayState>) -> Result<Visibility, String> {
    let overlay = state.0.lock().map_err(|e| e.to_string())?;
    Ok(overlay.visibility())
}

/// Label of the overlay window, or null before it exists
#[command]
pub fn overlay_window_handle(state: State<'_, OverlayState>) -> Result<Option<String>, String> {
    let overlay = state.0.lock().map_err(|e| e.to_string())?;
    Ok(overlay.window().map(|window| window.label().to_string()))
}

#[command]
pub fn overlay_geometry(
    state: State<'_, OverlayState>,
) -> Result<Option<WindowGeometry>, String> {
    let overlay = state.0.lock().map_err(|e| e.to_string())?;
    Ok(overlay.geometry())
}

// ============================================
// Session Commands
// ============================================

#[command]
pub fn session_set_debugged(state: State<'_, SessionState>, value: bool) {
    state.0.set_has_debugged(value);
}

#[command]
pub fn session_has_debugged(state: State<'_, SessionState>) -> bool {
    state.0.get_has_debugged()
}

#[command]
pub fn health_endpoint(state: State<'_, HealthState>) -> HealthEndpoint {
    state.0.endpoint()
}

// ============================================
// Settings Commands
// ============================================

#[command]
pub fn settings_get(state: State<'_, SettingsState>) -> Result<AppSettings, String> {
    let settings = state.0.lock().map_err(|e| e.to_string())?;
    Ok(settings.clone())
}

#[command]
pub fn settings_save(
    app: AppHandle,
    state: State<'_, SettingsState>,
    settings: AppSettings,
) -> Result<(), String> {
    settings.save(&app).map_err(|e| e.to_string())?;
    let mut current = state.0.lock().map_err(|e| e.to_string())?;
    *current = settings;
    Ok(())
}

#[command]
pub fn app_quit(app: AppHandle) {
    app.exit(0);
}
