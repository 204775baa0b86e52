pub mod commands;
pub mod error;
pub mod health;
pub mod overlay;
pub mod settings;

pub use commands::*;
pub use error::*;
pub use health::*;
pub use overlay::*;
pub use settings::*;

use std::sync::{Arc, Mutex};

use ghostpane_overlay::{OverlayCommand, OverlayController, Outcome, SessionFlags};
use tauri::{
    AppHandle, Manager, Wry,
    plugin::{Builder, TauriPlugin},
};
use tracing::{error, warn};

/// State wrapper for the health endpoint
pub struct HealthState(pub Arc<HealthService>);

pub fn init() -> TauriPlugin<Wry> {
    Builder::<Wry, ()>::new("ghostpane")
        .invoke_handler(tauri::generate_handler![
            commands::overlay_create,
            commands::overlay_resize_to_content,
            commands::overlay_show,
            commands::overlay_hide,
            commands::overlay_toggle,
            commands::overlay_move_left,
            commands::overlay_move_right,
            commands::overlay_move_up,
            commands::overlay_move_down,
            commands::overlay_visibility,
            commands::overlay_window_handle,
            commands::overlay_geometry,
            // Session Commands
            commands::session_set_debugged,
            commands::session_has_debugged,
            commands::health_endpoint,
            // Settings Commands
            commands::settings_get,
            commands::settings_save,
            commands::app_quit
        ])
        .setup(|app, _api| {
            let settings = match app.path().app_data_dir() {
                Ok(dir) => AppSettings::load(&dir),
                Err(e) => {
                    warn!(error = %e, "no app data directory, using default settings");
                    AppSettings::default()
                }
            };

            let flags = Arc::new(SessionFlags::new());
            let host = TauriHost::new(app.app_handle().clone(), settings.entry_point.clone());
            let controller = OverlayController::new(host, flags.clone(), settings.overlay);
            app.manage(OverlayState(Mutex::new(controller)));
            app.manage(SessionState(flags));

            let health = Arc::new(HealthService::new(settings.health.clone()));
            app.manage(HealthState(health.clone()));
            app.manage(SettingsState(Mutex::new(settings)));

            tauri::async_runtime::spawn(async move {
                if let Err(e) = health.start().await {
                    error!(error = %e, "Failed to start health service");
                }
            });

            Ok(())
        })
        .build()
}

/// Run one overlay command against the managed controller. Used by the
/// shortcut and tray handlers, which live outside the IPC layer.
pub fn dispatch(app: &AppHandle, command: OverlayCommand) -> Result<Outcome, Error> {
    let state = app.state::<OverlayState>();
    let mut overlay = state.0.lock().map_err(|_| Error::StatePoisoned)?;
    Ok(overlay.dispatch(command)?)
}

/// Whether the global shortcuts should be registered
pub fn shortcuts_enabled(app: &AppHandle) -> bool {
    let Some(state) = app.try_state::<SettingsState>() else {
        return true;
    };
    state
        .0
        .lock()
        .map(|settings| settings.shortcuts_enabled)
        .unwrap_or(true)
}
