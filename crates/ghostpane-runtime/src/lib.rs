mod logging;
mod shortcuts;
mod tray;

use ghostpane_overlay::OverlayCommand;
use tracing::{error, info};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_global_shortcut::Builder::new()
                .with_handler(|app, shortcut, event| shortcuts::handle(app, shortcut, event))
                .build(),
        )
        .plugin(tauri_plugin_store::Builder::new().build())
        .plugin(ghostpane_core::init())
        .setup(|app| {
            tray::setup_tray(app)?;

            let handle = app.handle().clone();
            if ghostpane_core::shortcuts_enabled(&handle) {
                shortcuts::register(&handle);
            } else {
                info!("Global shortcuts are disabled in settings");
            }

            // The overlay needs the plugin state, which exists once the
            // plugins above have run their setup
            match ghostpane_core::dispatch(&handle, OverlayCommand::Create) {
                Ok(outcome) => info!(?outcome, "Overlay created"),
                Err(e) => error!(error = %e, "Failed to create overlay"),
            }

            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error running Ghostpane")
}
