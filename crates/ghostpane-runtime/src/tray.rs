use ghostpane_overlay::OverlayCommand;
use tauri::{
    App, AppHandle,
    image::Image,
    menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem},
    tray::{TrayIconBuilder, TrayIconEvent},
};
use tracing::error;

const TRAY_ICON: &[u8] = include_bytes!("../icons/32x32.png");

pub fn setup_tray(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let show = MenuItemBuilder::with_id("show", "Show Overlay").build(app)?;
    let hide = MenuItemBuilder::with_id("hide", "Hide Overlay").build(app)?;
    let separator = PredefinedMenuItem::separator(app)?;
    let quit = MenuItemBuilder::with_id("quit", "Quit Ghostpane").build(app)?;

    let menu = MenuBuilder::new(app)
        .item(&show)
        .item(&hide)
        .item(&separator)
        .item(&quit)
        .build()?;

    let icon = Image::from_bytes(TRAY_ICON)?;

    let _tray = TrayIconBuilder::new()
        .icon(icon)
        .menu(&menu)
        .tooltip("Ghostpane")
        .on_menu_event(|app, event| {
            handle_menu_event(app, event.id.as_ref());
        })
        .on_tray_icon_event(|tray, event| {
            // Double-click toggles
            if let TrayIconEvent::DoubleClick { .. } = event {
                dispatch(tray.app_handle(), OverlayCommand::Toggle);
            }
        })
        .build(app)?;

    Ok(())
}

fn handle_menu_event(app: &AppHandle, id: &str) {
    match id {
        "show" => dispatch(app, OverlayCommand::Show),
        "hide" => dispatch(app, OverlayCommand::Hide),
        "quit" => app.exit(0),
        _ => {}
    }
}

fn dispatch(app: &AppHandle, command: OverlayCommand) {
    if let Err(e) = ghostpane_core::dispatch(app, command) {
        error!(?command, error = %e, "tray action failed");
    }
}
