use ghostpane_overlay::{Direction, OverlayCommand};
use tauri::AppHandle;
use tauri_plugin_global_shortcut::{
    Code, GlobalShortcutExt, Modifiers, Shortcut, ShortcutEvent, ShortcutState,
};
use tracing::{debug, error, warn};

#[cfg(target_os = "macos")]
const PRIMARY: Modifiers = Modifiers::SUPER;
#[cfg(not(target_os = "macos"))]
const PRIMARY: Modifiers = Modifiers::CONTROL;

/// CmdOrCtrl+B toggles, CmdOrCtrl+Arrow moves
pub fn bindings() -> [(Shortcut, OverlayCommand); 5] {
    [
        (Shortcut::new(Some(PRIMARY), Code::KeyB), OverlayCommand::Toggle),
        (
            Shortcut::new(Some(PRIMARY), Code::ArrowLeft),
            Direction::Left.into(),
        ),
        (
            Shortcut::new(Some(PRIMARY), Code::ArrowRight),
            Direction::Right.into(),
        ),
        (Shortcut::new(Some(PRIMARY), Code::ArrowUp), Direction::Up.into()),
        (
            Shortcut::new(Some(PRIMARY), Code::ArrowDown),
            Direction::Down.into(),
        ),
    ]
}

pub fn command_for(shortcut: &Shortcut) -> Option<OverlayCommand> {
    bindings()
        .into_iter()
        .find(|(bound, _)| bound == shortcut)
        .map(|(_, command)| command)
}

/// Global shortcut plugin callback
pub fn handle(app: &AppHandle, shortcut: &Shortcut, event: ShortcutEvent) {
    if event.state() != ShortcutState::Pressed {
        return;
    }

    let Some(command) = command_for(shortcut) else {
        return;
    };

    dispatch(app, command);
}

pub fn dispatch(app: &AppHandle, command: OverlayCommand) {
    match ghostpane_core::dispatch(app, command) {
        Ok(outcome) => debug!(?command, ?outcome, "shortcut dispatched"),
        Err(e) => error!(?command, error = %e, "shortcut failed"),
    }
}

/// Register every binding. A binding another app already owns is skipped.
pub fn register(app: &AppHandle) {
    let shortcuts = app.global_shortcut();
    for (shortcut, command) in bindings() {
        if let Err(e) = shortcuts.register(shortcut) {
            warn!(?command, error = %e, "could not register shortcut");
        }
    }
}
