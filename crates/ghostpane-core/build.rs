const COMMANDS: &[&str] = &[
    "overlay_create",
    "overlay_resize_to_content",
    "overlay_show",
    "overlay_hide",
    "overlay_toggle",
    "overlay_move_left",
    "overlay_move_right",
    "overlay_move_up",
    "overlay_move_down",
    "overlay_visibility",
    "overlay_window_handle",
    "overlay_geometry",
    "session_set_debugged",
    "session_has_debugged",
    "health_endpoint",
    "settings_get",
    "settings_save",
    "app_quit",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
