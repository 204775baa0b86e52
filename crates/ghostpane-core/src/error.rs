use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Overlay(#[from] ghostpane_overlay::Error),
    #[error("Overlay state lock poisoned")]
    StatePoisoned,
    #[error("Store error: {0}")]
    Store(String),
    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
    #[error("Tauri error: {0}")]
    TauriError(#[from] tauri::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}
