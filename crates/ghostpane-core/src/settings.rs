use std::fs;
use std::path::Path;

use ghostpane_overlay::OverlayConfig;
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::warn;

use crate::{Error, HealthConfig};

/// Store file holding the app settings, relative to the app data directory
pub const SETTINGS_STORE: &str = "ghostpane-settings.json";

/// App settings, persisted through tauri-plugin-store as top-level keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Page loaded into the overlay window
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default = "default_true")]
    pub shortcuts_enabled: bool,
}

fn default_entry_point() -> String {
    "index.html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            overlay: OverlayConfig::default(),
            entry_point: default_entry_point(),
            health: HealthConfig::default(),
            shortcuts_enabled: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the store file in `app_data_dir`. Falls back to the
    /// defaults when the file is missing or unreadable.
    pub fn load(app_data_dir: &Path) -> Self {
        let path = app_data_dir.join(SETTINGS_STORE);
        if !path.exists() {
            return Self::default();
        }

        let loaded = fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|content| Self::from_json(&content));

        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default settings");
                Self::default()
            }
        }
    }

    pub fn from_json(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write every key back through the store plugin. Takes effect on the
    /// next launch.
    pub fn save(&self, app: &AppHandle) -> Result<(), Error> {
        let store = app
            .store(SETTINGS_STORE)
            .map_err(|e| Error::Store(e.to_string()))?;

        store.set("overlay", serde_json::to_value(self.overlay)?);
        store.set("entryPoint", self.entry_point.clone());
        store.set("health", serde_json::to_value(&self.health)?);
        store.set("shortcutsEnabled", self.shortcuts_enabled);
        store.save().map_err(|e| Error::Store(e.to_string()))?;

        Ok(())
    }
}
