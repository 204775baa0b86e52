use serde::{Deserialize, Serialize};

/// Initial bounds of the overlay window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayConfig {
    #[serde(default = "default_initial_height")]
    pub initial_height: f64,
    /// Left to the toolkit default when unset
    #[serde(default)]
    pub initial_width: Option<f64>,
}

fn default_initial_height() -> f64 {
    600.0
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            initial_height: default_initial_height(),
            initial_width: None,
        }
    }
}
