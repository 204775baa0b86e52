use std::sync::OnceLock;

use tracing_subscriber::prelude::*;

/// Filter used when RUST_LOG is not set
#[cfg(debug_assertions)]
const DEFAULT_LOG_CONFIG: &str = concat!(
    "info,",
    "ghostpane_runtime=debug,",
    "ghostpane_core=debug,",
    "ghostpane_overlay=debug"
);
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_CONFIG: &str = "info";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once. RUST_LOG overrides the default filter.
pub fn init() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_CONFIG.into());

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
