use std::sync::atomic::{AtomicBool, Ordering};

/// Application-wide flags the overlay reads but never writes
#[derive(Debug, Default)]
pub struct SessionFlags {
    has_debugged: AtomicBool,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a debug pass has produced output in this session. A wider
    /// overlay is allowed once it has.
    pub fn get_has_debugged(&self) -> bool {
        self.has_debugged.load(Ordering::Relaxed)
    }

    pub fn set_has_debugged(&self, value: bool) {
        self.has_debugged.store(value, Ordering::Relaxed);
    }
}
