use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No display available: {0}")]
    NoDisplay(String),
    #[error("Failed to create overlay window: {0}")]
    WindowCreation(String),
    #[error("Native window operation failed: {0}")]
    NativeOperationFailed(String),
    #[error("Platform capability unavailable: {0}")]
    CapabilityUnavailable(String),
}
