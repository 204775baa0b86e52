//! Stealth attributes for the overlay window
//!
//! Each platform family maps to a fixed list of attributes. The native side
//! implements [`StealthTarget`] and applies one attribute at a time; anything
//! the platform cannot do is recorded and skipped so the window stays usable
//! even when it is not fully hidden from capture or window switchers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PlatformFamily {
    MacOs,
    Windows,
    Other,
}

impl PlatformFamily {
    /// The family this binary was built for
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// Attributes to apply, in order
    pub fn attributes(self) -> &'static [StealthAttribute] {
        use StealthAttribute::*;

        match self {
            Self::MacOs => &[
                ExcludeFromCapture,
                HideFromMissionControl,
                VisibleOnAllWorkspaces,
                AlwaysOnTop(TopLevel::Floating),
            ],
            Self::Windows => &[
                ExcludeFromCapture,
                AlwaysOnTop(TopLevel::ScreenSaver),
                SkipTaskbar,
                HideMenuBar,
                TransparentBackground,
                ToolWindow,
            ],
            Self::Other => &[
                ExcludeFromCapture,
                AlwaysOnTop(TopLevel::ScreenSaver),
                SkipTaskbar,
            ],
        }
    }
}

/// Always-on-top priority
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TopLevel {
    /// Above normal windows, below system UI
    Floating,
    /// The highest level the platform offers
    ScreenSaver,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StealthAttribute {
    /// Keep the window out of screenshots and screen recordings
    ExcludeFromCapture,
    /// Keep the window out of Mission Control and the window cycle
    HideFromMissionControl,
    /// Follow the user across virtual desktops and full-screen spaces
    VisibleOnAllWorkspaces,
    AlwaysOnTop(TopLevel),
    SkipTaskbar,
    HideMenuBar,
    TransparentBackground,
    /// Tool-window style, which also removes the window from the app switcher
    ToolWindow,
}

/// Native side of the stealth adapter
pub trait StealthTarget {
    fn apply_stealth(&self, attribute: StealthAttribute) -> Result<(), Error>;
}

/// Which attributes took effect on the window
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StealthReport {
    pub applied: Vec<StealthAttribute>,
    pub skipped: Vec<SkippedAttribute>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAttribute {
    pub attribute: StealthAttribute,
    pub reason: String,
}

impl StealthReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Apply every attribute for `platform` to `target`. Never fails: attributes
/// the target rejects are logged and listed in the report.
pub fn apply_stealth_attributes<T>(platform: PlatformFamily, target: &T) -> StealthReport
where
    T: StealthTarget + ?Sized,
{
    let mut report = StealthReport::default();

    for &attribute in platform.attributes() {
        match target.apply_stealth(attribute) {
            Ok(()) => {
                debug!(?attribute, "stealth attribute applied");
                report.applied.push(attribute);
            }
            Err(e) => {
                warn!(?attribute, error = %e, "skipping stealth attribute");
                report.skipped.push(SkippedAttribute {
                    attribute,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
