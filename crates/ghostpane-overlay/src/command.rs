use serde::{Deserialize, Serialize};

use crate::{ContentSize, Direction};

/// A single request from the dispatch layer (shortcut, tray, renderer)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum OverlayCommand {
    Create,
    Show,
    Hide,
    Toggle,
    Move { direction: Direction },
    ResizeToContent { content: ContentSize },
}

impl From<Direction> for OverlayCommand {
    fn from(direction: Direction) -> Self {
        Self::Move { direction }
    }
}
