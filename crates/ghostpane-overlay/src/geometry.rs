//! Bounds arithmetic for the overlay window
//!
//! Everything here is pure: no native calls, no logging. The controller feeds
//! in cached state and applies whatever comes back.

use serde::{Deserialize, Serialize};

/// Padding added around the rendered content when sizing the window
pub const CONTENT_PADDING: f64 = 32.0;

/// The work area width is split into this many movement steps
pub const STEP_DIVISIONS: u32 = 10;

/// Share of the work area width the window may take up
pub const WIDTH_RATIO: f64 = 0.5;

/// Share of the work area width the window may take up once a debug pass has run
pub const DEBUG_WIDTH_RATIO: f64 = 0.75;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the rendered content, as reported by the renderer
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

/// Logical size of the primary display's work area
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkArea {
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Discretized movement cursor for the window's top-left corner
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementState {
    pub screen_width: u32,
    pub screen_height: u32,
    pub step_size: u32,
    pub current_x: f64,
    pub current_y: f64,
}

impl MovementState {
    pub fn new(work_area: WorkArea, x: i32, y: i32) -> Self {
        Self {
            screen_width: work_area.width,
            screen_height: work_area.height,
            step_size: compute_step(work_area.width),
            current_x: f64::from(x),
            current_y: f64::from(y),
        }
    }

    /// A zero step means the work area is too narrow to move across
    pub fn movement_enabled(&self) -> bool {
        self.step_size > 0
    }
}

/// Compute the window bounds that fit `content`, keeping the window inside
/// the work area horizontally. The vertical position is never touched.
///
/// Returns `None` for non-positive (or NaN) content, which callers skip.
pub fn compute_resize_bounds(
    content: ContentSize,
    current: (i32, i32),
    work_area: WorkArea,
    debug_mode: bool,
) -> Option<WindowGeometry> {
    if !(content.width > 0.0 && content.height > 0.0) {
        return None;
    }

    let ratio = if debug_mode {
        DEBUG_WIDTH_RATIO
    } else {
        WIDTH_RATIO
    };
    let max_allowed_width = (f64::from(work_area.width) * ratio).floor() as u32;

    let new_width = ((content.width + CONTENT_PADDING).ceil() as u32).min(max_allowed_width);
    let new_height = content.height.ceil() as u32;

    // new_width never exceeds the work area, so max_x is non-negative
    let max_x = i64::from(work_area.width) - i64::from(new_width);
    let new_x = i64::from(current.0).max(0).min(max_x);

    Some(WindowGeometry {
        x: i32::try_from(new_x).unwrap_or(i32::MAX),
        y: current.1,
        width: new_width,
        height: new_height,
    })
}

pub fn compute_step(work_area_width: u32) -> u32 {
    work_area_width / STEP_DIVISIONS
}

/// Next cursor position one step in `direction`.
///
/// Bounds use half the window size as slack, so the window can hang off an
/// edge by up to half its width/height but never leaves the screen entirely.
pub fn compute_move(
    direction: Direction,
    state: &MovementState,
    window_size: (u32, u32),
) -> (f64, f64) {
    let half_width = f64::from(window_size.0) / 2.0;
    let half_height = f64::from(window_size.1) / 2.0;
    let step = f64::from(state.step_size);
    let (x, y) = (state.current_x, state.current_y);

    match direction {
        Direction::Right => ((f64::from(state.screen_width) - half_width).min(x + step), y),
        Direction::Left => ((-half_width).max(x - step), y),
        Direction::Down => (x, (f64::from(state.screen_height) - half_height).min(y + step)),
        Direction::Up => (x, (-half_height).max(y - step)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: WorkArea = WorkArea {
        width: 1920,
        height: 1080,
    };

    fn content(width: f64, height: f64) -> ContentSize {
        ContentSize { width, height }
    }

    #[test]
    fn resize_adds_padding_within_allowance() {
        let bounds = compute_resize_bounds(content(800.0, 600.0), (0, 0), HD, false).unwrap();
        assert_eq!(bounds.width, 832);
        assert_eq!(bounds.height, 600);
    }

    #[test]
    fn resize_width_capped_by_ratio() {
        for debug in [false, true] {
            let cap = if debug { 1440 } else { 960 };
            for width in [10.0, 900.0, 1500.0, 5000.0] {
                let bounds = compute_resize_bounds(content(width, 10.0), (0, 0), HD, debug).unwrap();
                assert!(bounds.width <= cap, "{width} debug={debug} -> {}", bounds.width);
            }
        }
        let wide = compute_resize_bounds(content(5000.0, 10.0), (0, 0), HD, true).unwrap();
        assert_eq!(wide.width, 1440);
    }

    #[test]
    fn resize_rounds_height_up() {
        let bounds = compute_resize_bounds(content(100.0, 200.2), (0, 0), HD, false).unwrap();
        assert_eq!(bounds.height, 201);
    }

    #[test]
    fn resize_clamps_x_and_keeps_y() {
        let right = compute_resize_bounds(content(800.0, 600.0), (1800, 40), HD, false).unwrap();
        assert_eq!(right.x, 1920 - 832);
        assert_eq!(right.y, 40);

        let left = compute_resize_bounds(content(800.0, 600.0), (-50, -7), HD, false).unwrap();
        assert_eq!(left.x, 0);
        assert_eq!(left.y, -7);
    }

    #[test]
    fn resize_rejects_empty_content() {
        assert!(compute_resize_bounds(content(0.0, 10.0), (0, 0), HD, false).is_none());
        assert!(compute_resize_bounds(content(10.0, -1.0), (0, 0), HD, false).is_none());
        assert!(compute_resize_bounds(content(f64::NAN, 10.0), (0, 0), HD, false).is_none());
    }

    #[test]
    fn step_is_tenth_of_width() {
        assert_eq!(compute_step(1920), 192);
        assert_eq!(compute_step(1000), 100);
        assert_eq!(compute_step(19), 1);
        assert_eq!(compute_step(10), 1);
        assert_eq!(compute_step(9), 0);
        assert_eq!(compute_step(0), 0);
    }

    #[test]
    fn move_right_walks_then_clamps() {
        let mut state = MovementState::new(
            WorkArea {
                width: 1000,
                height: 800,
            },
            0,
            0,
        );
        let mut xs = Vec::new();
        for _ in 0..12 {
            let (x, _) = compute_move(Direction::Right, &state, (200, 100));
            state.current_x = x;
            xs.push(x);
        }
        assert_eq!(&xs[..5], &[100.0, 200.0, 300.0, 400.0, 500.0]);
        assert_eq!(xs[5], 600.0);
        assert_eq!(*xs.last().unwrap(), 900.0);
        assert!(xs.iter().all(|x| *x <= 900.0));
    }

    #[test]
    fn move_left_and_up_allow_half_overhang() {
        let mut state = MovementState::new(
            WorkArea {
                width: 1000,
                height: 800,
            },
            30,
            30,
        );
        let (x, y) = compute_move(Direction::Left, &state, (200, 100));
        assert_eq!((x, y), (-70.0, 30.0));
        state.current_x = x;
        let (x, _) = compute_move(Direction::Left, &state, (200, 100));
        assert_eq!(x, -100.0);

        let (_, y) = compute_move(Direction::Up, &state, (200, 100));
        assert_eq!(y, -50.0);
    }

    #[test]
    fn move_down_clamps_to_half_height() {
        let state = MovementState {
            screen_width: 1000,
            screen_height: 800,
            step_size: 100,
            current_x: 5.0,
            current_y: 720.0,
        };
        assert_eq!(compute_move(Direction::Down, &state, (200, 100)), (5.0, 750.0));
    }

    #[test]
    fn unknown_size_moves_center_to_edge() {
        let state = MovementState {
            screen_width: 1000,
            screen_height: 800,
            step_size: 100,
            current_x: 950.0,
            current_y: 0.0,
        };
        assert_eq!(compute_move(Direction::Right, &state, (0, 0)).0, 1000.0);
    }
}
