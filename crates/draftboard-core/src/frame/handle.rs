//! A single resize handle owned by a frame.

use crate::geometry::{self, HandleCorner};
use kurbo::{Point, Rect};

/// Press state of one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// One of the eight handles around a frame.
///
/// Each handle remembers its own press point, in handle-local coordinates.
#[derive(Debug, Clone)]
pub struct ItemHandle {
    corner: HandleCorner,
    /// Top-left of the handle in frame coordinates.
    pub(super) position: Point,
    pub(super) mouse_down: Point,
    pub(super) state: HandleState,
    buffer: f64,
}

impl ItemHandle {
    pub fn new(corner: HandleCorner, buffer: f64) -> Self {
        Self {
            corner,
            position: Point::ZERO,
            mouse_down: Point::ZERO,
            state: HandleState::Idle,
            buffer,
        }
    }

    pub fn corner(&self) -> HandleCorner {
        self.corner
    }

    /// Top-left of the handle in frame coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Last press point in handle-local coordinates.
    pub fn mouse_down(&self) -> Point {
        self.mouse_down
    }

    /// Handle square in frame coordinates.
    pub fn bounds(&self) -> Rect {
        geometry::handle_bounds(self.buffer) + self.position.to_vec2()
    }

    /// Filled area of the handle in frame coordinates.
    pub fn visual_rect(&self) -> Rect {
        geometry::handle_visual_rect(self.buffer) + self.position.to_vec2()
    }

    /// Check if a frame-local point lies on this handle.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}
