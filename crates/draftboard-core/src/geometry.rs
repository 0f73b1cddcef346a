//! Handle geometry: corner anchors, resize sign table and item anchors.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// One of the eight resize handles around a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleCorner {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleCorner {
    /// All corners in frame order (clockwise from the top-left).
    pub const ALL: [HandleCorner; 8] = [
        HandleCorner::TopLeft,
        HandleCorner::Top,
        HandleCorner::TopRight,
        HandleCorner::Right,
        HandleCorner::BottomRight,
        HandleCorner::Bottom,
        HandleCorner::BottomLeft,
        HandleCorner::Left,
    ];

    /// Index of this corner in [`HandleCorner::ALL`].
    pub fn index(self) -> usize {
        match self {
            HandleCorner::TopLeft => 0,
            HandleCorner::Top => 1,
            HandleCorner::TopRight => 2,
            HandleCorner::Right => 3,
            HandleCorner::BottomRight => 4,
            HandleCorner::Bottom => 5,
            HandleCorner::BottomLeft => 6,
            HandleCorner::Left => 7,
        }
    }

    /// The handle diagonally (or directly) across the frame.
    pub fn opposite(self) -> Self {
        match self {
            HandleCorner::TopLeft => HandleCorner::BottomRight,
            HandleCorner::Top => HandleCorner::Bottom,
            HandleCorner::TopRight => HandleCorner::BottomLeft,
            HandleCorner::Right => HandleCorner::Left,
            HandleCorner::BottomRight => HandleCorner::TopLeft,
            HandleCorner::Bottom => HandleCorner::Top,
            HandleCorner::BottomLeft => HandleCorner::TopRight,
            HandleCorner::Left => HandleCorner::Right,
        }
    }

    /// Sign pair mapping a pointer delta onto a size delta.
    ///
    /// The pointer delta is measured as `press - current`, so dragging the
    /// top-left handle up and left (positive delta) grows the frame.
    pub fn sign(self) -> (i8, i8) {
        match self {
            HandleCorner::TopLeft => (1, 1),
            HandleCorner::Top => (0, 1),
            HandleCorner::TopRight => (-1, 1),
            HandleCorner::Right => (-1, 0),
            HandleCorner::BottomRight => (-1, -1),
            HandleCorner::Bottom => (0, -1),
            HandleCorner::BottomLeft => (1, -1),
            HandleCorner::Left => (1, 0),
        }
    }

    /// Whether resizing through this handle moves the frame origin along x.
    pub fn shifts_x(self) -> bool {
        matches!(
            self,
            HandleCorner::TopLeft | HandleCorner::Left | HandleCorner::BottomLeft
        )
    }

    /// Whether resizing through this handle moves the frame origin along y.
    pub fn shifts_y(self) -> bool {
        matches!(
            self,
            HandleCorner::TopLeft | HandleCorner::Top | HandleCorner::TopRight
        )
    }
}

/// Sign pair for `corner`, see [`HandleCorner::sign`].
pub fn sign_for(corner: HandleCorner) -> (i8, i8) {
    corner.sign()
}

/// Top-left position of the handle for `corner` around `rect`.
///
/// Handles are `2 * buffer` wide, so the far edges are pulled inward by that
/// amount and the mid-edge handles are centered by `buffer`.
pub fn corner_position(corner: HandleCorner, rect: Rect, buffer: f64) -> Point {
    let x = rect.x0;
    let y = rect.y0;
    let w = rect.width();
    let h = rect.height();
    match corner {
        HandleCorner::TopLeft => Point::new(x, y),
        HandleCorner::Top => Point::new(x + w / 2.0 - buffer, y),
        HandleCorner::TopRight => Point::new(x + w - 2.0 * buffer, y),
        HandleCorner::Right => Point::new(x + w - 2.0 * buffer, y + h / 2.0 - buffer),
        HandleCorner::BottomRight => Point::new(x + w - 2.0 * buffer, y + h - 2.0 * buffer),
        HandleCorner::Bottom => Point::new(x + w / 2.0 - buffer, y + h - 2.0 * buffer),
        HandleCorner::BottomLeft => Point::new(x, y + h - 2.0 * buffer),
        HandleCorner::Left => Point::new(x, y + h / 2.0 - buffer),
    }
}

/// All eight handle positions in [`HandleCorner::ALL`] order.
pub fn corner_positions(rect: Rect, buffer: f64) -> [Point; 8] {
    HandleCorner::ALL.map(|corner| corner_position(corner, rect, buffer))
}

/// Local bounding box of a handle square.
pub fn handle_bounds(buffer: f64) -> Rect {
    Rect::new(0.0, 0.0, 2.0 * buffer, 2.0 * buffer)
}

/// Filled area of a handle (bounding box inset by 2).
pub fn handle_visual_rect(buffer: f64) -> Rect {
    handle_bounds(buffer).inset(-2.0)
}

/// Outline of a handle, snapped to the pixel grid for a 1px pen.
pub fn handle_stroke_rect(buffer: f64) -> Rect {
    handle_visual_rect(buffer).inset(-0.5)
}

/// Alignment anchors of an item rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Center,
}

/// Position of `anchor` on `rect`.
pub fn anchor_point(anchor: Anchor, rect: Rect) -> Point {
    let center = rect.center();
    match anchor {
        Anchor::TopLeft => Point::new(rect.x0, rect.y0),
        Anchor::Top => Point::new(center.x, rect.y0),
        Anchor::TopRight => Point::new(rect.x1, rect.y0),
        Anchor::Right => Point::new(rect.x1, center.y),
        Anchor::BottomRight => Point::new(rect.x1, rect.y1),
        Anchor::Bottom => Point::new(center.x, rect.y1),
        Anchor::BottomLeft => Point::new(rect.x0, rect.y1),
        Anchor::Left => Point::new(rect.x0, center.y),
        Anchor::Center => center,
    }
}
