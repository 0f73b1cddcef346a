//! Contract between a handle frame and the item it resizes.

use kurbo::{Point, Rect};
use uuid::Uuid;

/// Identifier of a scene item.
pub type ItemId = Uuid;

/// An item whose geometry is driven by a [`HandleFrame`](super::HandleFrame).
pub trait FrameHost {
    /// The item's local content rectangle.
    fn rect(&self) -> Rect;

    /// Replace the item's local content rectangle.
    fn set_rect(&mut self, rect: Rect);

    /// Position of the item's origin in scene coordinates.
    fn scene_position(&self) -> Point;

    /// Move the item within its parent.
    fn set_position(&mut self, position: Point);

    /// Map a scene point into the item's local coordinates.
    fn scene_to_host(&self, point: Point) -> Point;

    /// Map a local point into the item's parent coordinates.
    fn host_to_parent(&self, point: Point) -> Point;
}

/// Resolves a frame's host id to a live item.
///
/// Returning `None` means the host was removed; the frame then only updates
/// itself.
pub trait HostResolver {
    fn host_mut(&mut self, id: ItemId) -> Option<&mut dyn FrameHost>;
}

/// Resolver with no items, for frames that are not attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHosts;

impl HostResolver for NoHosts {
    fn host_mut(&mut self, _id: ItemId) -> Option<&mut dyn FrameHost> {
        None
    }
}
