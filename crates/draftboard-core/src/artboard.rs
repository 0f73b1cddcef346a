//! Artboards: the top-level frames a design is laid out on.

use crate::fill::FillDescriptor;
use crate::frame::{FrameHost, HostResolver, ItemId};
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Default artboard size (a phone screen).
pub const DEFAULT_SIZE: Size = Size::new(375.0, 667.0);
/// Height reserved above the artboard for its name label.
pub const LABEL_OFFSET: f64 = 20.0;
/// Margin around the artboard kept for selection handles.
pub const BUFFER: f64 = 4.0;

/// A named canvas region that a handle frame can resize and move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artboard {
    pub id: ItemId,
    pub name: String,
    /// Content rectangle in local coordinates.
    pub rect: Rect,
    /// Origin in parent coordinates.
    pub position: Point,
    /// Parent-to-scene transform.
    #[serde(default)]
    pub parent_transform: Affine,
    #[serde(default)]
    pub fills: Vec<FillDescriptor>,
}

impl Default for Artboard {
    fn default() -> Self {
        Self::new("Artboard")
    }
}

impl Artboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rect: Rect::from_origin_size(Point::ZERO, DEFAULT_SIZE),
            position: Point::ZERO,
            parent_transform: Affine::IDENTITY,
            fills: vec![FillDescriptor::solid("Background", Color::WHITE)],
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_parent_transform(mut self, transform: Affine) -> Self {
        self.parent_transform = transform;
        self
    }

    /// Local-to-scene transform.
    pub fn transform(&self) -> Affine {
        self.parent_transform * Affine::translate(self.position.to_vec2())
    }

    /// Area repainted for the artboard: content, label strip and handle margin.
    pub fn bounding_rect(&self) -> Rect {
        let r = self.rect;
        Rect::from_origin_size(
            (r.x0 - BUFFER, r.y0 - LABEL_OFFSET - BUFFER),
            (r.width() + 2.0 * BUFFER, r.height() + LABEL_OFFSET + 2.0 * BUFFER),
        )
    }

    /// Where the name label is drawn, in local coordinates.
    pub fn label_position(&self) -> Point {
        self.bounding_rect().origin()
    }

    /// Content rectangle in scene coordinates.
    pub fn scene_rect(&self) -> Rect {
        self.transform().transform_rect_bbox(self.rect)
    }
}

impl FrameHost for Artboard {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn scene_position(&self) -> Point {
        self.parent_transform * self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn scene_to_host(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }

    fn host_to_parent(&self, point: Point) -> Point {
        point + self.position.to_vec2()
    }
}

/// All artboards of a document, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    artboards: HashMap<ItemId, Artboard>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artboard, replacing any with the same id.
    pub fn insert(&mut self, artboard: Artboard) -> ItemId {
        let id = artboard.id;
        log::debug!("Added artboard '{}' ({})", artboard.name, id);
        self.artboards.insert(id, artboard);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Artboard> {
        self.artboards.remove(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Artboard> {
        self.artboards.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Artboard> {
        self.artboards.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.artboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artboards.is_empty()
    }

    pub fn artboards(&self) -> impl Iterator<Item = &Artboard> {
        self.artboards.values()
    }

    /// Topmost artboard whose content contains a scene point.
    pub fn artboard_at(&self, point: Point) -> Option<ItemId> {
        self.artboards
            .values()
            .find(|artboard| artboard.scene_rect().contains(point))
            .map(|artboard| artboard.id)
    }
}

impl HostResolver for Scene {
    fn host_mut(&mut self, id: ItemId) -> Option<&mut dyn FrameHost> {
        self.artboards.get_mut(&id).map(|artboard| artboard as &mut dyn FrameHost)
    }
}
