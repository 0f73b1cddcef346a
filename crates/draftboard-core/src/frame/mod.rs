//! Handle frame: the resize/move state machine around a hosted item.
//!
//! A [`HandleFrame`] owns eight [`ItemHandle`]s and a rectangle. The host
//! event layer either hit-tests and calls the `on_*` methods directly with
//! local coordinates, or forwards scene-space [`PointerEvent`]s through
//! [`HandleFrame::handle_pointer_event`]. Every resize or move pushes the new
//! geometry to the hosted item, which the frame refers to by [`ItemId`] only.

mod handle;
mod host;

pub use handle::{HandleState, ItemHandle};
pub use host::{FrameHost, HostResolver, ItemId, NoHosts};

use crate::config::FrameConfig;
use crate::geometry::{self, HandleCorner};
use crate::input::{MouseButton, PointerEvent};
use crate::snap;
use kurbo::{Point, Rect, Vec2};

/// What the active drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Resize through a handle.
    Resize(HandleCorner),
    /// Move the whole frame.
    Move,
}

/// State of one press-move-release interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    /// Press point, local to the pressed handle or to the frame.
    pub press_point: Point,
    /// Frame rectangle when the session started.
    pub start_rect: Rect,
    /// Frame position when the session started.
    pub start_position: Point,
}

/// Frame with eight resize handles around a hosted item.
#[derive(Debug, Clone)]
pub struct HandleFrame {
    /// Frame rectangle in frame coordinates, including the handle buffer.
    rect: Rect,
    /// Frame origin in scene coordinates.
    position: Point,
    config: FrameConfig,
    handles: [ItemHandle; 8],
    host: Option<ItemId>,
    session: Option<DragSession>,
    /// Frame-local press point of a whole-frame move.
    drag_start: Point,
    visible: bool,
    needs_redraw: bool,
}

impl Default for HandleFrame {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

impl HandleFrame {
    /// Create a hidden, detached frame.
    pub fn new(config: FrameConfig) -> Self {
        Self {
            rect: Rect::ZERO,
            position: Point::ZERO,
            handles: HandleCorner::ALL.map(|corner| ItemHandle::new(corner, config.buffer)),
            config,
            host: None,
            session: None,
            drag_start: Point::ZERO,
            visible: false,
            needs_redraw: false,
        }
    }

    pub fn buffer(&self) -> f64 {
        self.config.buffer
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Frame rectangle in frame coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Frame origin in scene coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Frame rectangle in scene coordinates.
    pub fn scene_rect(&self) -> Rect {
        self.rect + self.position.to_vec2()
    }

    /// Rectangle handed to the host: the frame minus the handle buffer.
    pub fn drawable_rect(&self) -> Rect {
        let b2 = 2.0 * self.config.buffer;
        Rect::from_origin_size(self.rect.origin(), (self.rect.width() - b2, self.rect.height() - b2))
    }

    /// Outline drawn around the hosted item, snapped for a 1px pen.
    pub fn selection_rect(&self) -> Rect {
        let b = self.config.buffer;
        Rect::from_origin_size(
            (self.rect.x0 + b + 0.5, self.rect.y0 + b + 0.5),
            (self.rect.width() - 2.0 * b - 1.0, self.rect.height() - 2.0 * b - 1.0),
        )
    }

    pub fn handles(&self) -> &[ItemHandle; 8] {
        &self.handles
    }

    pub fn handle(&self, corner: HandleCorner) -> &ItemHandle {
        &self.handles[corner.index()]
    }

    /// Scene position of a handle's top-left.
    pub fn handle_scene_position(&self, corner: HandleCorner) -> Point {
        self.position + self.handle(corner).position.to_vec2()
    }

    pub fn host(&self) -> Option<ItemId> {
        self.host
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a resize or move is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_resize_only(&mut self, resize_only: bool) {
        self.config.resize_only = resize_only;
    }

    pub fn is_resize_only(&self) -> bool {
        self.config.resize_only
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Wrap the frame around `host` and show it.
    pub fn attach(&mut self, id: ItemId, host: &mut dyn FrameHost) {
        let b = self.config.buffer;
        let content = host.rect();
        self.rect = Rect::from_origin_size(content.origin(), (content.width() + 2.0 * b, content.height() + 2.0 * b));
        self.position = host.scene_position() - Vec2::new(b, b);
        self.host = Some(id);
        self.session = None;
        self.visible = true;
        log::debug!("Frame attached to {} at {:?}", id, self.scene_rect());
        self.update_handles();
        self.apply_to_host(host);
        self.needs_redraw = true;
    }

    /// Drop the host reference and hide the frame.
    ///
    /// Call this before the host item is removed from its scene.
    pub fn detach(&mut self) -> Option<ItemId> {
        let host = self.host.take();
        if let Some(id) = host {
            log::debug!("Frame detached from {}", id);
        }
        self.session = None;
        self.visible = false;
        self.needs_redraw = true;
        host
    }

    /// Replace the frame rectangle and re-layout handles and host.
    pub fn set_rect(&mut self, rect: Rect, hosts: &mut impl HostResolver) {
        self.rect = rect;
        self.set_corner_positions(hosts);
        self.needs_redraw = true;
    }

    /// Handle under a frame-local point, if any.
    pub fn hit_test_handle(&self, local: Point) -> Option<HandleCorner> {
        self.handles.iter().find(|handle| handle.hit_test(local)).map(ItemHandle::corner)
    }

    /// Press on a handle; `local` is relative to that handle's top-left.
    pub fn on_press(&mut self, corner: HandleCorner, local: Point) {
        let handle = &mut self.handles[corner.index()];
        handle.mouse_down = local;
        handle.state = HandleState::Pressed;
        self.session = Some(DragSession {
            kind: DragKind::Resize(corner),
            press_point: local,
            start_rect: self.rect,
            start_position: self.position,
        });
        log::debug!("Resize started on {:?} at {:?}", corner, local);
    }

    /// Pointer motion over a pressed handle; `local` is handle-relative.
    ///
    /// Returns `false` if the handle was not pressed.
    pub fn on_move(&mut self, corner: HandleCorner, local: Point, hosts: &mut impl HostResolver) -> bool {
        let index = corner.index();
        if self.handles[index].state == HandleState::Idle {
            return false;
        }
        self.handles[index].state = HandleState::Dragging;

        let down = self.handles[index].mouse_down;
        let (x_sign, y_sign) = corner.sign();
        let x_moved = down.x - local.x;
        let y_moved = down.y - local.y;

        let width = self.rect.width();
        let height = self.rect.height();
        let min = self.config.min_size;
        let new_width = (width + f64::from(x_sign) * x_moved).max(min);
        let new_height = (height + f64::from(y_sign) * y_moved).max(min);

        let delta_width = new_width - width;
        let delta_height = new_height - height;
        self.adjust_size(delta_width, delta_height);

        // Growing towards the origin moves the frame so the opposite edge stays put.
        if corner.shifts_x() {
            self.position.x -= delta_width;
        }
        if corner.shifts_y() {
            self.position.y -= delta_height;
        }

        log::trace!(
            "Resize {:?}: size {}x{} position {:?}",
            corner,
            new_width,
            new_height,
            self.position
        );

        self.set_corner_positions(hosts);
        self.needs_redraw = true;
        true
    }

    /// Release a handle and end the resize.
    pub fn on_release(&mut self, corner: HandleCorner) {
        self.handles[corner.index()].state = HandleState::Idle;
        if self.session.is_some_and(|s| s.kind == DragKind::Resize(corner)) {
            self.session = None;
            log::debug!("Resize {:?} finished with {:?}", corner, self.scene_rect());
        }
    }

    /// Press on the frame body; `local` is frame-relative.
    pub fn on_frame_press(&mut self, local: Point) {
        self.drag_start = local;
        self.session = Some(DragSession {
            kind: DragKind::Move,
            press_point: local,
            start_rect: self.rect,
            start_position: self.position,
        });
        log::debug!("Frame move started at {:?}", local);
    }

    /// Pointer motion while the frame body is pressed; `local` is frame-relative.
    ///
    /// Returns `false` in resize-only mode or when no move is in progress.
    pub fn on_frame_move(&mut self, local: Point, hosts: &mut impl HostResolver) -> bool {
        if self.config.resize_only {
            return false;
        }
        if !matches!(self.session, Some(DragSession { kind: DragKind::Move, .. })) {
            return false;
        }
        self.position += local - self.drag_start;
        self.map_to_host(hosts);
        self.needs_redraw = true;
        true
    }

    /// End a frame move, applying the configured snap.
    pub fn on_frame_release(&mut self, hosts: &mut impl HostResolver) {
        let was_moving = matches!(self.session, Some(DragSession { kind: DragKind::Move, .. }));
        self.session = None;
        if !was_moving || self.config.resize_only {
            return;
        }
        let snapped = snap::snap_point(self.position, self.config.snap, self.config.grid_size);
        if snapped.is_snapped() && snapped.point != self.position {
            self.position = snapped.point;
            self.map_to_host(hosts);
            self.needs_redraw = true;
        }
    }

    /// Dispatch a scene-space pointer event.
    ///
    /// Presses are hit-tested against the handles first and then the frame
    /// body. Returns `true` if the event was consumed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, hosts: &mut impl HostResolver) -> bool {
        let local = event.position() - self.position.to_vec2();
        match event {
            PointerEvent::Down { button, .. } => {
                if button != MouseButton::Left || !self.visible {
                    return false;
                }
                if let Some(corner) = self.hit_test_handle(local) {
                    let handle_local = local - self.handle(corner).position.to_vec2();
                    self.on_press(corner, handle_local);
                    true
                } else if self.rect.contains(local) {
                    self.on_frame_press(local);
                    true
                } else {
                    false
                }
            }
            PointerEvent::Move { .. } => match self.session.map(|s| s.kind) {
                Some(DragKind::Resize(corner)) => {
                    let handle_local = local - self.handle(corner).position.to_vec2();
                    self.on_move(corner, handle_local, hosts)
                }
                Some(DragKind::Move) => self.on_frame_move(local, hosts),
                None => false,
            },
            PointerEvent::Up { button, .. } => {
                if button != MouseButton::Left {
                    return false;
                }
                match self.session.map(|s| s.kind) {
                    Some(DragKind::Resize(corner)) => {
                        self.on_release(corner);
                        true
                    }
                    Some(DragKind::Move) => {
                        self.on_frame_release(hosts);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    fn adjust_size(&mut self, dx: f64, dy: f64) {
        self.rect = Rect::from_origin_size(self.rect.origin(), (self.rect.width() + dx, self.rect.height() + dy));
    }

    fn update_handles(&mut self) {
        let positions = geometry::corner_positions(self.rect, self.config.buffer);
        for (handle, position) in self.handles.iter_mut().zip(positions) {
            handle.position = position;
        }
    }

    /// Lay out the handles and push the drawable rect and position to the host.
    fn set_corner_positions(&mut self, hosts: &mut impl HostResolver) {
        self.update_handles();
        let Some(id) = self.host else {
            return;
        };
        match hosts.host_mut(id) {
            Some(host) => self.apply_to_host(host),
            None => self.forget_missing_host(id),
        }
    }

    fn map_to_host(&mut self, hosts: &mut impl HostResolver) {
        let Some(id) = self.host else {
            return;
        };
        match hosts.host_mut(id) {
            Some(host) => self.map_position(host),
            None => self.forget_missing_host(id),
        }
    }

    fn apply_to_host(&self, host: &mut dyn FrameHost) {
        host.set_rect(self.drawable_rect());
        self.map_position(host);
    }

    fn map_position(&self, host: &mut dyn FrameHost) {
        let b = self.config.buffer;
        let local = host.scene_to_host(self.position);
        let in_parent = host.host_to_parent(local);
        host.set_position(in_parent + Vec2::new(b, b));
    }

    fn forget_missing_host(&mut self, id: ItemId) {
        log::warn!("Frame host {} no longer exists, detaching", id);
        self.host = None;
    }
}
