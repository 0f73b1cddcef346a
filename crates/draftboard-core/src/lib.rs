//! Draftboard Core Library
//!
//! Platform-agnostic data structures and logic for the Draftboard prototyping
//! tool: resize frames and their handles, gradient and fill models, and the
//! property editors that modify them.

pub mod artboard;
pub mod blend;
pub mod color;
pub mod config;
pub mod fill;
pub mod frame;
pub mod geometry;
pub mod gradient;
pub mod input;
pub mod property;
pub mod snap;

pub use artboard::{Artboard, Scene};
pub use blend::BlendMode;
pub use color::SerializableColor;
pub use config::{ConfigError, ConfigResult, FrameConfig};
pub use fill::{FillDescriptor, FillKind, FillMode, FillType, Paint, PaintBrush, evaluate, fit_box};
pub use frame::{DragKind, DragSession, FrameHost, HandleFrame, HandleState, HostResolver, ItemHandle, ItemId, NoHosts};
pub use geometry::{Anchor, HandleCorner};
pub use gradient::{GradientError, GradientModel, GradientResult, GradientSlider, GradientStop, Orientation};
pub use input::{MouseButton, PointerEvent};
pub use property::{ColorEditor, EditorMode, FillPanel, ItemProperty, PropertyKind, Shadow, Stroke};
pub use snap::{GRID_SIZE, SnapMode, SnapResult, snap_point, snap_to_grid};
