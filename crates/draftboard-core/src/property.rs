//! Item properties and the editors that modify them.
//!
//! An item carries fills, strokes and shadows. Editors receive them as an
//! [`ItemProperty`] and switch on the tag.

use crate::blend::BlendMode;
use crate::color::{self, SerializableColor};
use crate::fill::{self, FillDescriptor, FillKind, FillType, Paint};
use kurbo::{Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Outline of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub name: String,
    pub color: SerializableColor,
    pub width: f64,
    pub opacity: f64,
    pub enabled: bool,
    pub blend_mode: BlendMode,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            name: "Stroke".to_string(),
            color: SerializableColor::black(),
            width: 1.0,
            opacity: 1.0,
            enabled: true,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Drop shadow of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub name: String,
    pub color: SerializableColor,
    pub offset: Vec2,
    pub blur_radius: f64,
    pub spread: f64,
    pub opacity: f64,
    pub enabled: bool,
    pub blend_mode: BlendMode,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            name: "Shadow".to_string(),
            color: SerializableColor::black(),
            offset: Vec2::new(0.0, 2.0),
            blur_radius: 4.0,
            spread: 0.0,
            opacity: 0.25,
            enabled: true,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Kind tag of an [`ItemProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Fill,
    Stroke,
    Shadow,
}

/// A single editable property of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ItemProperty {
    Fill(FillDescriptor),
    Stroke(Stroke),
    Shadow(Shadow),
}

impl ItemProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            ItemProperty::Fill(_) => PropertyKind::Fill,
            ItemProperty::Stroke(_) => PropertyKind::Stroke,
            ItemProperty::Shadow(_) => PropertyKind::Shadow,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ItemProperty::Fill(fill) => &fill.name,
            ItemProperty::Stroke(stroke) => &stroke.name,
            ItemProperty::Shadow(shadow) => &shadow.name,
        }
    }
}

impl From<FillDescriptor> for ItemProperty {
    fn from(fill: FillDescriptor) -> Self {
        ItemProperty::Fill(fill)
    }
}

impl From<Stroke> for ItemProperty {
    fn from(stroke: Stroke) -> Self {
        ItemProperty::Stroke(stroke)
    }
}

impl From<Shadow> for ItemProperty {
    fn from(shadow: Shadow) -> Self {
        ItemProperty::Shadow(shadow)
    }
}

/// Which controls the color editor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    FillLayout,
    StrokeLayout,
    ShadowLayout,
}

type ChangeCallback = Box<dyn FnMut(&ItemProperty)>;

/// Color picker bound to one item property.
pub struct ColorEditor {
    property: ItemProperty,
    mode: EditorMode,
    fill_type: FillType,
    color: Color,
    /// Alpha in [0, 1].
    alpha: f64,
    on_changed: Option<ChangeCallback>,
}

impl std::fmt::Debug for ColorEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorEditor")
            .field("property", &self.property)
            .field("mode", &self.mode)
            .field("fill_type", &self.fill_type)
            .field("color", &self.color)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}

impl Default for ColorEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorEditor {
    pub fn new() -> Self {
        Self {
            property: ItemProperty::Fill(FillDescriptor::default()),
            mode: EditorMode::FillLayout,
            fill_type: FillType::Color,
            color: Color::WHITE,
            alpha: 1.0,
            on_changed: None,
        }
    }

    pub fn set_on_changed(&mut self, callback: impl FnMut(&ItemProperty) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn property(&self) -> &ItemProperty {
        &self.property
    }

    /// Load a property and switch the layout to match it.
    pub fn set_property(&mut self, property: ItemProperty) {
        match &property {
            ItemProperty::Fill(fill) => {
                self.mode = EditorMode::FillLayout;
                self.fill_type = fill.fill_type();
                if let FillKind::Solid(color) = &fill.kind {
                    self.color = (*color).into();
                    self.alpha = fill.opacity;
                }
            }
            ItemProperty::Stroke(_) => self.mode = EditorMode::StrokeLayout,
            ItemProperty::Shadow(_) => self.mode = EditorMode::ShadowLayout,
        }
        log::debug!("Color editor showing {:?} '{}'", property.kind(), property.name());
        self.property = property;
    }

    /// Write the picked color back into the held property.
    ///
    /// Only solid fills take the color; the change is reported either way.
    pub fn update_property(&mut self, color: Color, alpha: f64) {
        self.color = color;
        self.alpha = alpha.clamp(0.0, 1.0);
        if let ItemProperty::Fill(fill) = &mut self.property {
            if fill.fill_type() == FillType::Color {
                fill.set_color(color);
                fill.set_opacity(self.alpha);
            }
        }
        if let Some(callback) = self.on_changed.as_mut() {
            callback(&self.property);
        }
    }

    /// The held fill, or a default fill when another kind is held.
    pub fn fill(&self) -> FillDescriptor {
        match &self.property {
            ItemProperty::Fill(fill) => fill.clone(),
            _ => FillDescriptor::default(),
        }
    }

    pub fn stroke(&self) -> Stroke {
        match &self.property {
            ItemProperty::Stroke(stroke) => stroke.clone(),
            _ => Stroke::default(),
        }
    }

    pub fn shadow(&self) -> Shadow {
        match &self.property {
            ItemProperty::Shadow(shadow) => shadow.clone(),
            _ => Shadow::default(),
        }
    }

    /// Color with the editor alpha applied, as shown in the swatch.
    pub fn swatch_color(&self) -> Color {
        color::with_opacity(self.color, self.alpha)
    }
}

/// One fill row of the properties panel.
pub struct FillPanel {
    fill: FillDescriptor,
    on_changed: Option<Box<dyn FnMut(&FillDescriptor)>>,
}

impl std::fmt::Debug for FillPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FillPanel").field("fill", &self.fill).finish_non_exhaustive()
    }
}

impl Default for FillPanel {
    fn default() -> Self {
        Self::new(FillDescriptor::default())
    }
}

impl FillPanel {
    pub fn new(fill: FillDescriptor) -> Self {
        Self { fill, on_changed: None }
    }

    pub fn set_on_changed(&mut self, callback: impl FnMut(&FillDescriptor) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    pub fn fill(&self) -> &FillDescriptor {
        &self.fill
    }

    pub fn set_fill(&mut self, fill: FillDescriptor) {
        self.fill = fill;
        self.notify();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.fill.enabled = enabled;
        self.notify();
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.fill.blend_mode = blend_mode;
        self.notify();
    }

    /// Opacity as shown in the panel, 0 to 100.
    pub fn opacity_percent(&self) -> i32 {
        (self.fill.opacity * 100.0).round() as i32
    }

    pub fn set_opacity_percent(&mut self, percent: i32) {
        self.fill.set_opacity(f64::from(percent) / 100.0);
        self.notify();
    }

    /// Take over the fill picked in a color editor.
    pub fn apply_editor(&mut self, editor: &ColorEditor) {
        let mut fill = editor.fill();
        fill.set_opacity((fill.opacity * 100.0).round() / 100.0);
        self.fill = fill;
        self.notify();
    }

    /// Paint for a preview swatch of `size`.
    pub fn preview(&self, size: Size) -> Paint {
        fill::evaluate(&self.fill, Rect::from_origin_size((0.0, 0.0), size))
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_changed.as_mut() {
            callback(&self.fill);
        }
    }
}
