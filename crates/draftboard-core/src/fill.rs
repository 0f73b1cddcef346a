//! Fill descriptors and their evaluation into renderer paint.
//!
//! [`evaluate`] is a pure function of a [`FillDescriptor`] and a target
//! rectangle. Gradient geometry is derived per call, never stored.

use crate::blend::BlendMode;
use crate::color::{self, SerializableColor};
use crate::gradient::{GradientModel, GradientStop};
use kurbo::{Point, Rect, Size};
use peniko::{Brush, Color, ColorStop, Extend, Gradient as PenikoGradient};
use serde::{Deserialize, Serialize};

/// How gradient and image content maps onto the fill rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    /// Keep aspect ratio and cover the rectangle.
    #[default]
    Fill,
    /// Keep aspect ratio and fit inside the rectangle.
    Fit,
    /// Match the rectangle exactly.
    Stretch,
    /// Repeat at native size from the rectangle's origin.
    Tile,
}

/// Discriminant of [`FillKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillType {
    Color,
    LinearGradient,
    RadialGradient,
    ConicalGradient,
    Image,
    Pattern,
}

/// Direction of a linear gradient inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GradientAxis {
    /// Across the longer side of the box, through its center.
    #[default]
    Major,
    /// Start and end in unit box coordinates.
    Explicit { start: Point, end: Point },
}

/// Gradient parameters of a fill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: GradientModel,
    #[serde(default)]
    pub axis: GradientAxis,
    /// Start angle in degrees for conical gradients.
    #[serde(default)]
    pub angle: f64,
}

impl Gradient {
    pub fn new(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        Self {
            stops: GradientModel::with_stops(stops),
            ..Self::default()
        }
    }

    pub fn with_axis(mut self, axis: GradientAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }
}

/// Encoded image used as a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
    /// Encoded image bytes (base64).
    #[serde(default)]
    pub data_base64: String,
}

impl ImageRef {
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// What a fill paints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillKind {
    Solid(SerializableColor),
    LinearGradient(Gradient),
    RadialGradient(Gradient),
    ConicalGradient(Gradient),
    Image(ImageRef),
    /// Recognized but not rendered yet.
    Pattern,
}

impl FillKind {
    pub fn fill_type(&self) -> FillType {
        match self {
            FillKind::Solid(_) => FillType::Color,
            FillKind::LinearGradient(_) => FillType::LinearGradient,
            FillKind::RadialGradient(_) => FillType::RadialGradient,
            FillKind::ConicalGradient(_) => FillType::ConicalGradient,
            FillKind::Image(_) => FillType::Image,
            FillKind::Pattern => FillType::Pattern,
        }
    }
}

/// A fill layer of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillDescriptor {
    pub name: String,
    pub kind: FillKind,
    #[serde(default)]
    pub fill_mode: FillMode,
    /// Layer opacity in [0, 1].
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

impl Default for FillDescriptor {
    fn default() -> Self {
        Self::solid("Fill", Color::WHITE)
    }
}

impl FillDescriptor {
    fn with_kind(name: impl Into<String>, kind: FillKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fill_mode: FillMode::default(),
            opacity: 1.0,
            enabled: true,
            blend_mode: BlendMode::Normal,
        }
    }

    pub fn solid(name: impl Into<String>, color: Color) -> Self {
        Self::with_kind(name, FillKind::Solid(color.into()))
    }

    pub fn linear(name: impl Into<String>, gradient: Gradient) -> Self {
        Self::with_kind(name, FillKind::LinearGradient(gradient))
    }

    pub fn radial(name: impl Into<String>, gradient: Gradient) -> Self {
        Self::with_kind(name, FillKind::RadialGradient(gradient))
    }

    pub fn conical(name: impl Into<String>, gradient: Gradient) -> Self {
        Self::with_kind(name, FillKind::ConicalGradient(gradient))
    }

    pub fn image(name: impl Into<String>, image: ImageRef, fill_mode: FillMode) -> Self {
        Self {
            fill_mode,
            ..Self::with_kind(name, FillKind::Image(image))
        }
    }

    pub fn pattern(name: impl Into<String>) -> Self {
        Self::with_kind(name, FillKind::Pattern)
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn fill_type(&self) -> FillType {
        self.kind.fill_type()
    }

    /// Set the layer opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Solid color, if this is a solid fill.
    pub fn color(&self) -> Option<Color> {
        match &self.kind {
            FillKind::Solid(color) => Some((*color).into()),
            _ => None,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.kind = FillKind::Solid(color.into());
    }

    /// Gradient parameters, if this is a gradient fill.
    pub fn gradient(&self) -> Option<&Gradient> {
        match &self.kind {
            FillKind::LinearGradient(g) | FillKind::RadialGradient(g) | FillKind::ConicalGradient(g) => Some(g),
            _ => None,
        }
    }
}

/// Renderer-facing description of what to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintBrush {
    /// Draw nothing.
    None,
    Solid(Color),
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
        extend: Extend,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
        extend: Extend,
    },
    Sweep {
        center: Point,
        /// Start angle in degrees.
        start_angle: f64,
        stops: Vec<GradientStop>,
        extend: Extend,
    },
    Image {
        /// Where one copy of the image lands.
        dest: Rect,
        tiled: bool,
    },
}

/// Evaluated fill: a brush plus layer parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub brush: PaintBrush,
    /// Painter-level opacity applied to the whole layer.
    pub opacity: f64,
    pub blend_mode: BlendMode,
}

impl Paint {
    /// A paint that draws nothing.
    pub fn empty() -> Self {
        Self {
            brush: PaintBrush::None,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brush == PaintBrush::None
    }

    /// Convert solid and gradient paints into a peniko brush.
    ///
    /// Images and empty paints have no brush equivalent.
    pub fn to_brush(&self) -> Option<Brush> {
        let gradient = match &self.brush {
            PaintBrush::None | PaintBrush::Image { .. } => return None,
            PaintBrush::Solid(color) => return Some(Brush::Solid(*color)),
            PaintBrush::Linear { start, end, stops, extend } => PenikoGradient::new_linear(*start, *end)
                .with_extend(*extend)
                .with_stops(color_stops(stops).as_slice()),
            PaintBrush::Radial { center, radius, stops, extend } => PenikoGradient::new_radial(*center, *radius as f32)
                .with_extend(*extend)
                .with_stops(color_stops(stops).as_slice()),
            PaintBrush::Sweep { center, start_angle, stops, extend } => {
                let start = start_angle.to_radians();
                PenikoGradient::new_sweep(*center, start as f32, (start + std::f64::consts::TAU) as f32)
                    .with_extend(*extend)
                    .with_stops(color_stops(stops).as_slice())
            }
        };
        Some(Brush::Gradient(gradient))
    }
}

fn color_stops(stops: &[GradientStop]) -> Vec<ColorStop> {
    stops
        .iter()
        .map(|stop| ColorStop::from((stop.position as f32, stop.color())))
        .collect()
}

/// Place content of `natural` size into `target` according to `mode`.
pub fn fit_box(mode: FillMode, target: Rect, natural: Size) -> Rect {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return target;
    }
    let scale_x = target.width() / natural.width;
    let scale_y = target.height() / natural.height;
    let scale = match mode {
        FillMode::Stretch => return target,
        FillMode::Tile => return Rect::from_origin_size(target.origin(), natural),
        FillMode::Fill => scale_x.max(scale_y),
        FillMode::Fit => scale_x.min(scale_y),
    };
    Rect::from_center_size(target.center(), natural * scale)
}

/// Evaluate a fill for `rect`.
pub fn evaluate(fill: &FillDescriptor, rect: Rect) -> Paint {
    if !fill.enabled {
        return Paint::empty();
    }

    let layer = |brush| Paint {
        brush,
        opacity: fill.opacity,
        blend_mode: fill.blend_mode,
    };

    match &fill.kind {
        // Solid fills carry opacity in the color alpha.
        FillKind::Solid(color) => Paint {
            brush: PaintBrush::Solid(color::with_opacity((*color).into(), fill.opacity)),
            opacity: 1.0,
            blend_mode: fill.blend_mode,
        },
        FillKind::LinearGradient(gradient) => {
            let bounds = gradient_box(fill.fill_mode, rect);
            let (start, end) = linear_axis(gradient.axis, bounds);
            layer(PaintBrush::Linear {
                start,
                end,
                stops: gradient.stops.stops().to_vec(),
                extend: extend_for(fill.fill_mode),
            })
        }
        FillKind::RadialGradient(gradient) => {
            let bounds = gradient_box(fill.fill_mode, rect);
            layer(PaintBrush::Radial {
                center: bounds.center(),
                radius: bounds.width().min(bounds.height()) / 2.0,
                stops: gradient.stops.stops().to_vec(),
                extend: extend_for(fill.fill_mode),
            })
        }
        FillKind::ConicalGradient(gradient) => {
            let bounds = gradient_box(fill.fill_mode, rect);
            layer(PaintBrush::Sweep {
                center: bounds.center(),
                start_angle: gradient.angle,
                stops: gradient.stops.stops().to_vec(),
                extend: extend_for(fill.fill_mode),
            })
        }
        FillKind::Image(image) => layer(PaintBrush::Image {
            dest: fit_box(fill.fill_mode, rect, image.size()),
            tiled: fill.fill_mode == FillMode::Tile,
        }),
        FillKind::Pattern => {
            log::trace!("Pattern fill '{}' has nothing to paint", fill.name);
            Paint::empty()
        }
    }
}

/// Gradients have a square natural size, as large as the rect's short side.
fn gradient_box(mode: FillMode, rect: Rect) -> Rect {
    let side = rect.width().min(rect.height());
    fit_box(mode, rect, Size::new(side, side))
}

fn linear_axis(axis: GradientAxis, bounds: Rect) -> (Point, Point) {
    match axis {
        GradientAxis::Major => {
            let center = bounds.center();
            if bounds.width() >= bounds.height() {
                (Point::new(bounds.x0, center.y), Point::new(bounds.x1, center.y))
            } else {
                (Point::new(center.x, bounds.y0), Point::new(center.x, bounds.y1))
            }
        }
        GradientAxis::Explicit { start, end } => {
            let map = |p: Point| Point::new(bounds.x0 + p.x * bounds.width(), bounds.y0 + p.y * bounds.height());
            (map(start), map(end))
        }
    }
}

fn extend_for(mode: FillMode) -> Extend {
    match mode {
        FillMode::Tile => Extend::Repeat,
        _ => Extend::Pad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_blue() -> Gradient {
        Gradient::new([
            GradientStop::new(0.0, Color::from_rgba8(255, 0, 0, 255)),
            GradientStop::new(1.0, Color::from_rgba8(0, 0, 255, 255)),
        ])
    }

    #[test]
    fn test_solid_opacity_goes_into_alpha() {
        let fill = FillDescriptor::solid("Red", Color::from_rgba8(255, 0, 0, 255)).with_opacity(0.5);
        let paint = evaluate(&fill, Rect::new(0.0, 0.0, 10.0, 10.0));

        match paint.brush {
            PaintBrush::Solid(color) => {
                let rgba = color.to_rgba8();
                assert_eq!((rgba.r, rgba.g, rgba.b), (255, 0, 0));
                assert_eq!(rgba.a, 128);
            }
            other => panic!("Expected solid brush, got {other:?}"),
        }
        assert_eq!(paint.opacity, 1.0);
    }

    #[test]
    fn test_linear_stretch_spans_major_axis() {
        let rect = Rect::new(10.0, 20.0, 210.0, 120.0);
        let fill = FillDescriptor::linear("Ramp", red_blue())
            .with_fill_mode(FillMode::Stretch)
            .with_opacity(0.75);
        let paint = evaluate(&fill, rect);

        match paint.brush {
            PaintBrush::Linear { start, end, stops, extend } => {
                assert_eq!(start, Point::new(10.0, 70.0));
                assert_eq!(end, Point::new(210.0, 70.0));
                assert_eq!(stops.len(), 2);
                assert_eq!(extend, Extend::Pad);
            }
            other => panic!("Expected linear brush, got {other:?}"),
        }
        // Gradients keep opacity at the layer level.
        assert_eq!(paint.opacity, 0.75);
    }

    #[test]
    fn test_linear_tall_rect_runs_vertically() {
        let rect = Rect::new(0.0, 0.0, 50.0, 300.0);
        let fill = FillDescriptor::linear("Ramp", red_blue()).with_fill_mode(FillMode::Stretch);
        match evaluate(&fill, rect).brush {
            PaintBrush::Linear { start, end, .. } => {
                assert_eq!(start, Point::new(25.0, 0.0));
                assert_eq!(end, Point::new(25.0, 300.0));
            }
            other => panic!("Expected linear brush, got {other:?}"),
        }
    }

    #[test]
    fn test_linear_explicit_axis_maps_unit_box() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let gradient = red_blue().with_axis(GradientAxis::Explicit {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 1.0),
        });
        let fill = FillDescriptor::linear("Diagonal", gradient).with_fill_mode(FillMode::Stretch);
        match evaluate(&fill, rect).brush {
            PaintBrush::Linear { start, end, .. } => {
                assert_eq!(start, Point::new(0.0, 0.0));
                assert_eq!(end, Point::new(200.0, 100.0));
            }
            other => panic!("Expected linear brush, got {other:?}"),
        }
    }

    #[test]
    fn test_fit_box_modes() {
        let target = Rect::new(0.0, 0.0, 200.0, 100.0);
        let natural = Size::new(50.0, 50.0);

        assert_eq!(fit_box(FillMode::Stretch, target, natural), target);
        assert_eq!(fit_box(FillMode::Fit, target, natural), Rect::new(50.0, 0.0, 150.0, 100.0));
        assert_eq!(fit_box(FillMode::Fill, target, natural), Rect::new(0.0, -50.0, 200.0, 150.0));
        assert_eq!(fit_box(FillMode::Tile, target, natural), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_fit_box_degenerate_natural_size() {
        let target = Rect::new(0.0, 0.0, 20.0, 10.0);
        assert_eq!(fit_box(FillMode::Fit, target, Size::ZERO), target);
    }

    #[test]
    fn test_radial_fit_is_centered() {
        let fill = FillDescriptor::radial("Glow", red_blue()).with_fill_mode(FillMode::Fit);
        match evaluate(&fill, Rect::new(0.0, 0.0, 200.0, 100.0)).brush {
            PaintBrush::Radial { center, radius, .. } => {
                assert_eq!(center, Point::new(100.0, 50.0));
                assert_eq!(radius, 50.0);
            }
            other => panic!("Expected radial brush, got {other:?}"),
        }
    }

    #[test]
    fn test_conical_uses_angle_and_tile_repeats() {
        let fill = FillDescriptor::conical("Sweep", red_blue().with_angle(90.0)).with_fill_mode(FillMode::Tile);
        match evaluate(&fill, Rect::new(0.0, 0.0, 200.0, 100.0)).brush {
            PaintBrush::Sweep { center, start_angle, extend, .. } => {
                assert_eq!(center, Point::new(50.0, 50.0));
                assert_eq!(start_angle, 90.0);
                assert_eq!(extend, Extend::Repeat);
            }
            other => panic!("Expected sweep brush, got {other:?}"),
        }
    }

    #[test]
    fn test_image_fill_mode() {
        let image = ImageRef {
            width: 100,
            height: 50,
            data_base64: String::new(),
        };
        let fill = FillDescriptor::image("Photo", image, FillMode::Fit).with_opacity(0.4);
        let paint = evaluate(&fill, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(
            paint.brush,
            PaintBrush::Image {
                dest: Rect::new(0.0, 25.0, 100.0, 75.0),
                tiled: false,
            }
        );
        assert_eq!(paint.opacity, 0.4);
        assert!(paint.to_brush().is_none());
    }

    #[test]
    fn test_pattern_is_noop() {
        let paint = evaluate(&FillDescriptor::pattern("Dots"), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(paint.is_empty());
        assert!(paint.to_brush().is_none());
    }

    #[test]
    fn test_disabled_fill_paints_nothing() {
        let mut fill = FillDescriptor::solid("Off", Color::from_rgba8(0, 0, 0, 255));
        fill.enabled = false;
        assert!(evaluate(&fill, Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_to_brush_for_solid_and_gradient() {
        let solid = evaluate(
            &FillDescriptor::solid("Red", Color::from_rgba8(255, 0, 0, 255)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert!(matches!(solid.to_brush(), Some(Brush::Solid(_))));

        let linear = evaluate(&FillDescriptor::linear("Ramp", red_blue()), Rect::new(0.0, 0.0, 10.0, 10.0));
        match linear.to_brush() {
            Some(Brush::Gradient(gradient)) => assert_eq!(gradient.stops.len(), 2),
            other => panic!("Expected gradient brush, got {other:?}"),
        }
    }

    #[test]
    fn test_fill_json_roundtrip() {
        let fill = FillDescriptor::linear("Ramp", red_blue()).with_opacity(0.3);
        let json = serde_json::to_string(&fill).unwrap();
        let restored: FillDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fill);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let fill = FillDescriptor::default().with_opacity(3.0);
        assert_eq!(fill.opacity, 1.0);
        assert_eq!(fill.fill_type(), FillType::Color);
    }
}
