//! Color helpers shared by gradients, fills and property panels.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Linearly interpolate every channel (alpha included) between `a` and `b`.
///
/// `q = 0` yields `a`, `q = 1` yields `b`.
pub fn lerp(a: Color, b: Color, q: f64) -> Color {
    let [ar, ag, ab, aa] = a.components;
    let [br, bg, bb, ba] = b.components;
    let mix = |from: f32, to: f32| (to as f64 * q + from as f64 * (1.0 - q)) as f32;
    Color::new([mix(ar, br), mix(ag, bg), mix(ab, bb), mix(aa, ba)])
}

/// Scale the alpha channel of `color` by `opacity` (clamped to [0, 1]).
pub fn with_opacity(color: Color, opacity: f64) -> Color {
    color.multiply_alpha(opacity.clamp(0.0, 1.0) as f32)
}
