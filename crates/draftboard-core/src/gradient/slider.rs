//! Slider that picks a value along a gradient.

use super::GradientModel;
use crate::input::MouseButton;
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Radius of the value indicator in pixels.
pub const SELECTOR_SIZE: f64 = 6.0;

/// Slider orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A slider whose track shows a gradient and whose indicator shows the
/// color under the current value.
#[derive(Debug, Clone)]
pub struct GradientSlider {
    pub gradient: GradientModel,
    pub orientation: Orientation,
    /// Flip the gradient direction.
    pub inverted: bool,
    minimum: i32,
    maximum: i32,
    value: i32,
    /// Track length in pixels along the orientation axis.
    length: f64,
    pressed: bool,
}

impl Default for GradientSlider {
    fn default() -> Self {
        Self {
            gradient: GradientModel::new(),
            orientation: Orientation::Horizontal,
            inverted: false,
            minimum: 0,
            maximum: 99,
            value: 0,
            length: 100.0,
            pressed: false,
        }
    }
}

impl GradientSlider {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Set the value range. `maximum` is raised to `minimum` if smaller.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.value = self.value.clamp(self.minimum, self.maximum);
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.minimum, self.maximum);
    }

    /// Set the track length in pixels.
    pub fn set_length(&mut self, length: f64) {
        self.length = length.max(0.0);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Map a pointer coordinate along the track to a slider value and store it.
    pub fn position_from_pointer(&mut self, x: f64) -> i32 {
        let pos = if self.length > SELECTOR_SIZE {
            (x - SELECTOR_SIZE / 2.0) / (self.length - SELECTOR_SIZE)
        } else {
            0.0
        };
        let pos = pos.clamp(0.0, 1.0);
        let span = f64::from(self.maximum) - f64::from(self.minimum);
        self.set_value((f64::from(self.minimum) + pos * span).round() as i32);
        self.value
    }

    /// Primary-button press jumps the value to the pointer.
    pub fn on_press(&mut self, button: MouseButton, x: f64) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.pressed = true;
        self.position_from_pointer(x);
        true
    }

    /// Pointer motion updates the value while pressed.
    pub fn on_move(&mut self, x: f64) -> bool {
        if !self.pressed {
            return false;
        }
        self.position_from_pointer(x);
        true
    }

    pub fn on_release(&mut self, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.pressed = false;
        true
    }

    /// Value in [0, 1] relative to the range.
    pub fn normalized_value(&self) -> f64 {
        if self.maximum != 0 {
            (f64::from(self.value) - f64::from(self.minimum)) / f64::from(self.maximum)
        } else {
            0.0
        }
    }

    /// Color under the current value.
    pub fn current_color(&self) -> Color {
        self.gradient.color_at(self.normalized_value())
    }

    /// Center of the indicator along the track.
    pub fn indicator_offset(&self) -> f64 {
        self.normalized_value() * (self.length - SELECTOR_SIZE * 2.0) + SELECTOR_SIZE
    }

    /// End point of the unit gradient vector for painting the track.
    pub fn direction(&self) -> Point {
        let dir = if self.inverted { -1.0 } else { 1.0 };
        match self.orientation {
            Orientation::Horizontal => Point::new(dir, 0.0),
            Orientation::Vertical => Point::new(0.0, -dir),
        }
    }
}
