//! Gradient color model: ordered stops and interpolation along them.

mod slider;

pub use slider::{GradientSlider, Orientation, SELECTOR_SIZE};

use crate::color::{self, SerializableColor};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gradient errors.
#[derive(Debug, Error)]
pub enum GradientError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for gradient persistence.
pub type GradientResult<T> = Result<T, GradientError>;

/// A (position, color) anchor of a color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the ramp in [0, 1].
    pub position: f64,
    /// Stop color.
    pub color: SerializableColor,
}

impl GradientStop {
    pub fn new(position: f64, color: impl Into<SerializableColor>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }

    /// Stop color as a peniko color.
    pub fn color(&self) -> Color {
        self.color.into()
    }
}

impl From<(f64, Color)> for GradientStop {
    fn from((position, color): (f64, Color)) -> Self {
        Self::new(position, color)
    }
}

type ChangeCallback = Box<dyn FnMut(&[GradientStop])>;

/// Ordered list of gradient stops.
///
/// Stops are kept sorted by position. Every mutation notifies the
/// `on_changed` callback so the owning view can repaint.
#[derive(Default)]
pub struct GradientModel {
    stops: Vec<GradientStop>,
    on_changed: Option<ChangeCallback>,
}

impl std::fmt::Debug for GradientModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientModel")
            .field("stops", &self.stops)
            .field("on_changed", &self.on_changed.is_some())
            .finish()
    }
}

impl Clone for GradientModel {
    /// Clones the stops only; the change callback stays with the original.
    fn clone(&self) -> Self {
        Self {
            stops: self.stops.clone(),
            on_changed: None,
        }
    }
}

impl PartialEq for GradientModel {
    fn eq(&self, other: &Self) -> bool {
        self.stops == other.stops
    }
}

impl GradientModel {
    /// Create an empty gradient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gradient from a stop list.
    pub fn with_stops(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let mut model = Self::new();
        model.stops = normalize(stops);
        model
    }

    /// Register the repaint notification.
    pub fn set_on_changed(&mut self, callback: impl FnMut(&[GradientStop]) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    /// The stops, sorted by position.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Replace all stops.
    ///
    /// Stops outside [0, 1] are dropped; the rest are stably sorted by
    /// position so equal positions keep their given order.
    pub fn set_stops(&mut self, stops: impl IntoIterator<Item = GradientStop>) {
        self.stops = normalize(stops);
        self.notify();
    }

    /// Replace all stops with evenly spaced colors.
    pub fn set_colors(&mut self, colors: &[Color]) {
        self.stops = match colors.len() {
            0 => Vec::new(),
            1 => vec![GradientStop::new(0.0, colors[0])],
            n => {
                let last = (n - 1) as f64;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| GradientStop::new(i as f64 / last, c))
                    .collect()
            }
        };
        self.notify();
    }

    /// Replace the first stop's color, or add a stop at 0 if empty.
    pub fn set_first_color(&mut self, color: Color) {
        match self.stops.first_mut() {
            Some(stop) => stop.color = color.into(),
            None => self.stops.push(GradientStop::new(0.0, color)),
        }
        self.notify();
    }

    /// Replace the last stop's color, or add a stop at 1 when there are
    /// fewer than two stops.
    pub fn set_last_color(&mut self, color: Color) {
        if self.stops.len() < 2 {
            self.stops.push(GradientStop::new(1.0, color));
        } else if let Some(stop) = self.stops.last_mut() {
            stop.color = color.into();
        }
        self.notify();
    }

    /// Color of the first stop, transparent if there are none.
    pub fn first_color(&self) -> Color {
        self.stops.first().map_or(Color::TRANSPARENT, GradientStop::color)
    }

    /// Color of the last stop, transparent if there are none.
    pub fn last_color(&self) -> Color {
        self.stops.last().map_or(Color::TRANSPARENT, GradientStop::color)
    }

    /// Color at `pos` along the ramp.
    ///
    /// Positions before the first stop take the first color, positions at or
    /// after the last stop take the last color. Between two stops every
    /// channel is interpolated linearly; two stops at the same position
    /// interpolate with `q = 0`.
    pub fn color_at(&self, pos: f64) -> Color {
        let i = self
            .stops
            .iter()
            .position(|stop| stop.position > pos)
            .unwrap_or(self.stops.len());

        if i == 0 {
            self.first_color()
        } else if i == self.stops.len() {
            self.last_color()
        } else {
            let a = &self.stops[i - 1];
            let b = &self.stops[i];
            let span = b.position - a.position;
            let q = if span != 0.0 { (pos - a.position) / span } else { 0.0 };
            color::lerp(a.color(), b.color(), q)
        }
    }

    /// Serialize the stops as an ordered JSON list.
    pub fn to_json(&self) -> GradientResult<String> {
        Ok(serde_json::to_string(&self.stops)?)
    }

    /// Build a gradient from JSON produced by [`GradientModel::to_json`].
    pub fn from_json(json: &str) -> GradientResult<Self> {
        let stops: Vec<GradientStop> = serde_json::from_str(json)?;
        Ok(Self::with_stops(stops))
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_changed.as_mut() {
            callback(&self.stops);
        }
    }
}

impl Serialize for GradientModel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.stops.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GradientModel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stops = Vec::<GradientStop>::deserialize(deserializer)?;
        Ok(Self::with_stops(stops))
    }
}

fn normalize(stops: impl IntoIterator<Item = GradientStop>) -> Vec<GradientStop> {
    let mut stops: Vec<GradientStop> = stops
        .into_iter()
        .filter(|stop| {
            let valid = (0.0..=1.0).contains(&stop.position);
            if !valid {
                log::warn!("Dropping gradient stop at invalid position {}", stop.position);
            }
            valid
        })
        .collect();
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));
    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::from_rgba8(r, g, b, a)
    }

    fn black_white() -> GradientModel {
        GradientModel::with_stops([
            GradientStop::new(0.0, rgba(0, 0, 0, 255)),
            GradientStop::new(1.0, rgba(255, 255, 255, 255)),
        ])
    }

    #[test]
    fn test_empty_model_is_transparent() {
        let model = GradientModel::new();
        assert_eq!(model.first_color().to_rgba8(), Color::TRANSPARENT.to_rgba8());
        assert_eq!(model.last_color().to_rgba8(), Color::TRANSPARENT.to_rgba8());
        assert_eq!(model.color_at(0.5).to_rgba8(), Color::TRANSPARENT.to_rgba8());
    }

    #[test]
    fn test_midpoint_is_mid_gray() {
        let rgba = black_white().color_at(0.5).to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (128, 128, 128, 255));
    }

    #[test]
    fn test_endpoints_match_first_and_last() {
        let model = GradientModel::with_stops([
            GradientStop::new(0.0, rgba(255, 0, 0, 255)),
            GradientStop::new(0.3, rgba(0, 255, 0, 128)),
            GradientStop::new(1.0, rgba(0, 0, 255, 10)),
        ]);
        assert_eq!(model.color_at(0.0).to_rgba8(), model.first_color().to_rgba8());
        assert_eq!(model.color_at(1.0).to_rgba8(), model.last_color().to_rgba8());
    }

    #[test]
    fn test_single_stop_is_constant() {
        let red = rgba(255, 0, 0, 255);
        let model = GradientModel::with_stops([GradientStop::new(0.5, red)]);
        for pos in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(model.color_at(pos).to_rgba8(), red.to_rgba8());
        }
    }

    #[test]
    fn test_before_first_and_after_last_stop() {
        let model = GradientModel::with_stops([
            GradientStop::new(0.25, rgba(255, 0, 0, 255)),
            GradientStop::new(0.75, rgba(0, 0, 255, 255)),
        ]);
        assert_eq!(model.color_at(0.1).to_rgba8(), rgba(255, 0, 0, 255).to_rgba8());
        assert_eq!(model.color_at(0.9).to_rgba8(), rgba(0, 0, 255, 255).to_rgba8());
    }

    #[test]
    fn test_duplicate_positions_take_later_stop() {
        let model = GradientModel::with_stops([
            GradientStop::new(0.0, rgba(0, 0, 0, 255)),
            GradientStop::new(0.5, rgba(255, 0, 0, 255)),
            GradientStop::new(0.5, rgba(0, 255, 0, 255)),
            GradientStop::new(1.0, rgba(0, 0, 255, 255)),
        ]);
        // The hard edge at 0.5 starts on the later of the duplicate stops.
        assert_eq!(model.color_at(0.5).to_rgba8(), rgba(0, 255, 0, 255).to_rgba8());
        // Just below the edge interpolates towards the earlier duplicate.
        let below = model.color_at(0.4999).to_rgba8();
        assert_eq!(below.r, 255);
        assert_eq!(below.g, 0);
    }

    #[test]
    fn test_alpha_is_interpolated() {
        let model = GradientModel::with_stops([
            GradientStop::new(0.0, rgba(0, 0, 0, 0)),
            GradientStop::new(1.0, rgba(0, 0, 0, 255)),
        ]);
        assert_eq!(model.color_at(0.5).to_rgba8().a, 128);
    }

    #[test]
    fn test_set_stops_sorts_and_drops_invalid() {
        let mut model = GradientModel::new();
        model.set_stops([
            GradientStop::new(1.0, rgba(0, 0, 255, 255)),
            GradientStop::new(1.5, rgba(1, 1, 1, 255)),
            GradientStop::new(0.0, rgba(255, 0, 0, 255)),
            GradientStop::new(f64::NAN, rgba(2, 2, 2, 255)),
        ]);
        let positions: Vec<f64> = model.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 1.0]);
        assert_eq!(model.first_color().to_rgba8(), rgba(255, 0, 0, 255).to_rgba8());
    }

    #[test]
    fn test_set_stops_replaces_wholesale() {
        let mut model = black_white();
        model.set_stops([GradientStop::new(0.5, rgba(9, 9, 9, 255))]);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_set_colors_spaces_evenly() {
        let mut model = GradientModel::new();
        model.set_colors(&[rgba(255, 0, 0, 255), rgba(0, 255, 0, 255), rgba(0, 0, 255, 255)]);
        let positions: Vec<f64> = model.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);

        model.set_colors(&[rgba(1, 2, 3, 255)]);
        assert_eq!(model.len(), 1);
        assert_eq!(model.stops()[0].position, 0.0);

        model.set_colors(&[]);
        assert!(model.is_empty());
    }

    #[test]
    fn test_set_first_and_last_color() {
        let mut model = GradientModel::new();
        model.set_first_color(rgba(255, 0, 0, 255));
        assert_eq!(model.len(), 1);
        model.set_last_color(rgba(0, 0, 255, 255));
        assert_eq!(model.len(), 2);
        assert_eq!(model.stops()[1].position, 1.0);

        model.set_last_color(rgba(0, 255, 0, 255));
        assert_eq!(model.len(), 2);
        assert_eq!(model.last_color().to_rgba8(), rgba(0, 255, 0, 255).to_rgba8());

        model.set_first_color(rgba(1, 1, 1, 255));
        assert_eq!(model.first_color().to_rgba8(), rgba(1, 1, 1, 255).to_rgba8());
    }

    #[test]
    fn test_mutators_notify() {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let mut model = GradientModel::new();
        model.set_on_changed(move |_| seen.set(seen.get() + 1));

        model.set_stops([GradientStop::new(0.0, rgba(0, 0, 0, 255))]);
        model.set_colors(&[rgba(0, 0, 0, 255), rgba(255, 255, 255, 255)]);
        model.set_first_color(rgba(255, 0, 0, 255));
        model.set_last_color(rgba(0, 0, 255, 255));
        let _ = model.color_at(0.5);

        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_json_keeps_stop_order() {
        let model = GradientModel::with_stops([
            GradientStop::new(0.0, rgba(255, 0, 0, 255)),
            GradientStop::new(0.4, rgba(0, 255, 0, 200)),
            GradientStop::new(1.0, rgba(0, 0, 255, 255)),
        ]);
        let json = model.to_json().unwrap();
        let restored = GradientModel::from_json(&json).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = GradientModel::from_json("[{\"position\": 0.0}]").unwrap_err();
        assert!(matches!(err, GradientError::Serialization(_)));
    }
}
