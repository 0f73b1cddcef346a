//! Blend modes offered by the fill, stroke and shadow panels.

use peniko::{BlendMode as PenikoBlend, Compose, Mix};
use serde::{Deserialize, Serialize};

/// How a paint layer composites onto what is below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    Normal,
    Darken,
    Multiply,
    ColorBurn,
    Lighten,
    Screen,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Plus,
}

impl BlendMode {
    /// Menu order, grouped into sections by [`BlendMode::SECTIONS`].
    pub const ALL: [BlendMode; 13] = [
        BlendMode::Normal,
        BlendMode::Darken,
        BlendMode::Multiply,
        BlendMode::ColorBurn,
        BlendMode::Lighten,
        BlendMode::Screen,
        BlendMode::ColorDodge,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HardLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Plus,
    ];

    /// Menu sections: normal, darken, lighten, contrast/inversion, additive.
    pub const SECTIONS: [&'static [BlendMode]; 5] = [
        &[BlendMode::Normal],
        &[BlendMode::Darken, BlendMode::Multiply, BlendMode::ColorBurn],
        &[BlendMode::Lighten, BlendMode::Screen, BlendMode::ColorDodge],
        &[
            BlendMode::Overlay,
            BlendMode::SoftLight,
            BlendMode::HardLight,
            BlendMode::Difference,
            BlendMode::Exclusion,
        ],
        &[BlendMode::Plus],
    ];

    /// Label shown in the blend mode menu.
    pub fn label(self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Darken => "Darken",
            BlendMode::Multiply => "Multiply",
            BlendMode::ColorBurn => "Color Burn",
            BlendMode::Lighten => "Lighten",
            BlendMode::Screen => "Screen",
            BlendMode::ColorDodge => "Color Dodge",
            BlendMode::Overlay => "Overlay",
            BlendMode::SoftLight => "Soft Light",
            BlendMode::HardLight => "Hard Light",
            BlendMode::Difference => "Difference",
            BlendMode::Exclusion => "Exclusion",
            BlendMode::Plus => "Plus",
        }
    }

    /// Position of this mode in [`BlendMode::ALL`]; unknown indices fall back to Normal.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// The renderer's blend mode.
    pub fn to_peniko(self) -> PenikoBlend {
        let mix = match self {
            BlendMode::Normal => Mix::Normal,
            BlendMode::Darken => Mix::Darken,
            BlendMode::Multiply => Mix::Multiply,
            BlendMode::ColorBurn => Mix::ColorBurn,
            BlendMode::Lighten => Mix::Lighten,
            BlendMode::Screen => Mix::Screen,
            BlendMode::ColorDodge => Mix::ColorDodge,
            BlendMode::Overlay => Mix::Overlay,
            BlendMode::SoftLight => Mix::SoftLight,
            BlendMode::HardLight => Mix::HardLight,
            BlendMode::Difference => Mix::Difference,
            BlendMode::Exclusion => Mix::Exclusion,
            BlendMode::Plus => return PenikoBlend::new(Mix::Normal, Compose::Plus),
        };
        PenikoBlend::new(mix, Compose::SrcOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_cover_all_modes_in_order() {
        let flattened: Vec<BlendMode> = BlendMode::SECTIONS.iter().flat_map(|s| s.iter().copied()).collect();
        assert_eq!(flattened, BlendMode::ALL.to_vec());
    }

    #[test]
    fn test_labels() {
        assert_eq!(BlendMode::ColorBurn.label(), "Color Burn");
        assert_eq!(BlendMode::SoftLight.label(), "Soft Light");
        assert_eq!(BlendMode::default().label(), "Normal");
    }

    #[test]
    fn test_from_index_falls_back_to_normal() {
        assert_eq!(BlendMode::from_index(2), BlendMode::Multiply);
        assert_eq!(BlendMode::from_index(99), BlendMode::Normal);
    }

    #[test]
    fn test_plus_uses_additive_compose() {
        let blend = BlendMode::Plus.to_peniko();
        assert_eq!(blend.compose, Compose::Plus);
        assert_eq!(BlendMode::Screen.to_peniko().mix, Mix::Screen);
    }
}
