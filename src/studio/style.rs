//! Style selection: three closed option sets and single-field updates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "3:4")]
    PhotoPortrait,
    #[serde(rename = "4:3")]
    PhotoLandscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        Self::Square,
        Self::Portrait,
        Self::Landscape,
        Self::PhotoPortrait,
        Self::PhotoLandscape,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
            Self::PhotoPortrait => "3:4",
            Self::PhotoLandscape => "4:3",
        }
    }
}

/// Lighting setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LightingStyle {
    #[default]
    #[serde(rename = "Studio Light")]
    Studio,
    #[serde(rename = "Natural Light")]
    Natural,
    #[serde(rename = "Dramatic, High-contrast")]
    Dramatic,
    #[serde(rename = "Cinematic, Moody")]
    Cinematic,
    #[serde(rename = "Soft, Diffused Light")]
    Soft,
    #[serde(rename = "Vibrant, Colorful")]
    Vibrant,
}

impl LightingStyle {
    pub const ALL: [LightingStyle; 6] = [
        Self::Studio,
        Self::Natural,
        Self::Dramatic,
        Self::Cinematic,
        Self::Soft,
        Self::Vibrant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Studio => "Studio Light",
            Self::Natural => "Natural Light",
            Self::Dramatic => "Dramatic, High-contrast",
            Self::Cinematic => "Cinematic, Moody",
            Self::Soft => "Soft, Diffused Light",
            Self::Vibrant => "Vibrant, Colorful",
        }
    }
}

/// Camera placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraPerspective {
    #[default]
    #[serde(rename = "Eye-level Shot")]
    EyeLevel,
    #[serde(rename = "High-angle Shot")]
    HighAngle,
    #[serde(rename = "Low-angle Shot")]
    LowAngle,
    #[serde(rename = "Macro, Close-up Shot")]
    CloseUp,
    #[serde(rename = "Dutch Angle Shot")]
    DutchAngle,
    #[serde(rename = "Top-down, Flat Lay")]
    TopDown,
}

impl CameraPerspective {
    pub const ALL: [CameraPerspective; 6] = [
        Self::EyeLevel,
        Self::HighAngle,
        Self::LowAngle,
        Self::CloseUp,
        Self::DutchAngle,
        Self::TopDown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EyeLevel => "Eye-level Shot",
            Self::HighAngle => "High-angle Shot",
            Self::LowAngle => "Low-angle Shot",
            Self::CloseUp => "Macro, Close-up Shot",
            Self::DutchAngle => "Dutch Angle Shot",
            Self::TopDown => "Top-down, Flat Lay",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(AspectRatio, LightingStyle, CameraPerspective);

/// The user's current style choices; every field always holds a valid option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSelection {
    pub aspect_ratio: AspectRatio,
    pub lighting_style: LightingStyle,
    pub camera_perspective: CameraPerspective,
}

/// A change to exactly one field of a [`StyleSelection`].
///
/// Over the wire: `{"field": "aspectRatio", "value": "16:9"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum StyleUpdate {
    AspectRatio(AspectRatio),
    LightingStyle(LightingStyle),
    CameraPerspective(CameraPerspective),
}

impl StyleSelection {
    /// Apply one update; returns whether the selection changed
    pub fn apply(&mut self, update: StyleUpdate) -> bool {
        let before = *self;
        match update {
            StyleUpdate::AspectRatio(value) => self.aspect_ratio = value,
            StyleUpdate::LightingStyle(value) => self.lighting_style = value,
            StyleUpdate::CameraPerspective(value) => self.camera_perspective = value,
        }
        before != *self
    }
}

/// Option lists served to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    pub aspect_ratio: Vec<AspectRatio>,
    pub lighting_style: Vec<LightingStyle>,
    pub camera_perspective: Vec<CameraPerspective>,
    pub defaults: StyleSelection,
}

impl StyleOptions {
    pub fn all() -> Self {
        Self {
            aspect_ratio: AspectRatio::ALL.to_vec(),
            lighting_style: LightingStyle::ALL.to_vec(),
            camera_perspective: CameraPerspective::ALL.to_vec(),
            defaults: StyleSelection::default(),
        }
    }
}
