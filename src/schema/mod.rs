use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod validate;

pub use validate::{sanitize, validate, ValidationError};

/// Fixed semantic categories a color token may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    Error,
    Surface,
    Background,
    Custom,
}

impl ColorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Neutral => "neutral",
            Self::Error => "error",
            Self::Surface => "surface",
            Self::Background => "background",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ColorCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowOffset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationToken {
    pub shadow_color: String,
    pub shadow_offset: ShadowOffset,
    pub shadow_radius: f64,
    pub shadow_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionToken {
    pub duration: f64,
    pub easing: String,
}

/// The canonical token set every extractor produces and every generator
/// consumes. Collections keep insertion order; an all-empty set is invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, ColorToken>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub typography: IndexMap<String, TypographyToken>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub spacing: IndexMap<String, f64>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub radii: IndexMap<String, f64>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub elevation: IndexMap<String, ElevationToken>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub motion: IndexMap<String, MotionToken>,
}

impl TokenSet {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.typography.is_empty()
            && self.spacing.is_empty()
            && self.radii.is_empty()
            && self.elevation.is_empty()
            && self.motion.is_empty()
    }
}
