//! Serializable style profile for exchanging settings between processes.
//!
//! A [`StyleProfile`] captures the whole style state in a format that can be
//! written to JSON by a front end and applied by the renderer.
//!
//! # Example
//!
//! ```
//! use mooncake_avatar::{CaptionSettings, MotifKind, StyleProfile};
//!
//! let profile = StyleProfile::new()
//!     .with_motif(MotifKind::Lantern)
//!     .with_roundness(20.0)
//!     .with_caption(CaptionSettings { enabled: true, text: "Reunion".into() });
//!
//! let json = profile.to_json().unwrap();
//! let restored = StyleProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::layer::StarField;
use crate::layer::background::DEFAULT_STAR_COUNT;
use crate::style::MotifKind;

// ============================================================================
// Settings (Serializable)
// ============================================================================

/// Serializable caption settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CaptionSettings {
    /// Whether the caption is drawn.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Caption text. Empty means the default greeting.
    #[serde(default)]
    pub text: String,
}

/// Serializable star field settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StarFieldSettings {
    #[serde(default = "default_star_count")]
    pub count: usize,

    /// Fixed RNG seed. Omit to scatter new stars on every render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for StarFieldSettings {
    fn default() -> Self {
        StarField::default().into()
    }
}

impl From<StarField> for StarFieldSettings {
    fn from(field: StarField) -> Self {
        Self {
            count: field.count,
            seed: field.seed,
        }
    }
}

impl From<StarFieldSettings> for StarField {
    fn from(settings: StarFieldSettings) -> Self {
        Self {
            count: settings.count,
            seed: settings.seed,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_star_count() -> usize {
    DEFAULT_STAR_COUNT
}

// ============================================================================
// StyleProfile
// ============================================================================

/// A serializable profile containing every style setting.
///
/// Missing fields fall back to the defaults when applied.
///
/// # JSON Format
///
/// ```json
/// {
///   "motif": "festive-cake",
///   "roundness": 30.0,
///   "decorationScale": 120.0,
///   "caption": { "enabled": true, "text": "Happy Mid-Autumn" },
///   "starField": { "count": 50, "seed": 7 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StyleProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motif: Option<MotifKind>,

    /// Portrait roundness, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roundness: Option<f32>,

    /// Motif scale in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_scale: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<CaptionSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_field: Option<StarFieldSettings>,
}

impl StyleProfile {
    /// Creates an empty profile; applying it restores the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_motif(mut self, motif: MotifKind) -> Self {
        self.motif = Some(motif);
        self
    }

    pub fn with_roundness(mut self, roundness: f32) -> Self {
        self.roundness = Some(roundness);
        self
    }

    pub fn with_decoration_scale(mut self, scale: f32) -> Self {
        self.decoration_scale = Some(scale);
        self
    }

    pub fn with_caption(mut self, settings: CaptionSettings) -> Self {
        self.caption = Some(settings);
        self
    }

    pub fn with_star_field(mut self, settings: StarFieldSettings) -> Self {
        self.star_field = Some(settings);
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
