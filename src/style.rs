//! The flat style state read by the compositor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caption drawn when the caption is enabled but its text is empty.
pub const DEFAULT_CAPTION: &str = "Happy Mid-Autumn";

/// Roundness applied on startup and after a reset.
pub const DEFAULT_ROUNDNESS: f32 = 50.0;

/// Decoration scale (percent) applied on startup and after a reset.
pub const DEFAULT_DECORATION_SCALE: f32 = 100.0;

/// Upper bound for the decoration scale slider.
pub const MAX_DECORATION_SCALE: f32 = 400.0;

/// The decorative motif family drawn around the portrait.
///
/// Exactly one family (or none) renders per composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum MotifKind {
    None,
    /// Glowing moon with craters, paired with two cloud puffs.
    #[default]
    Celestial,
    /// Two rabbits at opposite corners.
    SmallAnimal,
    /// Two mooncakes at opposite corners.
    FestiveCake,
    /// Two paper lanterns along the top edge.
    Lantern,
}

impl MotifKind {
    /// Every family, in menu order.
    pub const ALL: [MotifKind; 5] = [
        MotifKind::None,
        MotifKind::Celestial,
        MotifKind::SmallAnimal,
        MotifKind::FestiveCake,
        MotifKind::Lantern,
    ];

    /// Stable kebab-case identifier, shared with profiles and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            MotifKind::None => "none",
            MotifKind::Celestial => "celestial",
            MotifKind::SmallAnimal => "small-animal",
            MotifKind::FestiveCake => "festive-cake",
            MotifKind::Lantern => "lantern",
        }
    }
}

impl fmt::Display for MotifKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown motif name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown motif `{0}`")]
pub struct UnknownMotif(pub String);

impl FromStr for MotifKind {
    type Err = UnknownMotif;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Aliases are the front-end button ids.
        match s {
            "none" => Ok(MotifKind::None),
            "celestial" | "moon" => Ok(MotifKind::Celestial),
            "small-animal" | "rabbit" => Ok(MotifKind::SmallAnimal),
            "festive-cake" | "mooncake" => Ok(MotifKind::FestiveCake),
            "lantern" => Ok(MotifKind::Lantern),
            other => Err(UnknownMotif(other.to_string())),
        }
    }
}

/// Every knob the user can turn.
///
/// Values are expected to be pre-clamped by their input widgets; the
/// `with_*` builders clamp as well so that programmatic callers get the same
/// guarantees.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParameters {
    pub motif: MotifKind,

    /// 0-100. At 45 and above the portrait is a circle.
    pub roundness: f32,

    /// Motif scale in percent. 100 draws the motifs at their design size.
    pub decoration_scale: f32,

    pub caption_enabled: bool,

    /// Free text; empty falls back to [`DEFAULT_CAPTION`].
    pub caption_text: String,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            motif: MotifKind::default(),
            roundness: DEFAULT_ROUNDNESS,
            decoration_scale: DEFAULT_DECORATION_SCALE,
            caption_enabled: true,
            caption_text: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl StyleParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_motif(mut self, motif: MotifKind) -> Self {
        self.motif = motif;
        self
    }

    /// Sets the roundness, clamped to 0-100.
    pub fn with_roundness(mut self, roundness: f32) -> Self {
        self.roundness = clamp_finite(roundness, 0.0, 100.0, DEFAULT_ROUNDNESS);
        self
    }

    /// Sets the decoration scale, clamped to 0-[`MAX_DECORATION_SCALE`].
    pub fn with_decoration_scale(mut self, scale: f32) -> Self {
        self.decoration_scale =
            clamp_finite(scale, 0.0, MAX_DECORATION_SCALE, DEFAULT_DECORATION_SCALE);
        self
    }

    pub fn with_caption(mut self, enabled: bool, text: impl Into<String>) -> Self {
        self.caption_enabled = enabled;
        self.caption_text = text.into();
        self
    }

    /// The multiplier handed to motif drawers (`decoration_scale / 100`).
    pub fn motif_scale(&self) -> f32 {
        self.decoration_scale / 100.0
    }

    /// The text actually drawn, or `None` if the caption is disabled.
    ///
    /// Only empty text falls back to [`DEFAULT_CAPTION`]; anything else,
    /// whitespace included, is drawn as given.
    pub fn resolved_caption(&self) -> Option<&str> {
        if !self.caption_enabled {
            return None;
        }
        if self.caption_text.is_empty() {
            Some(DEFAULT_CAPTION)
        } else {
            Some(self.caption_text.as_str())
        }
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
