//! Avatar compositing session.

use image::RgbaImage;
use tracing::{debug_span, info, warn};

use crate::error::AvatarResult;
use crate::layer::{LayerPipeline, RenderContext, StarField};
use crate::profile::{CaptionSettings, StyleProfile};
use crate::source::SourceImage;
use crate::style::{DEFAULT_DECORATION_SCALE, DEFAULT_ROUNDNESS, MotifKind, StyleParameters};
use crate::surface::Surface;
use crate::text::TextRenderer;

/// Width and height of the output raster.
pub const SURFACE_SIZE: u32 = 800;

/// Suggested file name for exported avatars.
pub const DEFAULT_EXPORT_FILENAME: &str = "mid-autumn-avatar.png";

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`StyleProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &StyleProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> StyleProfile;
}

// ============================================================================
// AvatarSession
// ============================================================================

/// Holds one photo and the current style, and renders the composite.
///
/// Every call to [`render`](Self::render) clears the surface and redraws
/// everything from the photo and the style, so the output never depends on
/// earlier renders.
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use mooncake_avatar::{AvatarSession, MotifKind, SourceImage, StarField, TextRenderer};
///
/// let mut session = AvatarSession::with_text_renderer(TextRenderer::empty()).unwrap();
/// assert!(session.render().is_none());
///
/// let photo = RgbaImage::from_pixel(640, 480, Rgba([200, 120, 80, 255]));
/// session.set_source(SourceImage::new(photo));
/// session.set_motif(MotifKind::Lantern);
/// session.set_star_field(StarField::seeded(8));
///
/// let avatar = session.render().unwrap();
/// assert_eq!(avatar.dimensions(), (800, 800));
/// ```
pub struct AvatarSession {
    /// The uploaded photo, if any.
    source: Option<SourceImage>,

    params: StyleParameters,

    text: TextRenderer,

    surface: Surface,

    /// The render passes. Access layers directly to configure them.
    pub pipeline: LayerPipeline,
}

impl AvatarSession {
    /// Creates a session with default style, using system fonts for text.
    pub fn new() -> AvatarResult<Self> {
        Self::with_text_renderer(TextRenderer::new())
    }

    /// Creates a session with default style and the given font set.
    pub fn with_text_renderer(text: TextRenderer) -> AvatarResult<Self> {
        Ok(Self {
            source: None,
            params: StyleParameters::default(),
            text,
            surface: Surface::new(SURFACE_SIZE, SURFACE_SIZE)?,
            pipeline: LayerPipeline::default(),
        })
    }

    /// Returns the loaded photo, if any.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Replaces the photo.
    pub fn set_source(&mut self, source: SourceImage) {
        let size = source.dimensions();
        info!(width = size.width, height = size.height, "source image replaced");
        self.source = Some(source);
    }

    /// Decodes an uploaded file and makes it the photo.
    ///
    /// On error the previous photo is kept.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> AvatarResult<()> {
        let source = SourceImage::from_bytes(bytes)?;
        self.set_source(source);
        Ok(())
    }

    /// Returns the current style.
    pub fn params(&self) -> &StyleParameters {
        &self.params
    }

    /// Replaces the whole style.
    pub fn set_params(&mut self, params: StyleParameters) {
        self.params = params;
    }

    pub fn set_motif(&mut self, motif: MotifKind) {
        self.params.motif = motif;
    }

    /// Sets the portrait roundness, clamped to 0-100.
    pub fn set_roundness(&mut self, roundness: f32) {
        self.params = std::mem::take(&mut self.params).with_roundness(roundness);
    }

    /// Sets the decoration scale in percent, clamped to 0-400.
    pub fn set_decoration_scale(&mut self, scale: f32) {
        self.params = std::mem::take(&mut self.params).with_decoration_scale(scale);
    }

    pub fn set_caption(&mut self, enabled: bool, text: impl Into<String>) {
        self.params.caption_enabled = enabled;
        self.params.caption_text = text.into();
    }

    pub fn set_star_field(&mut self, stars: StarField) {
        self.pipeline.background.stars = stars;
    }

    /// Font database used for captions and glyphs.
    pub fn text_renderer_mut(&mut self) -> &mut TextRenderer {
        &mut self.text
    }

    /// Drops the photo and restores the default style.
    ///
    /// The star field and fonts are kept.
    pub fn reset(&mut self) {
        info!("session reset");
        self.source = None;
        self.params = StyleParameters::default();
        self.surface.clear();
    }

    /// Renders the composite.
    ///
    /// Returns `None` without drawing anything if no photo is loaded.
    pub fn render(&mut self) -> Option<RgbaImage> {
        self.draw().then(|| self.surface.to_rgba_image())
    }

    /// Renders the composite and encodes it as PNG.
    ///
    /// Returns `Ok(None)` if no photo is loaded.
    pub fn export_png(&mut self) -> AvatarResult<Option<Vec<u8>>> {
        if !self.draw() {
            return Ok(None);
        }
        self.surface.encode_png().map(Some)
    }

    fn draw(&mut self) -> bool {
        let Some(source) = self.source.as_ref() else {
            warn!("render requested before a photo was loaded");
            return false;
        };
        let _span = debug_span!(
            "render",
            motif = %self.params.motif,
            roundness = self.params.roundness,
            scale = self.params.decoration_scale,
            caption = self.params.caption_enabled,
        )
        .entered();

        self.surface.clear();
        let mut ctx = RenderContext {
            surface: &mut self.surface,
            source,
            params: &self.params,
            text: &self.text,
        };
        self.pipeline.render(&mut ctx);
        true
    }
}

impl Configurable for AvatarSession {
    /// Applies a profile's settings to this session.
    ///
    /// Fields missing from the profile are reset to their defaults. A
    /// missing star field keeps the current one.
    fn apply_profile(&mut self, profile: &StyleProfile) {
        let defaults = StyleParameters::default();
        let caption = profile.caption.clone().unwrap_or_else(|| CaptionSettings {
            enabled: defaults.caption_enabled,
            text: defaults.caption_text.clone(),
        });

        self.params = defaults
            .with_motif(profile.motif.unwrap_or_default())
            .with_roundness(profile.roundness.unwrap_or(DEFAULT_ROUNDNESS))
            .with_decoration_scale(profile.decoration_scale.unwrap_or(DEFAULT_DECORATION_SCALE))
            .with_caption(caption.enabled, caption.text);

        if let Some(settings) = profile.star_field {
            self.pipeline.background.stars = settings.into();
        }
    }

    /// Exports the current style as a profile with every field set.
    fn export_profile(&self) -> StyleProfile {
        StyleProfile {
            motif: Some(self.params.motif),
            roundness: Some(self.params.roundness),
            decoration_scale: Some(self.params.decoration_scale),
            caption: Some(CaptionSettings {
                enabled: self.params.caption_enabled,
                text: self.params.caption_text.clone(),
            }),
            star_field: Some(self.pipeline.background.stars.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
