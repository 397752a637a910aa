//! Render passes for the avatar compositor.
//!
//! A composite is built by running a fixed sequence of layers over a shared
//! [`RenderContext`]:
//!
//! ```text
//! cleared surface
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── gradient + star field
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │  Portrait  │ ◄── clipped photo + gold border
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │ Decoration │ ◄── selected motif family (skipped for `None`)
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │  Caption   │ ◄── skipped when the caption is disabled
//! └────────────┘
//! ```
//!
//! Each layer implements [`LayerEffect`]: it decides from the style whether
//! it takes part in this render and then draws onto the surface.

pub mod background;
pub mod caption;
pub mod decoration;
pub mod portrait;

pub use background::{BackgroundLayer, Star, StarField};
pub use caption::CaptionLayer;
pub use decoration::DecorationLayer;
pub use portrait::PortraitLayer;

use tracing::trace;

use crate::source::SourceImage;
use crate::style::StyleParameters;
use crate::surface::Surface;
use crate::text::TextRenderer;

// ============================================================================
// Render Context
// ============================================================================

/// Everything a layer may read or draw into during one render.
pub struct RenderContext<'a> {
    /// The output surface, already cleared.
    pub surface: &'a mut Surface,

    /// The loaded photo.
    pub source: &'a SourceImage,

    /// Style state for this render. Read-only.
    pub params: &'a StyleParameters,

    /// Font database used for captions and glyphs.
    pub text: &'a TextRenderer,
}

impl RenderContext<'_> {
    /// Width and height of the surface in drawing units.
    pub fn size(&self) -> (f32, f32) {
        (self.surface.width() as f32, self.surface.height() as f32)
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A single self-contained render pass.
pub trait LayerEffect {
    /// Short name used in trace output.
    const NAME: &'static str;

    /// Returns false if this layer sits out the current render.
    fn is_active(&self, _params: &StyleParameters) -> bool {
        true
    }

    /// Draws the layer. Must leave the surface's transform stack as it
    /// found it.
    fn draw(&self, ctx: &mut RenderContext<'_>);
}

fn apply<L: LayerEffect>(layer: &L, ctx: &mut RenderContext<'_>) {
    if !layer.is_active(ctx.params) {
        trace!(layer = L::NAME, "layer inactive");
        return;
    }
    trace!(layer = L::NAME, "drawing layer");
    layer.draw(ctx);
    debug_assert_eq!(ctx.surface.depth(), 0, "{} leaked a transform", L::NAME);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The ordered set of layers that make up a composite.
#[derive(Debug, Clone, Default)]
pub struct LayerPipeline {
    pub background: BackgroundLayer,
    pub portrait: PortraitLayer,
    pub decoration: DecorationLayer,
    pub caption: CaptionLayer,
}

impl LayerPipeline {
    /// Runs every active layer, back to front.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        apply(&self.background, ctx);
        apply(&self.portrait, ctx);
        apply(&self.decoration, ctx);
        apply(&self.caption, ctx);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{Rgba, RgbaImage};

    use crate::source::SourceImage;

    /// A flat-colored photo.
    pub fn photo(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::photo;
    use super::*;
    use crate::motif::test_support::{blank, rgba_at};
    use crate::style::MotifKind;

    fn starless() -> LayerPipeline {
        LayerPipeline {
            background: BackgroundLayer {
                stars: StarField {
                    count: 0,
                    seed: Some(1),
                },
            },
            ..LayerPipeline::default()
        }
    }

    #[test]
    fn pipeline_paints_back_to_front() {
        let mut surface = blank();
        let source = photo(10, 10, [0, 0, 255, 255]);
        let params = StyleParameters::new().with_motif(MotifKind::None);
        let text = TextRenderer::empty();
        let mut ctx = RenderContext {
            surface: &mut surface,
            source: &source,
            params: &params,
            text: &text,
        };
        starless().render(&mut ctx);

        // Photo on top of the background in the middle, background at the edge.
        let centre = rgba_at(&surface, 400.0, 400.0);
        assert!(centre[2] > 250 && centre[0] < 5 && centre[3] == 255, "{centre:?}");
        let corner = rgba_at(&surface, 2.0, 2.0);
        assert_eq!(corner[3], 255);
        assert!(corner[2] < 0x40, "corner should be the dark background: {corner:?}");
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn inactive_layers_are_skipped() {
        let params = StyleParameters::new()
            .with_motif(MotifKind::None)
            .with_caption(false, "");
        let pipeline = LayerPipeline::default();
        assert!(pipeline.background.is_active(&params));
        assert!(pipeline.portrait.is_active(&params));
        assert!(!pipeline.decoration.is_active(&params));
        assert!(!pipeline.caption.is_active(&params));
    }
}
