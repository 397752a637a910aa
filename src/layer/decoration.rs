//! The selected motif family.

use super::{LayerEffect, RenderContext};
use crate::motif::draw_motif;
use crate::style::{MotifKind, StyleParameters};

#[derive(Debug, Clone, Default)]
pub struct DecorationLayer;

impl LayerEffect for DecorationLayer {
    const NAME: &'static str = "decoration";

    fn is_active(&self, params: &StyleParameters) -> bool {
        params.motif != MotifKind::None
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        draw_motif(
            ctx.params.motif,
            ctx.surface,
            ctx.text,
            ctx.params.motif_scale(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::test_support::photo;
    use crate::motif::lantern;
    use crate::motif::test_support::{blank, is_blank, rgba_at};
    use crate::text::TextRenderer;

    #[test]
    fn draws_the_selected_family_at_its_scale() {
        let mut surface = blank();
        let source = photo(1, 1, [0, 0, 0, 255]);
        let params = StyleParameters::new()
            .with_motif(MotifKind::Lantern)
            .with_decoration_scale(50.0);
        let text = TextRenderer::empty();
        DecorationLayer.draw(&mut RenderContext {
            surface: &mut surface,
            source: &source,
            params: &params,
            text: &text,
        });

        for anchor in lantern::anchors(800.0, 800.0, 0.5) {
            assert!(rgba_at(&surface, anchor.x, anchor.y)[3] > 0);
        }
        // The full-size anchor is empty at half scale.
        assert_eq!(rgba_at(&surface, 150.0, 100.0)[3], 0);
    }

    #[test]
    fn zero_scale_leaves_the_surface_untouched() {
        let mut surface = blank();
        let source = photo(1, 1, [0, 0, 0, 255]);
        let params = StyleParameters::new().with_decoration_scale(0.0);
        let text = TextRenderer::empty();
        DecorationLayer.draw(&mut RenderContext {
            surface: &mut surface,
            source: &source,
            params: &params,
            text: &text,
        });
        assert!(is_blank(&surface));
    }
}
