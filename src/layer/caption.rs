//! The greeting along the bottom edge.

use super::{LayerEffect, RenderContext};
use crate::style::StyleParameters;
use crate::surface::{Shadow, opaque, translucent};
use crate::text::{TextFill, TextLabel};

pub const CAPTION_FONT_SIZE: f32 = 60.0;

/// Distance from the bottom edge to the caption's vertical centre.
pub const CAPTION_BOTTOM_MARGIN: f32 = 70.0;

/// Gold gradient fill, dark drop shadow and a coral outline drawn on top.
#[derive(Debug, Clone, Default)]
pub struct CaptionLayer;

impl CaptionLayer {
    /// Lays out `text` centred near the bottom of a `width x height` surface.
    pub fn label(text: &str, width: f32, height: f32) -> TextLabel {
        TextLabel::new(
            text,
            width / 2.0,
            height - CAPTION_BOTTOM_MARGIN,
            CAPTION_FONT_SIZE,
            TextFill::VerticalGradient {
                top: opaque(0xffd700),
                bottom: opaque(0xffed4e),
                y1: height - 100.0,
                y2: height - 40.0,
            },
        )
        .with_shadow(Shadow::offset(translucent(0x000000, 0.8), 10.0, 3.0, 3.0))
        .with_stroke(opaque(0xff6b6b), 3.0)
    }
}

impl LayerEffect for CaptionLayer {
    const NAME: &'static str = "caption";

    fn is_active(&self, params: &StyleParameters) -> bool {
        params.caption_enabled
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let Some(text) = ctx.params.resolved_caption() else {
            return;
        };
        let (width, height) = ctx.size();
        let label = Self::label(text, width, height);
        ctx.text.draw(ctx.surface, &label);
    }
}
