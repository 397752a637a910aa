//! The clipped photo and its gold frame.

use resvg::tiny_skia::Rect;

use super::{LayerEffect, RenderContext};
use crate::fit::fit_cover;
use crate::geometry::{ClipShape, Point};
use crate::surface::{Shadow, opaque, solid, stroke, translucent};

/// Portrait radius as a fraction of the surface size.
pub const PORTRAIT_RADIUS_RATIO: f32 = 0.35;

pub const BORDER_COLOR: u32 = 0xffd700;
pub const BORDER_WIDTH: f32 = 6.0;

/// Draws the photo inside the clip shape, then strokes the same outline.
///
/// Border width and glow do not follow the decoration scale.
#[derive(Debug, Clone, Default)]
pub struct PortraitLayer;

impl PortraitLayer {
    /// The clip shape for a `width x height` surface at `roundness`.
    pub fn clip_shape(width: f32, height: f32, roundness: f32) -> ClipShape {
        let radius = PORTRAIT_RADIUS_RATIO * width.min(height);
        ClipShape::for_roundness(Point::new(width / 2.0, height / 2.0), radius, roundness)
    }
}

impl LayerEffect for PortraitLayer {
    const NAME: &'static str = "portrait";

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let (width, height) = ctx.size();
        let radius = PORTRAIT_RADIUS_RATIO * width.min(height);
        let shape = Self::clip_shape(width, height, ctx.params.roundness);
        let Some(outline) = shape.to_path() else {
            return;
        };

        if let Some(photo) = ctx.source.to_pixmap() {
            let center = shape.center();
            let fit = fit_cover(photo.width(), photo.height(), radius * 2.0);
            let dest = Rect::from_xywh(
                center.x - radius + fit.offset_x,
                center.y - radius + fit.offset_y,
                fit.draw_width,
                fit.draw_height,
            );
            if let Some(dest) = dest {
                ctx.surface.draw_image_clipped(&photo, dest, &outline);
            }
        }

        let glow = Shadow::glow(translucent(BORDER_COLOR, 0.5), 15.0);
        ctx.surface.stroke_path_with_shadow(
            &outline,
            &solid(opaque(BORDER_COLOR)),
            &stroke(BORDER_WIDTH),
            &glow,
        );
    }
}
