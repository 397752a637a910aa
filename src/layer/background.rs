//! Night-sky background: a diagonal gradient sprinkled with stars.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use resvg::tiny_skia::{LinearGradient, PathBuilder, Rect, SpreadMode, Transform};

use super::{LayerEffect, RenderContext};
use crate::surface::{opaque, pt, shaded, solid, stops, translucent};

/// Gradient stops from the top-left to the bottom-right corner.
pub const SKY_COLORS: [u32; 3] = [0x1a1a2e, 0x16213e, 0x0f3460];

/// Number of stars scattered on each render.
pub const DEFAULT_STAR_COUNT: usize = 50;

/// Stars are drawn with a radius in `[0, MAX_STAR_RADIUS)`.
pub const MAX_STAR_RADIUS: f32 = 2.0;

/// A single star dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Star field configuration.
///
/// Without a seed the stars move on every render. With a seed the same
/// stars are drawn every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarField {
    pub count: usize,
    pub seed: Option<u64>,
}

impl Default for StarField {
    fn default() -> Self {
        Self {
            count: DEFAULT_STAR_COUNT,
            seed: None,
        }
    }
}

impl StarField {
    /// A default-sized field that is identical on every render.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Scatters `count` stars over a `width x height` area.
    pub fn scatter(&self, width: f32, height: f32) -> Vec<Star> {
        let mut rng = match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        (0..self.count)
            .map(|_| Star {
                x: rng.random::<f32>() * width,
                y: rng.random::<f32>() * height,
                radius: rng.random::<f32>() * MAX_STAR_RADIUS,
            })
            .collect()
    }
}

/// Paints the sky. Always active.
#[derive(Debug, Clone, Default)]
pub struct BackgroundLayer {
    pub stars: StarField,
}

impl LayerEffect for BackgroundLayer {
    const NAME: &'static str = "background";

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let (width, height) = ctx.size();
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };

        let sky = LinearGradient::new(
            pt(0.0, 0.0),
            pt(width, height),
            stops(&[
                (0.0, opaque(SKY_COLORS[0])),
                (0.5, opaque(SKY_COLORS[1])),
                (1.0, opaque(SKY_COLORS[2])),
            ]),
            SpreadMode::Pad,
            Transform::identity(),
        );
        if let Some(sky) = sky {
            ctx.surface.fill_rect(rect, &shaded(sky));
        }

        let star_paint = solid(translucent(0xffffff, 0.8));
        for star in self.stars.scatter(width, height) {
            if let Some(dot) = PathBuilder::from_circle(star.x, star.y, star.radius) {
                ctx.surface.fill_path(&dot, &star_paint);
            }
        }
    }
}
