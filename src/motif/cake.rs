//! The mooncake motif.

use std::f32::consts::{FRAC_PI_8, TAU};

use resvg::tiny_skia::{LineCap, PathBuilder, RadialGradient, SpreadMode, Transform};

use super::instance;
use crate::geometry::Point;
use crate::surface::{
    Shadow, Surface, opaque, pt, ring_stops, shaded, solid, stops, stroke, translucent,
};
use crate::text::{TextFill, TextLabel, TextRenderer};

/// Radius of a mooncake at scale 1.
pub const CAKE_RADIUS: f32 = 70.0;

/// The character stamped in the middle of each cake ("fortune").
pub const CAKE_GLYPH: &str = "福";

const PATTERN_COLOR: u32 = 0x5a3a1a;

/// Bottom-left and top-right corners.
pub fn anchors(width: f32, height: f32, scale: f32) -> Vec<Point> {
    vec![
        Point::new(120.0 * scale, height - 130.0 * scale),
        Point::new(width - 120.0 * scale, 130.0 * scale),
    ]
}

pub fn draw_family(surface: &mut Surface, text: &TextRenderer, anchors: &[Point], scale: f32) {
    for &anchor in anchors {
        draw_mooncake(surface, text, anchor, scale);
    }
}

/// Endpoints of `count` radial segments running from radius `inner` to
/// `outer`, the first at angle `phase` and the rest evenly spaced.
pub fn radial_segments(count: usize, phase: f32, inner: f32, outer: f32) -> Vec<(Point, Point)> {
    let step = TAU / count as f32;
    (0..count)
        .map(|i| {
            let angle = phase + step * i as f32;
            let (sin, cos) = angle.sin_cos();
            (
                Point::new(cos * inner, sin * inner),
                Point::new(cos * outer, sin * outer),
            )
        })
        .collect()
}

/// A baked disc with a highlight, embossed rings, spokes, ticks and a
/// central glyph.
pub fn draw_mooncake(surface: &mut Surface, text: &TextRenderer, anchor: Point, scale: f32) {
    let size = CAKE_RADIUS;
    instance(surface, anchor, scale, |s| {
        let Some(disc) = PathBuilder::from_circle(0.0, 0.0, size) else {
            return;
        };

        // Crust: highlight above centre fading to a dark rim. The highlight
        // stays flat out to 0.2 * size.
        let crust = RadialGradient::new(
            pt(0.0, -size * 0.3),
            pt(0.0, 0.0),
            size * 1.1,
            ring_stops(size * 0.2, size * 1.1, &[
                (0.0, opaque(0xf4d03f)),
                (0.3, opaque(0xdaa520)),
                (0.6, opaque(0xcd853f)),
                (0.85, opaque(0xa0642a)),
                (1.0, opaque(0x704214)),
            ]),
            SpreadMode::Pad,
            Transform::identity(),
        );
        if let Some(crust) = crust {
            let shadow = Shadow::offset(translucent(0x000000, 0.5), 20.0, 5.0, 5.0);
            s.fill_path_with_shadow(&disc, &shaded(crust), &shadow);
        }

        let sheen = RadialGradient::new(
            pt(0.0, -size * 0.4),
            pt(0.0, 0.0),
            size * 0.6,
            stops(&[
                (0.0, translucent(0xffebb4, 0.6)),
                (1.0, translucent(0xffebb4, 0.0)),
            ]),
            SpreadMode::Pad,
            Transform::identity(),
        );
        if let Some(sheen) = sheen {
            s.fill_path(&disc, &shaded(sheen));
        }

        let pattern = solid(opaque(PATTERN_COLOR));
        for (radius, width) in [(0.7, 3.5), (0.5, 2.5)] {
            if let Some(ring) = PathBuilder::from_circle(0.0, 0.0, size * radius) {
                s.stroke_path(&ring, &pattern, &stroke(width));
            }
        }

        for (phase, inner, outer, width) in [(0.0, 0.3, 0.68, 3.0), (FRAC_PI_8, 0.15, 0.28, 2.0)] {
            let mut pb = PathBuilder::new();
            for (a, b) in radial_segments(8, phase, size * inner, size * outer) {
                pb.move_to(a.x, a.y);
                pb.line_to(b.x, b.y);
            }
            if let Some(lines) = pb.finish() {
                let mut line = stroke(width);
                line.line_cap = LineCap::Butt;
                s.stroke_path(&lines, &pattern, &line);
            }
        }

        let glyph = TextLabel::new(
            CAKE_GLYPH,
            0.0,
            0.0,
            size * 0.38,
            TextFill::VerticalGradient {
                top: opaque(0x8b4513),
                bottom: opaque(0x4a2511),
                y1: -size * 0.2,
                y2: size * 0.2,
            },
        )
        .with_shadow(Shadow::offset(translucent(0x000000, 0.3), 3.0, 1.0, 1.0));
        text.draw(s, &glyph);
    });
}
