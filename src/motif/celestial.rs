//! The full moon, with its pair of clouds.

use resvg::tiny_skia::{PathBuilder, RadialGradient, SpreadMode, Transform};

use super::cloud::{LARGE_CLOUD, SMALL_CLOUD, draw_cloud};
use super::instance;
use crate::geometry::Point;
use crate::surface::{Shadow, Surface, opaque, pt, shaded, solid, stops, translucent};
use crate::text::TextRenderer;

/// Moon radius at scale 1.
pub const MOON_RADIUS: f32 = 120.0;

/// Crater offsets and radii relative to the moon's centre, at scale 1.
const CRATERS: [(f32, f32, f32); 3] = [(-20.0, -20.0, 15.0), (25.0, 15.0, 20.0), (10.0, 30.0, 12.0)];

/// Anchors: the moon (top right), then the large and small clouds.
pub fn anchors(width: f32, height: f32, scale: f32) -> Vec<Point> {
    vec![
        Point::new(width - 150.0 * scale, 100.0 * scale),
        Point::new(150.0 * scale, height - 150.0 * scale),
        Point::new(width - 200.0 * scale, height - 100.0 * scale),
    ]
}

/// Draws the moon at the first anchor and the two clouds at the others.
pub fn draw_family(surface: &mut Surface, _text: &TextRenderer, anchors: &[Point], scale: f32) {
    let [moon, large, small] = anchors else {
        return;
    };
    draw_moon(surface, *moon, scale);
    draw_cloud(surface, *large, LARGE_CLOUD, scale);
    draw_cloud(surface, *small, SMALL_CLOUD, scale);
}

/// A glowing gradient disc with three translucent craters.
pub fn draw_moon(surface: &mut Surface, anchor: Point, scale: f32) {
    instance(surface, anchor, scale, |s| {
        let Some(disc) = PathBuilder::from_circle(0.0, 0.0, MOON_RADIUS) else {
            return;
        };
        let Some(shader) = RadialGradient::new(
            pt(0.0, 0.0),
            pt(0.0, 0.0),
            MOON_RADIUS,
            stops(&[(0.0, opaque(0xfff9e6)), (1.0, opaque(0xffd700))]),
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let glow = Shadow::glow(translucent(0xffd700, 0.6), 30.0);
        s.fill_path_with_shadow(&disc, &shaded(shader), &glow);

        let mut pb = PathBuilder::new();
        for (x, y, r) in CRATERS {
            pb.push_circle(x, y, r);
        }
        if let Some(craters) = pb.finish() {
            s.fill_path(&craters, &solid(translucent(0xffc800, 0.3)));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::test_support::*;

    #[test]
    fn moon_is_bright_at_its_centre() {
        let mut surface = blank();
        draw_moon(&mut surface, Point::new(400.0, 400.0), 1.0);
        let px = rgba_at(&surface, 400.0, 400.0);
        assert_eq!(px[3], 255);
        assert!(px[0] > 240 && px[1] > 230, "centre should be pale: {px:?}");
    }

    #[test]
    fn craters_darken_the_surface() {
        let mut surface = blank();
        draw_moon(&mut surface, Point::new(400.0, 400.0), 1.0);
        // Centre of the largest crater versus a crater-free point at the
        // same distance from the moon's centre.
        let crater = rgba_at(&surface, 425.0, 415.0);
        let plain = rgba_at(&surface, 375.0, 415.0);
        assert!(crater[2] < plain[2], "crater {crater:?} vs plain {plain:?}");
    }

    #[test]
    fn glow_extends_past_the_rim() {
        let mut surface = blank();
        draw_moon(&mut surface, Point::new(400.0, 400.0), 1.0);
        assert!(rgba_at(&surface, 400.0 + MOON_RADIUS + 8.0, 400.0)[3] > 0);
    }

    #[test]
    fn family_includes_clouds() {
        let mut surface = blank();
        let points = anchors(800.0, 800.0, 1.0);
        draw_family(&mut surface, &TextRenderer::empty(), &points, 1.0);
        let large_cloud = points[1];
        assert!(rgba_at(&surface, large_cloud.x, large_cloud.y - 20.0)[3] > 0);
        // Bottom left corner beyond the large cloud stays empty.
        assert_eq!(rgba_at(&surface, 5.0, 795.0)[3], 0);
    }
}
