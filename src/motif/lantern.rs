//! The red paper lantern motif.

use resvg::tiny_skia::{LinearGradient, Path, PathBuilder, Rect, SpreadMode, Transform};

use super::instance;
use crate::geometry::Point;
use crate::surface::{Shadow, Surface, opaque, pt, shaded, solid, stops, stroke, translucent};
use crate::text::TextRenderer;

/// Half-height of the lantern body at scale 1.
pub const LANTERN_SIZE: f32 = 50.0;

const CAP_COLOR: u32 = 0x8b0000;
const TRIM_COLOR: u32 = 0xffd700;
const TASSEL_COUNT: usize = 5;

/// Both top corners.
pub fn anchors(width: f32, _height: f32, scale: f32) -> Vec<Point> {
    vec![
        Point::new(150.0 * scale, 100.0 * scale),
        Point::new(width - 150.0 * scale, 100.0 * scale),
    ]
}

pub fn draw_family(surface: &mut Surface, _text: &TextRenderer, anchors: &[Point], scale: f32) {
    for &anchor in anchors {
        draw_lantern(surface, anchor, scale);
    }
}

/// Vertical positions (as fractions of the body half-height) and half-widths
/// of the horizontal straps.
///
/// Straps sit at `t = -0.6, -0.2, 0.2`; each spans `cos(asin(t)) * 0.8 *
/// size` either side of the axis so it hugs the body's curve.
pub fn strap_layout(size: f32) -> Vec<(f32, f32)> {
    (0..3)
        .map(|i| {
            let t = -0.6 + 0.4 * i as f32;
            (t * size, t.asin().cos() * size * 0.8)
        })
        .collect()
}

/// Horizontal offsets of the tassels, centred under the bottom cap.
pub fn tassel_offsets(size: f32) -> Vec<f32> {
    (0..TASSEL_COUNT)
        .map(|i| (i as f32 - 2.0) * size * 0.15)
        .collect()
}

/// Caps, a glowing bulging body, gold straps and five tassels.
pub fn draw_lantern(surface: &mut Surface, anchor: Point, scale: f32) {
    let size = LANTERN_SIZE;
    instance(surface, anchor, scale, |s| {
        let cap = solid(opaque(CAP_COLOR));
        let trim = solid(opaque(TRIM_COLOR));

        if let Some(top) = end_cap(-size * 1.2, size) {
            s.fill_path(&top, &cap);
        }

        let mut pb = PathBuilder::new();
        pb.move_to(0.0, -size);
        pb.cubic_to(-size * 0.8, -size * 0.5, -size * 0.8, size * 0.5, 0.0, size);
        pb.cubic_to(size * 0.8, size * 0.5, size * 0.8, -size * 0.5, 0.0, -size);
        pb.close();
        let body_shader = LinearGradient::new(
            pt(-size, 0.0),
            pt(size, 0.0),
            stops(&[
                (0.0, opaque(0xff0000)),
                (0.5, opaque(0xff6666)),
                (1.0, opaque(0xff0000)),
            ]),
            SpreadMode::Pad,
            Transform::identity(),
        );
        if let (Some(body), Some(shader)) = (pb.finish(), body_shader) {
            let glow = Shadow::glow(translucent(0xff0000, 0.6), 20.0);
            s.fill_path_with_shadow(&body, &shaded(shader), &glow);
        }

        let mut pb = PathBuilder::new();
        for (y, half_width) in strap_layout(size) {
            pb.move_to(-half_width, y);
            pb.line_to(half_width, y);
        }
        if let Some(straps) = pb.finish() {
            s.stroke_path(&straps, &trim, &stroke(2.0));
        }

        if let Some(bottom) = end_cap(size * 1.2, size) {
            s.fill_path(&bottom, &cap);
        }

        for x in tassel_offsets(size) {
            let mut pb = PathBuilder::new();
            pb.move_to(x, size * 1.35);
            pb.line_to(x, size * 1.8);
            if let Some(cord) = pb.finish() {
                s.stroke_path(&cord, &trim, &stroke(3.0));
            }
            if let Some(bead) = PathBuilder::from_circle(x, size * 1.85, size * 0.1) {
                s.fill_path(&bead, &cap);
            }
        }
    });
}

/// A flat ellipse centred on `(0, y)`.
fn end_cap(y: f32, size: f32) -> Option<Path> {
    let rect = Rect::from_xywh(-size * 0.3, y - size * 0.15, size * 0.6, size * 0.3)?;
    PathBuilder::from_oval(rect)
}
