//! The rabbit motif.

use resvg::tiny_skia::{LineCap, Path, PathBuilder, Rect, Transform};

use super::instance;
use crate::geometry::Point;
use crate::surface::{Shadow, Surface, opaque, solid, stroke, translucent};
use crate::text::TextRenderer;

/// Reference size of a rabbit at scale 1.
pub const RABBIT_SIZE: f32 = 60.0;

/// Ear tilt away from vertical, in radians.
const EAR_TILT: f32 = 0.3;

/// Top-left and bottom-right corners.
pub fn anchors(width: f32, height: f32, scale: f32) -> Vec<Point> {
    vec![
        Point::new(100.0 * scale, 120.0 * scale),
        Point::new(width - 100.0 * scale, height - 120.0 * scale),
    ]
}

pub fn draw_family(surface: &mut Surface, _text: &TextRenderer, anchors: &[Point], scale: f32) {
    for &anchor in anchors {
        draw_rabbit(surface, anchor, scale);
    }
}

/// Head, ears with pink insides, eyes, nose and a small forked mouth.
pub fn draw_rabbit(surface: &mut Surface, anchor: Point, scale: f32) {
    let size = RABBIT_SIZE;
    instance(surface, anchor, scale, |s| {
        let shadow = Shadow::glow(translucent(0x000000, 0.3), 10.0);
        let white = solid(opaque(0xffffff));
        let pink = solid(opaque(0xffb6c1));
        let black = solid(opaque(0x000000));

        if let Some(head) = PathBuilder::from_circle(0.0, 0.0, size * 0.6) {
            s.fill_path_with_shadow(&head, &white, &shadow);
        }

        let ears = ellipse_pair(
            Point::new(size * 0.3, -size * 0.6),
            size * 0.2,
            size * 0.5,
        );
        if let Some(ears) = ears {
            s.fill_path_with_shadow(&ears, &white, &shadow);
        }

        let inner = ellipse_pair(
            Point::new(size * 0.3, -size * 0.5),
            size * 0.1,
            size * 0.3,
        );
        if let Some(inner) = inner {
            s.fill_path_with_shadow(&inner, &pink, &shadow);
        }

        let mut pb = PathBuilder::new();
        pb.push_circle(-size * 0.2, -size * 0.1, size * 0.08);
        pb.push_circle(size * 0.2, -size * 0.1, size * 0.08);
        if let Some(eyes) = pb.finish() {
            s.fill_path(&eyes, &black);
        }

        if let Some(nose) = PathBuilder::from_circle(0.0, size * 0.1, size * 0.08) {
            s.fill_path(&nose, &pink);
        }

        let mut pb = PathBuilder::new();
        pb.move_to(0.0, size * 0.1);
        pb.line_to(-size * 0.1, size * 0.25);
        pb.move_to(0.0, size * 0.1);
        pb.line_to(size * 0.1, size * 0.25);
        if let Some(mouth) = pb.finish() {
            let mut line = stroke(2.0);
            line.line_cap = LineCap::Butt;
            s.stroke_path(&mouth, &black, &line);
        }
    });
}

/// Two mirrored ellipses: the right one centred on `right` and tilted
/// clockwise, the left one mirrored across the vertical axis.
fn ellipse_pair(right: Point, rx: f32, ry: f32) -> Option<Path> {
    let oval = PathBuilder::from_oval(Rect::from_xywh(-rx, -ry, rx * 2.0, ry * 2.0)?)?;
    let tilt = EAR_TILT.to_degrees();
    let left = oval
        .clone()
        .transform(Transform::from_rotate(-tilt).post_translate(-right.x, right.y))?;
    let right = oval.transform(Transform::from_rotate(tilt).post_translate(right.x, right.y))?;

    let mut pb = PathBuilder::new();
    pb.push_path(&left);
    pb.push_path(&right);
    pb.finish()
}
