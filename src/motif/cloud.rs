//! Soft cloud puffs.

use resvg::tiny_skia::PathBuilder;

use super::instance;
use crate::geometry::Point;
use crate::surface::{Surface, solid, translucent};

/// Width parameter of a cloud at scale 1.
pub const LARGE_CLOUD: f32 = 80.0;
pub const SMALL_CLOUD: f32 = 60.0;

/// Draws one puff of `size` at `anchor`: three overlapping circles, the
/// middle one raised and slightly larger.
pub fn draw_cloud(surface: &mut Surface, anchor: Point, size: f32, scale: f32) {
    instance(surface, anchor, scale, |s| {
        let mut pb = PathBuilder::new();
        pb.push_circle(-size * 0.5, 0.0, size * 0.5);
        pb.push_circle(0.0, -size * 0.3, size * 0.6);
        pb.push_circle(size * 0.5, 0.0, size * 0.5);
        let Some(path) = pb.finish() else { return };
        s.fill_path(&path, &solid(translucent(0xffffff, 0.3)));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::test_support::*;

    #[test]
    fn overlapping_circles_do_not_stack_alpha() {
        let mut surface = blank();
        draw_cloud(&mut surface, Point::new(400.0, 400.0), LARGE_CLOUD, 1.0);
        // (380, 395) is covered by the left and middle circles, (400, 340)
        // by the middle one only.
        let overlap = rgba_at(&surface, 380.0, 395.0);
        let single = rgba_at(&surface, 400.0, 340.0);
        assert_eq!(overlap[3], single[3]);
        assert_eq!(single[3], 77);
    }

    #[test]
    fn cloud_scales_with_decoration() {
        let mut surface = blank();
        draw_cloud(&mut surface, Point::new(400.0, 400.0), SMALL_CLOUD, 2.0);
        // 1.6 * size to the right of the anchor is outside at scale 1 but
        // inside at scale 2.
        assert!(rgba_at(&surface, 400.0 + 1.6 * SMALL_CLOUD, 400.0)[3] > 0);
    }
}
