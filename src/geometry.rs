//! Clip-shape geometry for the portrait region.
//!
//! The portrait is masked by either a circle or a rounded square. The same
//! [`Path`] is used to clip the photo and to stroke its border, so the two
//! always coincide.

use resvg::tiny_skia::{Path, PathBuilder};

/// Roundness (in percent) at and above which the portrait becomes a circle.
///
/// This is a hard branch: 44.9 still produces a rounded square.
pub const CIRCLE_THRESHOLD: f32 = 45.0;

/// A point in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The shape class selected for a given roundness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    /// A circle of `radius` around `center`.
    Circle { center: Point, radius: f32 },

    /// A square of side `2 * half_extent` around `center`, with corners
    /// rounded by `corner_radius`.
    RoundedRect {
        center: Point,
        half_extent: f32,
        corner_radius: f32,
    },
}

impl ClipShape {
    /// Selects the shape for `roundness_pct`, clamped to `[0, 100]`.
    ///
    /// `roundness_pct >= 45` yields a circle; anything below yields a rounded
    /// square with `corner_radius = 2 * radius * roundness / 100`.
    pub fn for_roundness(center: Point, radius: f32, roundness_pct: f32) -> Self {
        let roundness = roundness_pct.clamp(0.0, 100.0);
        if roundness >= CIRCLE_THRESHOLD {
            Self::Circle { center, radius }
        } else {
            Self::RoundedRect {
                center,
                half_extent: radius,
                corner_radius: 2.0 * radius * roundness / 100.0,
            }
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    pub fn center(&self) -> Point {
        match *self {
            Self::Circle { center, .. } | Self::RoundedRect { center, .. } => center,
        }
    }

    /// Builds the closed outline of this shape.
    ///
    /// Returns `None` for degenerate (zero or negative) sizes.
    pub fn to_path(&self) -> Option<Path> {
        match *self {
            Self::Circle { radius, .. } if radius <= 0.0 => None,
            Self::Circle { center, radius } => PathBuilder::from_circle(center.x, center.y, radius),
            Self::RoundedRect {
                center,
                half_extent,
                corner_radius,
            } => rounded_square(center, half_extent, corner_radius),
        }
    }
}

/// Builds the portrait clip path around `center`.
///
/// Convenience wrapper over [`ClipShape::for_roundness`] + [`ClipShape::to_path`].
pub fn build_clip_path(center: Point, radius: f32, roundness_pct: f32) -> Option<Path> {
    ClipShape::for_roundness(center, radius, roundness_pct).to_path()
}

/// Four straight edges joined by quadratic corners whose control points sit
/// on the square's corners.
fn rounded_square(center: Point, half_extent: f32, corner_radius: f32) -> Option<Path> {
    if half_extent <= 0.0 {
        return None;
    }

    let x = center.x - half_extent;
    let y = center.y - half_extent;
    let size = half_extent * 2.0;
    let r = corner_radius.max(0.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + size - r, y);
    pb.quad_to(x + size, y, x + size, y + r);
    pb.line_to(x + size, y + size - r);
    pb.quad_to(x + size, y + size, x + size - r, y + size);
    pb.line_to(x + r, y + size);
    pb.quad_to(x, y + size, x, y + size - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(400.0, 400.0);

    #[test]
    fn threshold_is_exact() {
        assert!(!ClipShape::for_roundness(CENTER, 280.0, 44.0).is_circle());
        assert!(!ClipShape::for_roundness(CENTER, 280.0, 44.999).is_circle());
        assert!(ClipShape::for_roundness(CENTER, 280.0, 45.0).is_circle());
        assert!(ClipShape::for_roundness(CENTER, 280.0, 100.0).is_circle());
    }

    #[test]
    fn corner_radius_scales_with_roundness() {
        match ClipShape::for_roundness(CENTER, 280.0, 10.0) {
            ClipShape::RoundedRect { corner_radius, .. } => {
                assert!((corner_radius - 56.0).abs() < 1e-4);
            }
            other => panic!("expected rounded rect, got {other:?}"),
        }
    }

    #[test]
    fn roundness_is_clamped() {
        match ClipShape::for_roundness(CENTER, 100.0, -20.0) {
            ClipShape::RoundedRect { corner_radius, .. } => assert_eq!(corner_radius, 0.0),
            other => panic!("expected rounded rect, got {other:?}"),
        }
        assert!(ClipShape::for_roundness(CENTER, 100.0, 250.0).is_circle());
    }

    #[test]
    fn rounded_square_fills_its_box() {
        let path = build_clip_path(CENTER, 280.0, 20.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 120.0).abs() < 0.5);
        assert!((bounds.top() - 120.0).abs() < 0.5);
        assert!((bounds.right() - 680.0).abs() < 0.5);
        assert!((bounds.bottom() - 680.0).abs() < 0.5);
    }

    #[test]
    fn circle_path_bounds() {
        let path = build_clip_path(CENTER, 280.0, 50.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.width() - 560.0).abs() < 0.5);
        assert!((bounds.height() - 560.0).abs() < 0.5);
    }

    #[test]
    fn square_corners_are_sharp_at_zero_roundness() {
        let path = build_clip_path(Point::new(10.0, 10.0), 5.0, 0.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 5.0);
        assert_eq!(bounds.bottom(), 15.0);
    }

    #[test]
    fn degenerate_radius_yields_no_path() {
        assert!(build_clip_path(CENTER, 0.0, 10.0).is_none());
        assert!(build_clip_path(CENTER, 0.0, 80.0).is_none());
    }
}
