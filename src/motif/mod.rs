//! The motif library.
//!
//! Every motif instance is drawn at its design size around a local origin;
//! [`instance`] translates that origin to the anchor and applies the
//! decoration scale, so a family looks the same at every scale.
//!
//! Families are looked up through [`family`], an exhaustive mapping from
//! [`MotifKind`] to its drawer and anchor layout.

pub mod animal;
pub mod cake;
pub mod celestial;
pub mod cloud;
pub mod lantern;

use resvg::tiny_skia::Transform;
use tracing::trace;

use crate::geometry::Point;
use crate::style::MotifKind;
use crate::surface::Surface;
use crate::text::TextRenderer;

/// Draws one instance of a family at each anchor, at `scale`.
pub type FamilyDrawer = fn(&mut Surface, &TextRenderer, &[Point], f32);

/// Computes the anchor of each instance for a `width x height` surface.
pub type AnchorLayout = fn(f32, f32, f32) -> Vec<Point>;

/// A motif family bound to its drawer and anchor layout.
#[derive(Clone, Copy)]
pub struct MotifFamily {
    pub kind: MotifKind,
    pub draw: FamilyDrawer,
    pub anchors: AnchorLayout,
}

impl std::fmt::Debug for MotifFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotifFamily")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Returns the drawer for `kind`, or `None` for [`MotifKind::None`].
pub fn family(kind: MotifKind) -> Option<MotifFamily> {
    let (draw, anchors): (FamilyDrawer, AnchorLayout) = match kind {
        MotifKind::None => return None,
        MotifKind::Celestial => (celestial::draw_family, celestial::anchors),
        MotifKind::SmallAnimal => (animal::draw_family, animal::anchors),
        MotifKind::FestiveCake => (cake::draw_family, cake::anchors),
        MotifKind::Lantern => (lantern::draw_family, lantern::anchors),
    };
    Some(MotifFamily {
        kind,
        draw,
        anchors,
    })
}

/// Draws the selected family onto `surface`.
///
/// Non-positive or non-finite scales draw nothing.
pub fn draw_motif(kind: MotifKind, surface: &mut Surface, text: &TextRenderer, scale: f32) {
    let Some(family) = family(kind) else {
        return;
    };
    if !scale.is_finite() || scale <= 0.0 {
        return;
    }
    let anchors = (family.anchors)(surface.width() as f32, surface.height() as f32, scale);
    trace!(motif = %kind, scale, instances = anchors.len(), "drawing motif family");
    (family.draw)(surface, text, &anchors, scale);
}

/// Runs `draw` in a local frame centred on `anchor` and scaled by `scale`.
pub fn instance(surface: &mut Surface, anchor: Point, scale: f32, draw: impl FnOnce(&mut Surface)) {
    let local = Transform::from_translate(anchor.x, anchor.y).pre_scale(scale, scale);
    surface.scoped(local, draw);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::surface::Surface;

    pub const SIZE: u32 = 800;

    pub fn blank() -> Surface {
        Surface::new(SIZE, SIZE).unwrap()
    }

    pub fn rgba_at(surface: &Surface, x: f32, y: f32) -> [u8; 4] {
        let c = surface
            .pixmap()
            .pixel(x.round() as u32, y.round() as u32)
            .unwrap()
            .demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    pub fn is_blank(surface: &Surface) -> bool {
        surface.pixmap().pixels().iter().all(|p| p.alpha() == 0)
    }
}
