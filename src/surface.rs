//! The output drawing surface.
//!
//! [`Surface`] wraps a tiny-skia [`Pixmap`] with a stack of local transforms.
//! Motif drawers never touch the stack directly: they call
//! [`Surface::scoped`], which pushes a transform, runs the closure and pops
//! it again, so nothing leaks from one motif instance into the next.

use image::{Rgba, RgbaImage};
use palette::{Srgb, Srgba, WithAlpha};
use resvg::tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, Mask, Paint, Path, Pixmap, PixmapPaint, Point,
    Rect, Shader, Stroke, Transform,
};

use crate::blur::{blur_extent, blur_rgba8_premul, sigma_for_shadow_blur};
use crate::error::{AvatarError, AvatarResult};

// ============================================================================
// Colors
// ============================================================================

/// An sRGB color with straight 8-bit alpha.
pub type Rgba8 = Srgba<u8>;

/// An opaque color from a `0xRRGGBB` literal.
pub fn opaque(hex: u32) -> Rgba8 {
    Srgb::<u8>::from(hex).with_alpha(u8::MAX)
}

/// A color from a `0xRRGGBB` literal with a fractional alpha.
pub fn translucent(hex: u32, alpha: f32) -> Rgba8 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Srgb::<u8>::from(hex).with_alpha(a)
}

pub(crate) fn to_skia(color: Rgba8) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

/// `#rrggbb` notation, as used in SVG attributes.
pub(crate) fn to_hex(color: Rgba8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Builds gradient stops from `(offset, color)` pairs.
pub fn stops(pairs: &[(f32, Rgba8)]) -> Vec<GradientStop> {
    pairs
        .iter()
        .map(|&(pos, color)| GradientStop::new(pos, to_skia(color)))
        .collect()
}

/// Gradient stops for a radial gradient that starts at radius `inner`
/// instead of at its focal point: each offset is remapped onto
/// `inner..outer` as a fraction of `outer`.
pub fn ring_stops(inner: f32, outer: f32, pairs: &[(f32, Rgba8)]) -> Vec<GradientStop> {
    let start = (inner / outer).clamp(0.0, 1.0);
    pairs
        .iter()
        .map(|&(pos, color)| GradientStop::new(start + pos * (1.0 - start), to_skia(color)))
        .collect()
}

/// A solid anti-aliased paint.
pub fn solid(color: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// An anti-aliased paint using `shader`.
pub fn shaded(shader: Shader<'static>) -> Paint<'static> {
    Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    }
}

/// A plain stroke of `width` units.
pub fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        ..Stroke::default()
    }
}

// ============================================================================
// Shadow
// ============================================================================

/// A canvas-style shadow: a blurred, offset copy of the shape drawn beneath it.
///
/// With a zero offset this doubles as an outer glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba8,
    /// Canvas `shadowBlur` amount; the Gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    /// A centred glow.
    pub fn glow(color: Rgba8, blur: f32) -> Self {
        Self {
            color,
            blur,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// A shadow displaced by `(dx, dy)` surface units.
    pub fn offset(color: Rgba8, blur: f32, dx: f32, dy: f32) -> Self {
        Self {
            color,
            blur,
            offset_x: dx,
            offset_y: dy,
        }
    }
}

enum Coverage<'a> {
    Fill,
    Stroke(&'a Stroke),
}

// ============================================================================
// Surface
// ============================================================================

/// A square raster that the compositor draws into.
pub struct Surface {
    pixmap: Pixmap,
    stack: Vec<Transform>,
}

impl Surface {
    /// Allocates a transparent `width x height` surface.
    pub fn new(width: u32, height: u32) -> AvatarResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            AvatarError::surface(format!("cannot allocate a {width}x{height} surface"))
        })?;
        Ok(Self {
            pixmap,
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Resets every pixel to transparent and drops any leftover transforms.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.stack.clear();
    }

    /// The transform currently applied to drawing commands.
    pub fn transform(&self) -> Transform {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Nesting depth of the transform stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Runs `draw` with `local` composed onto the current transform.
    ///
    /// The transform is popped when `draw` returns.
    pub fn scoped<R>(&mut self, local: Transform, draw: impl FnOnce(&mut Surface) -> R) -> R {
        let combined = self.transform().pre_concat(local);
        self.stack.push(combined);
        let result = draw(self);
        self.stack.pop();
        result
    }

    /// Shorthand for a scoped translation to `(x, y)`.
    pub fn translated<R>(&mut self, x: f32, y: f32, draw: impl FnOnce(&mut Surface) -> R) -> R {
        self.scoped(Transform::from_translate(x, y), draw)
    }

    pub fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let ts = self.transform();
        self.pixmap.fill_path(path, paint, FillRule::Winding, ts, None);
    }

    pub fn stroke_path(&mut self, path: &Path, paint: &Paint, stroke: &Stroke) {
        let ts = self.transform();
        self.pixmap.stroke_path(path, paint, stroke, ts, None);
    }

    /// Fills a rectangle in local coordinates.
    pub fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let ts = self.transform();
        self.pixmap.fill_rect(rect, paint, ts, None);
    }

    /// Draws the shadow of `path`, then fills the path itself.
    pub fn fill_path_with_shadow(&mut self, path: &Path, paint: &Paint, shadow: &Shadow) {
        self.draw_shadow(path, Coverage::Fill, shadow);
        self.fill_path(path, paint);
    }

    /// Draws the shadow of the stroked outline, then strokes the path.
    pub fn stroke_path_with_shadow(
        &mut self,
        path: &Path,
        paint: &Paint,
        stroke: &Stroke,
        shadow: &Shadow,
    ) {
        self.draw_shadow(path, Coverage::Stroke(stroke), shadow);
        self.stroke_path(path, paint, stroke);
    }

    /// Draws `image` stretched to `dest`, masked by `clip`.
    ///
    /// Both `dest` and `clip` are in local coordinates. Pixels outside the
    /// clip are left untouched; the clip does not outlive this call.
    pub fn draw_image_clipped(&mut self, image: &Pixmap, dest: Rect, clip: &Path) {
        let Some(mut mask) = Mask::new(self.width(), self.height()) else {
            return;
        };
        let ts = self.transform();
        mask.fill_path(clip, FillRule::Winding, true, ts);

        let sx = dest.width() / image.width() as f32;
        let sy = dest.height() / image.height() as f32;
        let placement = ts.pre_concat(Transform::from_row(sx, 0.0, 0.0, sy, dest.x(), dest.y()));
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, placement, Some(&mask));
    }

    /// Mutable access for renderers that draw straight into the pixmap.
    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Converts the surface to a straight-alpha [`RgbaImage`].
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }

    /// Encodes the surface as PNG bytes.
    pub fn encode_png(&self) -> AvatarResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| AvatarError::encode(e.to_string()))
    }

    fn draw_shadow(&mut self, path: &Path, coverage: Coverage<'_>, shadow: &Shadow) {
        if shadow.color.alpha == 0 {
            return;
        }
        let ts = self
            .transform()
            .post_translate(shadow.offset_x, shadow.offset_y);
        let Some(device_path) = path.clone().transform(ts) else {
            return;
        };

        let sigma = sigma_for_shadow_blur(shadow.blur);
        let stroke_pad = match coverage {
            Coverage::Fill => 0.0,
            Coverage::Stroke(s) => {
                let sx = (ts.sx * ts.sx + ts.ky * ts.ky).sqrt();
                let sy = (ts.kx * ts.kx + ts.sy * ts.sy).sqrt();
                s.width * sx.max(sy)
            }
        };
        let pad = blur_extent(sigma) as f32 + stroke_pad + 2.0;
        let bounds = device_path.bounds();
        let left = (bounds.left() - pad).floor().max(0.0);
        let top = (bounds.top() - pad).floor().max(0.0);
        let right = (bounds.right() + pad).ceil().min(self.width() as f32);
        let bottom = (bounds.bottom() + pad).ceil().min(self.height() as f32);
        if right <= left || bottom <= top {
            return;
        }

        let Some(mut scratch) = Pixmap::new((right - left) as u32, (bottom - top) as u32) else {
            return;
        };
        let local = Transform::from_translate(-left, -top);
        let paint = solid(shadow.color);
        match coverage {
            Coverage::Fill => {
                scratch.fill_path(&device_path, &paint, FillRule::Winding, local, None);
            }
            Coverage::Stroke(s) => {
                let mut scaled = s.clone();
                scaled.width = stroke_pad;
                scratch.stroke_path(&device_path, &paint, &scaled, local, None);
            }
        }

        let (w, h) = (scratch.width(), scratch.height());
        blur_rgba8_premul(scratch.data_mut(), w, h, sigma);
        self.pixmap.draw_pixmap(
            left as i32,
            top as i32,
            scratch.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

/// Converts a premultiplied pixmap to a straight-alpha image.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }

    img
}

/// Local-space point helper for gradient construction.
pub fn pt(x: f32, y: f32) -> Point {
    Point::from_xy(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::{PathBuilder, RadialGradient, SpreadMode};

    fn alpha_at(surface: &Surface, x: u32, y: u32) -> u8 {
        surface.pixmap().pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn colors_from_hex() {
        let gold = opaque(0xffd700);
        assert_eq!((gold.red, gold.green, gold.blue, gold.alpha), (255, 215, 0, 255));
        assert_eq!(translucent(0xffffff, 0.3).alpha, 77);
        assert_eq!(to_hex(gold), "#ffd700");
    }

    #[test]
    fn scoped_transform_is_popped() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.translated(3.0, 4.0, |s| {
            assert_eq!(s.depth(), 1);
            s.translated(1.0, 1.0, |inner| {
                let ts = inner.transform();
                assert_eq!((ts.tx, ts.ty), (4.0, 5.0));
            });
            assert_eq!(s.transform().tx, 3.0);
        });
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.transform(), Transform::identity());
    }

    #[test]
    fn fill_respects_current_transform() {
        let mut surface = Surface::new(40, 40).unwrap();
        let dot = PathBuilder::from_circle(0.0, 0.0, 4.0).unwrap();
        surface.translated(30.0, 30.0, |s| s.fill_path(&dot, &solid(opaque(0xff0000))));
        assert_eq!(alpha_at(&surface, 30, 30), 255);
        assert_eq!(alpha_at(&surface, 0, 0), 0);
    }

    #[test]
    fn ring_stops_hold_the_first_color_inside_the_inner_radius() {
        let mut surface = Surface::new(100, 100).unwrap();
        let shader = RadialGradient::new(
            pt(50.0, 50.0),
            pt(50.0, 50.0),
            40.0,
            ring_stops(20.0, 40.0, &[(0.0, opaque(0xff0000)), (1.0, opaque(0x0000ff))]),
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap();
        surface.fill_rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0).unwrap(), &shaded(shader));

        let at = |x: u32| surface.pixmap().pixel(x, 50).unwrap().demultiply();
        // 15 px out: still inside the flat core.
        assert_eq!((at(65).red(), at(65).blue()), (255, 0));
        // 30 px out: halfway between the two radii.
        let mid = at(80);
        assert!(mid.red() > 90 && mid.blue() > 90, "{mid:?}");
    }

    #[test]
    fn clear_wipes_pixels() {
        let mut surface = Surface::new(8, 8).unwrap();
        let rect = Rect::from_xywh(0.0, 0.0, 8.0, 8.0).unwrap();
        surface.fill_rect(rect, &solid(opaque(0x00ff00)));
        assert_eq!(alpha_at(&surface, 4, 4), 255);
        surface.clear();
        assert_eq!(alpha_at(&surface, 4, 4), 0);
    }

    #[test]
    fn glow_bleeds_outside_the_shape() {
        let mut surface = Surface::new(60, 60).unwrap();
        let dot = PathBuilder::from_circle(30.0, 30.0, 10.0).unwrap();
        let glow = Shadow::glow(opaque(0xffd700), 12.0);
        surface.fill_path_with_shadow(&dot, &solid(opaque(0xffffff)), &glow);
        assert_eq!(alpha_at(&surface, 30, 30), 255);
        assert!(alpha_at(&surface, 30, 43) > 0, "glow should extend past the edge");
        assert_eq!(alpha_at(&surface, 0, 0), 0);
    }

    #[test]
    fn clipped_image_stays_inside_clip() {
        let mut surface = Surface::new(20, 20).unwrap();
        let mut image = Pixmap::new(4, 4).unwrap();
        image.fill(Color::from_rgba8(0, 0, 255, 255));
        let clip = PathBuilder::from_rect(Rect::from_xywh(5.0, 5.0, 10.0, 10.0).unwrap());
        let dest = Rect::from_xywh(0.0, 0.0, 20.0, 20.0).unwrap();
        surface.draw_image_clipped(&image, dest, &clip);

        assert_eq!(alpha_at(&surface, 10, 10), 255);
        assert_eq!(alpha_at(&surface, 2, 2), 0);
        assert_eq!(alpha_at(&surface, 18, 18), 0);
    }

    #[test]
    fn rgba_export_unpremultiplies() {
        let mut surface = Surface::new(2, 2).unwrap();
        let rect = Rect::from_xywh(0.0, 0.0, 2.0, 2.0).unwrap();
        surface.fill_rect(rect, &solid(translucent(0xff0000, 0.5)));
        let img = surface.to_rgba_image();
        let px = img.get_pixel(0, 0);
        assert_eq!(px[0], 255);
        assert_eq!(px[3], 128);
    }

    #[test]
    fn encodes_png() {
        let surface = Surface::new(4, 4).unwrap();
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
