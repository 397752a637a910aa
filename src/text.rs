//! Text rendering through usvg/resvg.
//!
//! Each label is expressed as a tiny SVG document (gradient fill, outline,
//! drop shadow) and rasterised with the surface's current transform, so text
//! inside a motif scales and moves with it.

use std::path::Path as FsPath;
use std::sync::Arc;

use resvg::tiny_skia::Transform;
use resvg::usvg::fontdb::{Family, Query, Source, Weight};
use resvg::usvg::{Options, Tree};
use tracing::{debug, warn};

use crate::error::AvatarResult;
use crate::surface::{Rgba8, Shadow, Surface, to_hex};

/// Preferred families for every label; the CJK faces cover the festive
/// glyphs. The stack ends with the generic `sans-serif`.
pub const PREFERRED_FAMILIES: [&str; 4] = [
    "Microsoft YaHei",
    "PingFang SC",
    "Noto Sans CJK SC",
    "Noto Sans SC",
];

/// Distance from the vertical centre of a line to its alphabetic baseline,
/// as a fraction of the font size.
const MIDDLE_TO_BASELINE: f32 = 0.35;

// ============================================================================
// TextLabel
// ============================================================================

/// How a label's glyphs are filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextFill {
    Solid(Rgba8),
    /// Linear gradient from `top` at `y1` to `bottom` at `y2`, in local units.
    VerticalGradient {
        top: Rgba8,
        bottom: Rgba8,
        y1: f32,
        y2: f32,
    },
}

/// A single line of bold text centred on `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub fill: TextFill,
    /// Outline painted after the fill.
    pub stroke: Option<(Rgba8, f32)>,
    pub shadow: Option<Shadow>,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, fill: TextFill) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            fill,
            stroke: None,
            shadow: None,
        }
    }

    pub fn with_stroke(mut self, color: Rgba8, width: f32) -> Self {
        self.stroke = Some((color, width));
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Builds the SVG document for this label on a `width x height` canvas,
    /// placed with `transform` and set in the CSS `font_family` list.
    ///
    /// The shadow filter sits outside the transformed group, so its offset
    /// and blur are in canvas pixels whatever the transform.
    pub fn to_svg(
        &self,
        width: u32,
        height: u32,
        transform: Transform,
        font_family: &str,
    ) -> String {
        let mut defs = String::new();
        let fill = match self.fill {
            TextFill::Solid(color) => format!(
                r#"fill="{}" fill-opacity="{}""#,
                to_hex(color),
                opacity(color)
            ),
            TextFill::VerticalGradient { top, bottom, y1, y2 } => {
                defs.push_str(&format!(
                    r#"<linearGradient id="fill" gradientUnits="userSpaceOnUse" x1="0" y1="{y1}" x2="0" y2="{y2}"><stop offset="0" stop-color="{}" stop-opacity="{}"/><stop offset="1" stop-color="{}" stop-opacity="{}"/></linearGradient>"#,
                    to_hex(top),
                    opacity(top),
                    to_hex(bottom),
                    opacity(bottom),
                ));
                r#"fill="url(#fill)""#.to_string()
            }
        };

        let stroke = match self.stroke {
            Some((color, width)) => format!(
                r#" stroke="{}" stroke-opacity="{}" stroke-width="{width}" paint-order="normal""#,
                to_hex(color),
                opacity(color)
            ),
            None => String::new(),
        };

        let filter = match self.shadow {
            Some(shadow) => {
                defs.push_str(&format!(
                    r#"<filter id="shadow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
                    shadow.offset_x,
                    shadow.offset_y,
                    shadow.blur / 2.0,
                    to_hex(shadow.color),
                    opacity(shadow.color),
                ));
                r#" filter="url(#shadow)""#
            }
            None => "",
        };

        let (sx, ky, kx, sy, tx, ty) = (
            transform.sx,
            transform.ky,
            transform.kx,
            transform.sy,
            transform.tx,
            transform.ty,
        );
        let baseline = self.y + self.font_size * MIDDLE_TO_BASELINE;

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><defs>{defs}</defs><g{filter}><g transform="matrix({sx} {ky} {kx} {sy} {tx} {ty})"><text x="{x}" y="{baseline}" xml:space="preserve" text-anchor="middle" font-family="{family}" font-size="{size}" font-weight="bold" {fill}{stroke}>{text}</text></g></g></svg>"#,
            x = self.x,
            size = self.font_size,
            family = escape_xml(font_family),
            text = escape_xml(&self.text),
        )
    }
}

fn opacity(color: Rgba8) -> f32 {
    color.alpha as f32 / 255.0
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// TextRenderer
// ============================================================================

/// Holds the font database used to shape labels.
///
/// Fonts added by the caller are tried before [`PREFERRED_FAMILIES`]. When
/// none of the preferred faces is installed, the generic `sans-serif` family
/// is pointed at a face that is, so labels never silently vanish while any
/// font is loaded.
pub struct TextRenderer {
    options: Options<'static>,
    /// Families of caller-added fonts, in load order.
    families: Vec<String>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Creates a renderer backed by the fonts installed on this system.
    pub fn new() -> Self {
        let mut renderer = Self::empty();
        renderer.options.fontdb_mut().load_system_fonts();
        debug!(faces = renderer.face_count(), "loaded system fonts");
        if renderer.face_count() == 0 {
            warn!("no system fonts found; captions will not be visible");
        }
        renderer.resolve_sans_serif();
        renderer
    }

    /// Creates a renderer with no fonts; labels render as nothing until
    /// fonts are added.
    pub fn empty() -> Self {
        Self {
            options: Options::default(),
            families: Vec::new(),
        }
    }

    /// Adds a font from raw TTF/OTF/TTC bytes and returns the number of
    /// faces it contained.
    pub fn load_font_data(&mut self, data: Vec<u8>) -> usize {
        let db = self.options.fontdb_mut();
        let ids = db.load_font_source(Source::Binary(Arc::new(data)));
        for id in &ids {
            let Some(face) = db.face(*id) else { continue };
            if let Some((family, _)) = face.families.first() {
                if !self.families.contains(family) {
                    debug!(family = %family, "added font family");
                    self.families.push(family.clone());
                }
            }
        }
        if ids.is_empty() {
            warn!("font data contained no usable faces");
        }
        self.resolve_sans_serif();
        ids.len()
    }

    /// Adds a font file from disk.
    pub fn load_font_file(&mut self, path: impl AsRef<FsPath>) -> AvatarResult<()> {
        let data = std::fs::read(path)?;
        self.load_font_data(data);
        Ok(())
    }

    /// Number of font faces available for shaping.
    pub fn face_count(&self) -> usize {
        self.options.fontdb.len()
    }

    /// The CSS `font-family` list handed to every label.
    pub fn font_family(&self) -> String {
        let mut list: Vec<String> = self
            .families
            .iter()
            .map(String::as_str)
            .chain(PREFERRED_FAMILIES)
            .filter(|name| !name.contains('\''))
            .map(|name| format!("'{name}'"))
            .collect();
        list.push("sans-serif".to_string());
        list.join(", ")
    }

    /// The face family the generic `sans-serif` currently resolves to.
    pub fn sans_serif_family(&self) -> &str {
        self.options.fontdb.family_name(&Family::SansSerif)
    }

    fn resolve_sans_serif(&mut self) {
        let db = self.options.fontdb_mut();
        let mut families: Vec<Family<'_>> = PREFERRED_FAMILIES.map(Family::Name).to_vec();
        families.push(Family::SansSerif);
        let query = Query {
            families: &families,
            weight: Weight::BOLD,
            ..Query::default()
        };
        if db.query(&query).is_some() {
            return;
        }
        // First sans face if there is one, else the first face of any kind.
        let Some(family) = db
            .faces()
            .filter_map(|face| face.families.first())
            .map(|(name, _)| name)
            .min_by_key(|name| !name.contains("Sans"))
            .cloned()
        else {
            return;
        };
        debug!(family = %family, "no preferred font installed; using it as sans-serif");
        db.set_sans_serif_family(family);
    }

    /// Rasterises `label` onto `surface` under its current transform.
    pub fn draw(&self, surface: &mut Surface, label: &TextLabel) {
        if label.text.is_empty() || label.font_size <= 0.0 {
            return;
        }
        let svg = label.to_svg(
            surface.width(),
            surface.height(),
            surface.transform(),
            &self.font_family(),
        );
        let tree = match Tree::from_str(&svg, &self.options) {
            Ok(tree) => tree,
            Err(err) => {
                warn!(%err, "failed to build text label");
                return;
            }
        };
        resvg::render(&tree, Transform::identity(), &mut surface.pixmap_mut().as_mut());
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::fixture_font;
    use super::*;
    use crate::surface::{opaque, translucent};

    fn caption() -> TextLabel {
        TextLabel::new(
            "Happy Mid-Autumn",
            400.0,
            730.0,
            60.0,
            TextFill::VerticalGradient {
                top: opaque(0xffd700),
                bottom: opaque(0xffed4e),
                y1: 700.0,
                y2: 760.0,
            },
        )
        .with_stroke(opaque(0xff6b6b), 3.0)
        .with_shadow(Shadow::offset(translucent(0x000000, 0.8), 10.0, 3.0, 3.0))
    }

    fn svg(label: &TextLabel, transform: Transform) -> String {
        label.to_svg(800, 800, transform, &TextRenderer::empty().font_family())
    }

    fn painted(surface: &Surface) -> usize {
        surface.pixmap().pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn svg_contains_all_layers() {
        let svg = svg(&caption(), Transform::identity());
        assert!(svg.contains("Happy Mid-Autumn"));
        assert!(svg.contains("linearGradient"));
        assert!(svg.contains(r##"stroke="#ff6b6b""##));
        assert!(svg.contains("feDropShadow"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"xml:space="preserve""#));
    }

    #[test]
    fn svg_escapes_markup() {
        let label = TextLabel::new("<b>&\"", 0.0, 0.0, 10.0, TextFill::Solid(opaque(0)));
        let svg = svg(&label, Transform::identity());
        assert!(svg.contains("&lt;b&gt;&amp;&quot;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn svg_carries_transform() {
        let label = TextLabel::new("x", 0.0, 0.0, 10.0, TextFill::Solid(opaque(0)));
        let svg = svg(&label, Transform::from_translate(7.0, 9.0));
        assert!(svg.contains("matrix(1 0 0 1 7 9)"));
    }

    #[test]
    fn shadow_filter_wraps_the_transformed_group() {
        let label = caption();
        let svg = svg(&label, Transform::from_scale(2.0, 2.0));
        let filter = svg.find(r#"filter="url(#shadow)""#).unwrap();
        let matrix = svg.find("matrix(2 0 0 2 0 0)").unwrap();
        assert!(filter < matrix, "{svg}");
        assert!(svg.contains(r#"dx="3" dy="3" stdDeviation="5""#));
    }

    #[test]
    fn generated_svg_parses() {
        let svg = svg(&caption(), Transform::identity());
        assert!(Tree::from_str(&svg, &Options::default()).is_ok());
    }

    #[test]
    fn empty_renderer_draws_nothing() {
        let renderer = TextRenderer::empty();
        assert_eq!(renderer.face_count(), 0);
        let mut surface = Surface::new(800, 800).unwrap();
        renderer.draw(&mut surface, &caption());
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn default_stack_lists_preferred_faces_then_generic() {
        let family = TextRenderer::empty().font_family();
        assert!(family.starts_with("'Microsoft YaHei'"), "{family}");
        assert!(family.ends_with(", sans-serif"), "{family}");
    }

    #[test]
    fn added_fonts_lead_the_stack_and_back_sans_serif() {
        let renderer = fixture_font();
        assert!(renderer.font_family().starts_with("'DejaVu Sans', "));
        assert_eq!(renderer.sans_serif_family(), "DejaVu Sans");
    }

    #[test]
    fn loaded_font_puts_glyphs_on_the_surface() {
        let mut surface = Surface::new(800, 800).unwrap();
        fixture_font().draw(&mut surface, &caption());
        assert!(painted(&surface) > 1000);
    }

    #[test]
    fn garbage_font_data_adds_no_faces() {
        let mut renderer = TextRenderer::empty();
        assert_eq!(renderer.load_font_data(b"not a font".to_vec()), 0);
        assert_eq!(renderer.face_count(), 0);
        assert_eq!(renderer.sans_serif_family(), "Arial");
    }
}
