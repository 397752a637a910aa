//! mooncake-avatar: festive Mid-Autumn avatar compositor
//!
//! This crate turns a photo into an 800x800 avatar: the photo is clipped to
//! a circle or rounded square with a glowing gold frame, set on a starry
//! night sky, decorated with one family of festive motifs (moon and clouds,
//! rabbits, mooncakes or lanterns) and finished with a caption.
//!
//! # Example
//!
//! ```
//! use mooncake_avatar::{AvatarSession, MotifKind, SourceImage, StarField, TextRenderer};
//! use image::{Rgba, RgbaImage};
//!
//! let mut session = AvatarSession::with_text_renderer(TextRenderer::empty()).unwrap();
//! session.set_source(SourceImage::new(RgbaImage::from_pixel(
//!     1200,
//!     900,
//!     Rgba([90, 140, 200, 255]),
//! )));
//!
//! // Style the composite
//! session.set_motif(MotifKind::FestiveCake);
//! session.set_roundness(20.0);
//! session.set_decoration_scale(120.0);
//! session.set_caption(true, "");
//!
//! // Keep the stars still between renders
//! session.set_star_field(StarField::seeded(15));
//!
//! let png = session.export_png().unwrap().expect("a photo is loaded");
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! # Serializable Profiles
//!
//! For front-end/back-end communication, use [`StyleProfile`] with the
//! [`Configurable`] trait:
//!
//! ```
//! use mooncake_avatar::{AvatarSession, Configurable, MotifKind, StyleProfile, TextRenderer};
//!
//! let mut session = AvatarSession::with_text_renderer(TextRenderer::empty()).unwrap();
//!
//! let profile = StyleProfile::from_json(r#"{"motif": "lantern", "roundness": 30}"#).unwrap();
//! session.apply_profile(&profile);
//! assert_eq!(session.params().motif, MotifKind::Lantern);
//!
//! let json = session.export_profile().to_json().unwrap();
//! assert!(json.contains("\"lantern\""));
//! ```

mod blur;
mod compositor;
mod error;
mod fit;
mod geometry;
mod layer;
pub mod motif;
mod profile;
mod source;
mod style;
mod surface;
mod text;

pub use compositor::{AvatarSession, Configurable, DEFAULT_EXPORT_FILENAME, SURFACE_SIZE};
pub use error::{AvatarError, AvatarResult};
pub use fit::{CoverFit, fit_cover};
pub use geometry::{CIRCLE_THRESHOLD, ClipShape, Point, build_clip_path};
pub use layer::{
    BackgroundLayer, CaptionLayer, DecorationLayer, LayerEffect, LayerPipeline, PortraitLayer,
    RenderContext, Star, StarField,
};
pub use profile::{CaptionSettings, StarFieldSettings, StyleProfile};
pub use source::{SizePx, SourceImage};
pub use style::{
    DEFAULT_CAPTION, DEFAULT_DECORATION_SCALE, DEFAULT_ROUNDNESS, MAX_DECORATION_SCALE, MotifKind,
    StyleParameters, UnknownMotif,
};
pub use surface::{Rgba8, Shadow, Surface};
pub use text::{TextFill, TextLabel, TextRenderer};
