//! The uploaded photo.
//!
//! A [`SourceImage`] is decoded once and then held, unchanged, for the rest
//! of the session. A new upload replaces it wholesale.

use image::RgbaImage;
use resvg::tiny_skia::{IntSize, Pixmap};

use crate::error::{AvatarError, AvatarResult};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Width divided by height (1.0 for degenerate sizes).
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// An immutable decoded photo in straight-alpha RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    data: RgbaImage,
}

impl SourceImage {
    /// Wraps an already decoded RGBA buffer.
    pub fn new(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Decodes an uploaded file.
    ///
    /// The format is sniffed from the leading bytes first; anything that is
    /// not a recognised image is rejected with [`AvatarError::NotAnImage`]
    /// before any decoding is attempted.
    pub fn from_bytes(bytes: &[u8]) -> AvatarResult<Self> {
        let format = image::guess_format(bytes).map_err(|_| AvatarError::NotAnImage)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// Returns the pixel dimensions of the photo.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Borrows the raw RGBA pixels.
    pub fn data(&self) -> &RgbaImage {
        &self.data
    }

    /// Converts the photo into a premultiplied pixmap for drawing.
    ///
    /// Returns `None` for zero-sized images.
    pub(crate) fn to_pixmap(&self) -> Option<Pixmap> {
        let size = IntSize::from_wh(self.data.width(), self.data.height())?;
        let mut data = self.data.as_raw().clone();
        for px in data.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a < 255 {
                px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
                px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
                px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
            }
        }
        Pixmap::from_vec(data, size)
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(data: RgbaImage) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn size_px_is_square() {
        assert!(SizePx::new(100, 100).is_square());
        assert!(!SizePx::new(100, 200).is_square());
        assert_eq!(SizePx::new(200, 100).aspect(), 2.0);
    }

    #[test]
    fn decodes_png_upload() {
        let img = RgbaImage::from_pixel(12, 7, Rgba([10, 20, 30, 255]));
        let source = SourceImage::from_bytes(&png_bytes(&img)).unwrap();
        assert_eq!(source.dimensions(), SizePx::new(12, 7));
        assert_eq!(source.data().get_pixel(3, 3).0, [10, 20, 30, 255]);
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = SourceImage::from_bytes(b"just some text, not a picture").unwrap_err();
        assert!(matches!(err, AvatarError::NotAnImage));
    }

    #[test]
    fn truncated_image_is_a_decode_error() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]));
        let bytes = png_bytes(&img);
        let err = SourceImage::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, AvatarError::Decode(_)));
    }

    #[test]
    fn pixmap_is_premultiplied() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 128]));
        let pixmap = SourceImage::new(img).to_pixmap().unwrap();
        let px = pixmap.pixel(0, 0).unwrap();
        assert_eq!(px.alpha(), 128);
        assert_eq!(px.red(), 100);
        assert_eq!(px.green(), 50);
    }

    #[test]
    fn empty_image_has_no_pixmap() {
        assert!(SourceImage::new(RgbaImage::new(0, 0)).to_pixmap().is_none());
    }
}
