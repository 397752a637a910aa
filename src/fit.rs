//! Aspect-correct "cover" fitting of a photo into a square.

/// Placement of a source image inside a square target.
///
/// Offsets are relative to the target's top-left corner and are never
/// positive: overflow is split evenly on both sides of the long axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CoverFit {
    /// Horizontal scale factor applied to the source.
    pub fn scale_x(&self, img_width: u32) -> f32 {
        self.draw_width / img_width.max(1) as f32
    }

    /// Vertical scale factor applied to the source.
    pub fn scale_y(&self, img_height: u32) -> f32 {
        self.draw_height / img_height.max(1) as f32
    }
}

/// Scales `img_width x img_height` so it covers a `target_size` square
/// without distortion.
///
/// Landscape sources get `draw_height == target_size` and are cropped left
/// and right; portrait and square sources get `draw_width == target_size` and
/// are cropped top and bottom.
pub fn fit_cover(img_width: u32, img_height: u32, target_size: f32) -> CoverFit {
    let aspect = img_width.max(1) as f32 / img_height.max(1) as f32;

    if aspect > 1.0 {
        let draw_width = target_size * aspect;
        CoverFit {
            draw_width,
            draw_height: target_size,
            offset_x: -(draw_width - target_size) / 2.0,
            offset_y: 0.0,
        }
    } else {
        let draw_height = target_size / aspect;
        CoverFit {
            draw_width: target_size,
            draw_height,
            offset_x: 0.0,
            offset_y: -(draw_height - target_size) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.1
    }

    #[test]
    fn landscape_crops_horizontally() {
        let fit = fit_cover(1600, 900, 400.0);
        assert_eq!(fit.draw_height, 400.0);
        assert!(close(fit.draw_width, 711.1));
        assert!(close(fit.offset_x, -155.6));
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn portrait_crops_vertically() {
        let fit = fit_cover(900, 1600, 400.0);
        assert_eq!(fit.draw_width, 400.0);
        assert!(close(fit.draw_height, 711.1));
        assert_eq!(fit.offset_x, 0.0);
        assert!(close(fit.offset_y, -155.6));
    }

    #[test]
    fn square_is_untouched() {
        let fit = fit_cover(300, 300, 560.0);
        assert_eq!(fit.draw_width, 560.0);
        assert_eq!(fit.draw_height, 560.0);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn scale_is_uniform() {
        let fit = fit_cover(1600, 900, 400.0);
        assert!((fit.scale_x(1600) - fit.scale_y(900)).abs() < 1e-5);
    }

    #[test]
    fn zero_dimensions_do_not_divide_by_zero() {
        let fit = fit_cover(0, 0, 100.0);
        assert!(fit.draw_width.is_finite());
        assert!(fit.draw_height.is_finite());
    }
}
