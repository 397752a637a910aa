//! Gaussian blur for glows and drop shadows.
//!
//! The blur is approximated by three successive box blurs per axis, which
//! keeps the cost independent of the radius. Pixels outside the buffer are
//! treated as fully transparent, so callers pad their scratch buffers by at
//! least [`blur_extent`].

/// Number of pixels a blur of `sigma` spreads beyond the original shape.
pub fn blur_extent(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        0
    } else {
        (sigma * 3.0).ceil() as u32 + 1
    }
}

/// Converts a canvas-style `shadowBlur` amount into a Gaussian sigma.
pub fn sigma_for_shadow_blur(blur: f32) -> f32 {
    (blur / 2.0).max(0.0)
}

/// Blurs a premultiplied RGBA8 buffer in place.
///
/// Does nothing for a non-positive sigma or a buffer that does not match
/// `width * height * 4`.
pub fn blur_rgba8_premul(data: &mut [u8], width: u32, height: u32, sigma: f32) {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4));
    if expected_len != Some(data.len()) || !sigma.is_finite() || sigma <= 0.0 {
        return;
    }

    let mut tmp = vec![0u8; data.len()];
    for radius in box_radii(sigma) {
        if radius == 0 {
            continue;
        }
        horizontal_pass(data, &mut tmp, width, height, radius);
        vertical_pass(&tmp, data, width, height, radius);
    }
}

/// Radii of three box filters whose composition approximates a Gaussian.
fn box_radii(sigma: f32) -> [u32; 3] {
    const PASSES: f32 = 3.0;
    let w_ideal = (12.0 * sigma * sigma / PASSES + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal = (12.0 * sigma * sigma - PASSES * wlf * wlf - 4.0 * PASSES * wlf - 3.0 * PASSES)
        / (-4.0 * wlf - 4.0);
    let m = m_ideal.round() as i32;

    let mut radii = [0u32; 3];
    for (i, r) in radii.iter_mut().enumerate() {
        let size = if (i as i32) < m { wl } else { wu };
        *r = ((size - 1) / 2) as u32;
    }
    radii
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let r = radius as i64;
    let div = (2 * r + 1) as u32;
    for y in 0..height as i64 {
        let row = (y * w * 4) as usize;
        let mut acc = [0u32; 4];
        // Prime the window for x = 0: covers [-r, r].
        for x in 0..=r.min(w - 1) {
            let idx = row + (x as usize) * 4;
            for c in 0..4 {
                acc[c] += src[idx + c] as u32;
            }
        }
        for x in 0..w {
            let out = row + (x as usize) * 4;
            for c in 0..4 {
                dst[out + c] = ((acc[c] + div / 2) / div).min(255) as u8;
            }
            let incoming = x + r + 1;
            if incoming < w {
                let idx = row + (incoming as usize) * 4;
                for c in 0..4 {
                    acc[c] += src[idx + c] as u32;
                }
            }
            let outgoing = x - r;
            if outgoing >= 0 {
                let idx = row + (outgoing as usize) * 4;
                for c in 0..4 {
                    acc[c] -= src[idx + c] as u32;
                }
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let h = height as i64;
    let r = radius as i64;
    let div = (2 * r + 1) as u32;
    let at = |x: i64, y: i64| ((y * w + x) * 4) as usize;
    for x in 0..w {
        let mut acc = [0u32; 4];
        for y in 0..=r.min(h - 1) {
            let idx = at(x, y);
            for c in 0..4 {
                acc[c] += src[idx + c] as u32;
            }
        }
        for y in 0..h {
            let out = at(x, y);
            for c in 0..4 {
                dst[out + c] = ((acc[c] + div / 2) / div).min(255) as u8;
            }
            let incoming = y + r + 1;
            if incoming < h {
                let idx = at(x, incoming);
                for c in 0..4 {
                    acc[c] += src[idx + c] as u32;
                }
            }
            let outgoing = y - r;
            if outgoing >= 0 {
                let idx = at(x, outgoing);
                for c in 0..4 {
                    acc[c] -= src[idx + c] as u32;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_identity() {
        let mut data = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        blur_rgba8_premul(&mut data, 1, 2, 0.0);
        assert_eq!(data, vec![1u8, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn mismatched_buffer_is_left_alone() {
        let mut data = vec![9u8; 12];
        blur_rgba8_premul(&mut data, 2, 2, 3.0);
        assert_eq!(data, vec![9u8; 12]);
    }

    #[test]
    fn spreads_energy_from_single_pixel() {
        let (w, h) = (21u32, 21u32);
        let mut data = vec![0u8; (w * h * 4) as usize];
        let center = ((10 * w + 10) * 4) as usize;
        data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        blur_rgba8_premul(&mut data, w, h, 1.5);

        let nonzero = data.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert!(nonzero > 1);
        assert!(data[center + 3] < 255);
        // Corners stay empty.
        assert_eq!(data[3], 0);
    }

    #[test]
    fn interior_of_flat_region_is_preserved() {
        let (w, h) = (40u32, 40u32);
        let mut data = vec![0u8; (w * h * 4) as usize];
        for y in 5..35 {
            for x in 5..35 {
                let idx = ((y * w + x) * 4) as usize;
                data[idx..idx + 4].copy_from_slice(&[100, 50, 25, 200]);
            }
        }
        blur_rgba8_premul(&mut data, w, h, 1.0);
        let idx = ((20 * w + 20) * 4) as usize;
        assert_eq!(&data[idx..idx + 4], &[100, 50, 25, 200]);
    }

    #[test]
    fn box_radii_grow_with_sigma() {
        let small = box_radii(1.0).iter().sum::<u32>();
        let large = box_radii(10.0).iter().sum::<u32>();
        assert!(large > small);
    }

    #[test]
    fn extent_covers_three_sigma() {
        assert_eq!(blur_extent(0.0), 0);
        assert!(blur_extent(5.0) >= 15);
    }
}
