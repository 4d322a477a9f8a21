//! Bilinear color sampling of RGB pixel grids.

use image::{Rgb, RgbImage};

/// Sample an RGB image at fractional `(row, col)` by bilinear interpolation
/// of the 4 nearest pixels.
///
/// Coordinates outside `[0, H-1] × [0, W-1]` are clamped to the border
/// before interpolation (clamp, not wrap), so every finite coordinate
/// yields a color.
#[inline]
pub fn bilinear_sample_rgb(img: &RgbImage, row: f64, col: f64) -> Rgb<u8> {
    let (w, h) = img.dimensions();
    let max_row = (h - 1) as f64;
    let max_col = (w - 1) as f64;
    let row = row.clamp(0.0, max_row);
    let col = col.clamp(0.0, max_col);

    let r0 = row.floor();
    let c0 = col.floor();
    let r1 = (r0 + 1.0).min(max_row);
    let c1 = (c0 + 1.0).min(max_col);
    let fr = row - r0;
    let fc = col - c0;

    let p00 = img.get_pixel(c0 as u32, r0 as u32).0;
    let p10 = img.get_pixel(c1 as u32, r0 as u32).0;
    let p01 = img.get_pixel(c0 as u32, r1 as u32).0;
    let p11 = img.get_pixel(c1 as u32, r1 as u32).0;

    let mut out = [0u8; 3];
    for ch in 0..3 {
        let top = (1.0 - fc) * p00[ch] as f64 + fc * p10[ch] as f64;
        let bottom = (1.0 - fc) * p01[ch] as f64 + fc * p11[ch] as f64;
        out[ch] = ((1.0 - fr) * top + fr * bottom).round() as u8;
    }
    Rgb(out)
}
