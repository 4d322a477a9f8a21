//! Cross-representation projection: fill a destination pixel grid by
//! tracing every pixel back to source direction space and resampling.

use image::{Rgb, RgbImage};
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::error::ProjectError;
use crate::GridShape;

/// Bidirectional mapping between a representation's pixel grid and 3D
/// directions from the shared viewer origin.
///
/// `to_pixel(to_direction(row, col))` recovers `(row, col)` for any
/// in-range pixel, up to floating-point tolerance and the representation's
/// documented degeneracies (the sphere's poles).
pub trait DirectionSampler {
    /// Shape of the representation's pixel grid.
    fn shape(&self) -> GridShape;

    /// Direction represented by pixel `(row, col)`. Planar representations
    /// return the unnormalized point on their plane; the sphere returns a
    /// unit vector.
    fn to_direction(&self, row: f64, col: f64) -> Vector3<f64>;

    /// Fractional `(row, col)` the direction maps to in this
    /// representation's own grid.
    fn to_pixel(&self, direction: &Vector3<f64>) -> [f64; 2];
}

/// Continuous color lookup by direction.
///
/// Returns `None` when the representation was constructed without backing
/// pixel data (a write-mode container used as a source).
pub trait ColorSampler {
    fn sample_color(&self, direction: &Vector3<f64>) -> Option<Rgb<u8>>;
}

/// Project a planar point onto the unit sphere through the sphere center.
///
/// Central projection is direction-preserving: every point on a half-line
/// from the origin normalizes to the same sphere direction, so cube-face
/// planar points and their sphere directions are related purely by
/// normalization.
#[inline]
pub fn unproject_gnomonic(point: &Vector3<f64>) -> Vector3<f64> {
    *point / point.norm()
}

/// Two-pole stereographic forward map: collapse a sphere direction onto
/// the shared hemisphere plane.
///
/// `(x, y, z)` and `(x, y, -z)` land on the same planar point; the sign of
/// `z` selects which hemisphere image the point is sampled from.
#[inline]
pub fn project_stereographic(direction: &Vector3<f64>) -> Vector3<f64> {
    let denom = 1.0 + direction.z.abs();
    Vector3::new(direction.x / denom, direction.y / denom, 0.0)
}

/// Fill a grid of `destination`'s shape from `source`.
///
/// For every destination pixel: compute the destination direction, map it
/// through `transform` into the source's direction space, and bilinearly
/// resample the source there. Destination rows are processed in parallel;
/// each row is written by exactly one worker and the source is only read,
/// so the result is identical to the sequential per-pixel loop.
pub fn resample<D, S, T>(
    destination: &D,
    source: &S,
    transform: T,
) -> Result<RgbImage, ProjectError>
where
    D: DirectionSampler + Sync,
    S: ColorSampler + Sync,
    T: Fn(&Vector3<f64>) -> Vector3<f64> + Sync,
{
    let shape = destination.shape();
    shape.ensure_sampleable()?;
    let width = shape.width as usize;
    let mut buf = vec![0u8; shape.height as usize * width * 3];

    buf.par_chunks_mut(width * 3)
        .enumerate()
        .try_for_each(|(row, row_buf)| {
            for col in 0..width {
                let dir = destination.to_direction(row as f64, col as f64);
                let src_dir = transform(&dir);
                let Rgb(rgb) = source
                    .sample_color(&src_dir)
                    .ok_or(ProjectError::MissingPixelData("projection source"))?;
                row_buf[col * 3..col * 3 + 3].copy_from_slice(&rgb);
            }
            Ok(())
        })?;

    Ok(RgbImage::from_raw(shape.width, shape.height, buf)
        .expect("buffer sized to destination shape"))
}
