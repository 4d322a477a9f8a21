//! Planar image representation: a pixel grid embedded in 3D by an origin
//! and a U/V basis. Cube faces and stereographic hemispheres are both
//! image planes; only their bases differ.

use image::{Rgb, RgbImage};
use nalgebra::Vector3;

use crate::error::ProjectError;
use crate::projector::{ColorSampler, DirectionSampler};
use crate::rescale::rescale;
use crate::sample::bilinear_sample_rgb;
use crate::GridShape;

/// A pixel grid embedded in 3D space.
///
/// `center` is the plane origin, `u_dir` points along increasing column
/// (u = -1 at column 0, u = +1 at the last column) and `v_dir` along
/// decreasing row (v = +1 at row 0, the image top). For cube faces the
/// basis is three pairwise-orthogonal unit vectors with `center` the
/// outward face normal; stereographic hemispheres use a plane through the
/// origin. Directions produced here are planar points, not unit vectors.
#[derive(Debug, Clone)]
pub struct ImagePlane {
    center: Vector3<f64>,
    u_dir: Vector3<f64>,
    v_dir: Vector3<f64>,
    shape: GridShape,
    image: Option<RgbImage>,
}

impl ImagePlane {
    /// Write-mode plane: an empty grid of `shape`, to be filled by one
    /// projection pass.
    pub fn new(
        center: Vector3<f64>,
        u_dir: Vector3<f64>,
        v_dir: Vector3<f64>,
        shape: GridShape,
    ) -> Self {
        Self {
            center,
            u_dir,
            v_dir,
            shape,
            image: None,
        }
    }

    /// Read-mode plane wrapping an existing image.
    pub fn with_image(
        center: Vector3<f64>,
        u_dir: Vector3<f64>,
        v_dir: Vector3<f64>,
        image: RgbImage,
    ) -> Self {
        Self {
            center,
            u_dir,
            v_dir,
            shape: GridShape::of_image(&image),
            image: Some(image),
        }
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    /// Whole-grid replace after a projection pass. The image must match
    /// the plane's fixed shape.
    pub(crate) fn replace_image(&mut self, image: RgbImage) -> Result<(), ProjectError> {
        let got = GridShape::of_image(&image);
        if got != self.shape {
            return Err(ProjectError::DegenerateInput(format!(
                "projected grid is {}, plane expects {}",
                got, self.shape
            )));
        }
        self.image = Some(image);
        Ok(())
    }
}

impl DirectionSampler for ImagePlane {
    fn shape(&self) -> GridShape {
        self.shape
    }

    fn to_direction(&self, row: f64, col: f64) -> Vector3<f64> {
        let u = rescale(0.0, (self.shape.width - 1) as f64, -1.0, 1.0, col);
        let v = rescale(0.0, (self.shape.height - 1) as f64, 1.0, -1.0, row);
        self.center + self.u_dir * u + self.v_dir * v
    }

    fn to_pixel(&self, direction: &Vector3<f64>) -> [f64; 2] {
        // Valid because the basis is orthonormal: dot products recover (u, v).
        let offset = direction - self.center;
        let u = offset.dot(&self.u_dir);
        let v = offset.dot(&self.v_dir);
        let row = rescale(-1.0, 1.0, (self.shape.height - 1) as f64, 0.0, v);
        let col = rescale(-1.0, 1.0, 0.0, (self.shape.width - 1) as f64, u);
        [row, col]
    }
}

impl ColorSampler for ImagePlane {
    fn sample_color(&self, direction: &Vector3<f64>) -> Option<Rgb<u8>> {
        let img = self.image.as_ref()?;
        let [row, col] = self.to_pixel(direction);
        Some(bilinear_sample_rgb(img, row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_plane(shape: GridShape) -> ImagePlane {
        ImagePlane::new(Vector3::zeros(), Vector3::x(), Vector3::y(), shape)
    }

    #[test]
    fn corners_map_to_uv_extremes() {
        let plane = unit_plane(GridShape::new(5, 9));
        // row 0 = top = v = +1, col 0 = left = u = -1
        let top_left = plane.to_direction(0.0, 0.0);
        assert!((top_left - Vector3::new(-1.0, 1.0, 0.0)).norm() < 1e-12);
        let bottom_right = plane.to_direction(4.0, 8.0);
        assert!((bottom_right - Vector3::new(1.0, -1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn offset_plane_adds_center() {
        let plane = ImagePlane::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, -1.0, 0.0),
            GridShape::new(3, 3),
        );
        let mid = plane.to_direction(1.0, 1.0);
        assert!((mid - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn pixel_direction_round_trip() {
        let plane = ImagePlane::new(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            GridShape::new(17, 33),
        );
        for row in [0u32, 1, 8, 15, 16] {
            for col in [0u32, 5, 16, 31, 32] {
                let dir = plane.to_direction(row as f64, col as f64);
                let [r, c] = plane.to_pixel(&dir);
                assert!((r - row as f64).abs() < 1e-9, "row {} -> {}", row, r);
                assert!((c - col as f64).abs() < 1e-9, "col {} -> {}", col, c);
            }
        }
    }

    #[test]
    fn sample_color_without_backing_image_is_none() {
        let plane = unit_plane(GridShape::new(4, 4));
        assert!(plane.sample_color(&Vector3::zeros()).is_none());
    }
}
