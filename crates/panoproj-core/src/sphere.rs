//! Equirectangular sphere representation.
//!
//! Longitude maps linearly to column, latitude (inverted) to row. The
//! panorama is viewed from inside the sphere looking out, so the image's
//! left-to-right order runs clockwise when seen from the center — the
//! negated `y` below encodes that; dropping the sign mirrors the output
//! horizontally.

use std::f64::consts::{FRAC_PI_2, PI};

use image::{Rgb, RgbImage};
use nalgebra::Vector3;

use crate::error::ProjectError;
use crate::projector::{ColorSampler, DirectionSampler};
use crate::rescale::rescale;
use crate::sample::bilinear_sample_rgb;
use crate::GridShape;

/// A unit sphere textured with a 2:1 equirectangular panorama.
#[derive(Debug, Clone)]
pub struct EquirectSphere {
    shape: GridShape,
    image: Option<RgbImage>,
}

impl EquirectSphere {
    pub const DEFAULT_SHAPE: GridShape = GridShape {
        height: 1800,
        width: 3600,
    };

    /// Read-mode sphere wrapping an equirectangular panorama. The image
    /// must have a 2:1 width:height aspect ratio.
    pub fn from_image(image: RgbImage) -> Result<Self, ProjectError> {
        let shape = GridShape::of_image(&image);
        shape.ensure_sampleable()?;
        if shape.width != 2 * shape.height {
            return Err(ProjectError::DegenerateInput(format!(
                "equirectangular input must be 2:1, got {}",
                shape
            )));
        }
        Ok(Self {
            shape,
            image: Some(image),
        })
    }

    /// Write-mode sphere: an empty grid of `shape`, to be filled by one
    /// projection pass.
    pub fn with_shape(shape: GridShape) -> Result<Self, ProjectError> {
        shape.ensure_sampleable()?;
        Ok(Self { shape, image: None })
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    pub(crate) fn replace_image(&mut self, image: RgbImage) -> Result<(), ProjectError> {
        let got = GridShape::of_image(&image);
        if got != self.shape {
            return Err(ProjectError::DegenerateInput(format!(
                "projected grid is {}, sphere expects {}",
                got, self.shape
            )));
        }
        self.image = Some(image);
        Ok(())
    }
}

impl DirectionSampler for EquirectSphere {
    fn shape(&self) -> GridShape {
        self.shape
    }

    fn to_direction(&self, row: f64, col: f64) -> Vector3<f64> {
        let longitude = rescale(0.0, (self.shape.width - 1) as f64, -PI, PI, col);
        let latitude = rescale(0.0, (self.shape.height - 1) as f64, FRAC_PI_2, -FRAC_PI_2, row);
        // horizontal radius at this latitude
        let s = latitude.cos();
        Vector3::new(s * longitude.cos(), -s * longitude.sin(), latitude.sin())
    }

    fn to_pixel(&self, direction: &Vector3<f64>) -> [f64; 2] {
        // atan2(-y, x) inverts the clockwise longitude above; atan2(y, x)
        // mirrors and atan2(x, y) rotates by a quarter turn, neither
        // round-trips (see DESIGN.md). At the poles x ≈ y ≈ 0 and the
        // longitude is undefined; any value is acceptable there since a
        // pole maps to a single row regardless of column.
        let longitude = (-direction.y).atan2(direction.x);
        let s = (direction.x * direction.x + direction.y * direction.y).sqrt();
        let latitude = direction.z.atan2(s);
        let row = rescale(-FRAC_PI_2, FRAC_PI_2, (self.shape.height - 1) as f64, 0.0, latitude);
        let col = rescale(-PI, PI, 0.0, (self.shape.width - 1) as f64, longitude);
        [row, col]
    }
}

impl ColorSampler for EquirectSphere {
    fn sample_color(&self, direction: &Vector3<f64>) -> Option<Rgb<u8>> {
        let img = self.image.as_ref()?;
        let [row, col] = self.to_pixel(direction);
        Some(bilinear_sample_rgb(img, row, col))
    }
}
