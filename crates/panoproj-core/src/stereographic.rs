//! Two-hemisphere stereographic representation.
//!
//! Both hemispheres share one plane through the origin with `u = +x`,
//! `v = +y`; a direction's `z` sign selects which hemisphere image it is
//! sampled from. The two-pole forward map sends `(x, y, z)` and
//! `(x, y, -z)` to the same planar point, so the equator seam is
//! continuous across the pair.

use image::{Rgb, RgbImage};
use nalgebra::Vector3;

use crate::convert::Format;
use crate::error::ProjectError;
use crate::plane::ImagePlane;
use crate::projector::{project_stereographic, resample, ColorSampler};
use crate::sphere::EquirectSphere;
use crate::GridShape;

/// North/south stereographic hemisphere pair.
#[derive(Debug, Clone)]
pub struct Stereographic {
    north: ImagePlane,
    south: ImagePlane,
}

fn hemisphere_plane_with_image(image: RgbImage) -> ImagePlane {
    ImagePlane::with_image(Vector3::zeros(), Vector3::x(), Vector3::y(), image)
}

impl Stereographic {
    /// Read-mode pair wrapping north and south hemisphere images. The two
    /// images must share one shape.
    pub fn from_images(north: RgbImage, south: RgbImage) -> Result<Self, ProjectError> {
        let north_shape = GridShape::of_image(&north);
        let south_shape = GridShape::of_image(&south);
        if north_shape != south_shape {
            return Err(ProjectError::DegenerateInput(format!(
                "hemisphere images differ in shape: north {}, south {}",
                north_shape, south_shape
            )));
        }
        north_shape.ensure_sampleable()?;
        Ok(Self {
            north: hemisphere_plane_with_image(north),
            south: hemisphere_plane_with_image(south),
        })
    }

    /// Write-mode pair: two empty hemisphere grids of `shape`.
    pub fn with_shape(shape: GridShape) -> Result<Self, ProjectError> {
        shape.ensure_sampleable()?;
        let plane = || ImagePlane::new(Vector3::zeros(), Vector3::x(), Vector3::y(), shape);
        Ok(Self {
            north: plane(),
            south: plane(),
        })
    }

    pub fn north(&self) -> &ImagePlane {
        &self.north
    }

    pub fn south(&self) -> &ImagePlane {
        &self.south
    }

    /// Fill `sphere` from the hemisphere pair: every sphere pixel's
    /// direction is collapsed onto the shared plane and the hemisphere
    /// selected by its `z` sign is bilinearly resampled there.
    pub fn unproject_to(&self, sphere: &mut EquirectSphere) -> Result<(), ProjectError> {
        let image = resample(sphere, self, |d| *d)?;
        sphere.replace_image(image)
    }

    /// Sphere → stereographic projection is not implemented.
    pub fn project_from(&mut self, _sphere: &EquirectSphere) -> Result<(), ProjectError> {
        Err(ProjectError::UnsupportedConversion {
            from: Format::Sphere,
            to: Format::Stereographic,
        })
    }
}

impl ColorSampler for Stereographic {
    fn sample_color(&self, direction: &Vector3<f64>) -> Option<Rgb<u8>> {
        let planar = project_stereographic(direction);
        // z ≥ 0 selects the northern image. Both hemispheres project to
        // the same planar point, so the choice only changes which image
        // backs the lookup, never where it lands.
        let hemisphere = if direction.z >= 0.0 {
            &self.north
        } else {
            &self.south
        };
        hemisphere.sample_color(&planar)
    }
}
