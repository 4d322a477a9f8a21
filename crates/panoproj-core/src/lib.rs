//! panoproj-core — geometry and resampling for panoramic image conversion.
//!
//! Every supported panorama format samples the same sphere of incoming
//! light through a different mapping from 2D pixel grid to 3D direction.
//! Conversion traces each destination pixel back through those mappings:
//!
//! 1. **Rescale** – linear pixel ↔ angle/UV range remapping.
//! 2. **Direction samplers** – per-representation `(row, col)` ↔ direction
//!    mappings: equirectangular sphere, axis-aligned cube face,
//!    stereographic hemisphere plane.
//! 3. **Projector** – generic destination-grid resampling through an
//!    inter-representation direction transform, with bilinear color lookup
//!    in the source grid.
//! 4. **Containers** – [`EquirectSphere`], [`Cubemap`] and [`Stereographic`]
//!    own the pixel grids and orchestrate whole-image conversions.

pub mod convert;
pub mod cubemap;
pub mod error;
pub mod plane;
pub mod projector;
pub mod rescale;
pub mod sample;
pub mod sphere;
pub mod stereographic;

pub use convert::{Conversion, Format};
pub use cubemap::{CubeFace, Cubemap};
pub use error::ProjectError;
pub use plane::ImagePlane;
pub use projector::{
    project_stereographic, resample, unproject_gnomonic, ColorSampler, DirectionSampler,
};
pub use sample::bilinear_sample_rgb;
pub use sphere::EquirectSphere;
pub use stereographic::Stereographic;

/// Height × width of a pixel grid. Row index increases downward, column
/// increases rightward; a grid's shape is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    pub height: u32,
    pub width: u32,
}

impl GridShape {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    pub fn of_image(image: &image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self { height, width }
    }

    /// UV mapping and bilinear lookup need at least two samples per axis.
    pub fn ensure_sampleable(self) -> Result<(), ProjectError> {
        if self.height < 2 || self.width < 2 {
            return Err(ProjectError::DegenerateInput(format!(
                "grid must be at least 2x2, got {}x{}",
                self.height, self.width
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
