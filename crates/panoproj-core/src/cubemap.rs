//! Cube faces and the six-face cubemap container.

use nalgebra::Vector3;

use crate::convert::Format;
use crate::error::ProjectError;
use crate::plane::ImagePlane;
use crate::projector::{resample, unproject_gnomonic};
use crate::sphere::EquirectSphere;
use crate::GridShape;

/// The six axis-aligned cube faces, keyed by outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// All faces, in output order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Filename suffix expected by cubemap consumers.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::PosX => "+x",
            Self::NegX => "-x",
            Self::PosY => "+y",
            Self::NegY => "-y",
            Self::PosZ => "+z",
            Self::NegZ => "-z",
        }
    }

    /// Outward face normal.
    pub fn center(self) -> Vector3<f64> {
        match self {
            Self::PosX => Vector3::new(1.0, 0.0, 0.0),
            Self::NegX => Vector3::new(-1.0, 0.0, 0.0),
            Self::PosY => Vector3::new(0.0, 1.0, 0.0),
            Self::NegY => Vector3::new(0.0, -1.0, 0.0),
            Self::PosZ => Vector3::new(0.0, 0.0, 1.0),
            Self::NegZ => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// U basis vector (increasing column). The axes are oriented for the
    /// inside of the cube, so every face satisfies `u × v = -center`.
    pub fn u_dir(self) -> Vector3<f64> {
        match self {
            Self::PosX => Vector3::new(0.0, 0.0, -1.0),
            Self::NegX => Vector3::new(0.0, 0.0, 1.0),
            Self::PosY => Vector3::new(1.0, 0.0, 0.0),
            Self::NegY => Vector3::new(1.0, 0.0, 0.0),
            Self::PosZ => Vector3::new(1.0, 0.0, 0.0),
            Self::NegZ => Vector3::new(-1.0, 0.0, 0.0),
        }
    }

    /// V basis vector (decreasing row).
    pub fn v_dir(self) -> Vector3<f64> {
        match self {
            Self::PosX => Vector3::new(0.0, -1.0, 0.0),
            Self::NegX => Vector3::new(0.0, -1.0, 0.0),
            Self::PosY => Vector3::new(0.0, 0.0, 1.0),
            Self::NegY => Vector3::new(0.0, 0.0, -1.0),
            Self::PosZ => Vector3::new(0.0, -1.0, 0.0),
            Self::NegZ => Vector3::new(0.0, -1.0, 0.0),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosY => 2,
            Self::NegY => 3,
            Self::PosZ => 4,
            Self::NegZ => 5,
        }
    }
}

/// Six cube-face image planes covering all directions from the viewer.
#[derive(Debug, Clone)]
pub struct Cubemap {
    faces: [ImagePlane; 6],
}

impl Cubemap {
    pub const DEFAULT_FACE_SHAPE: GridShape = GridShape {
        height: 2048,
        width: 2048,
    };

    /// Write-mode cubemap: six empty faces of `shape`, to be filled by
    /// [`Cubemap::project_from`].
    pub fn with_shape(shape: GridShape) -> Result<Self, ProjectError> {
        shape.ensure_sampleable()?;
        Ok(Self {
            faces: CubeFace::ALL
                .map(|face| ImagePlane::new(face.center(), face.u_dir(), face.v_dir(), shape)),
        })
    }

    pub fn face(&self, face: CubeFace) -> &ImagePlane {
        &self.faces[face.index()]
    }

    /// Faces paired with their identifiers, in output order.
    pub fn faces(&self) -> impl Iterator<Item = (CubeFace, &ImagePlane)> + '_ {
        CubeFace::ALL.into_iter().map(|f| (f, self.face(f)))
    }

    /// Fill all six faces from an equirectangular sphere: each face pixel's
    /// planar point is gnomonically unprojected onto the sphere and the
    /// panorama is bilinearly resampled there.
    pub fn project_from(&mut self, sphere: &EquirectSphere) -> Result<(), ProjectError> {
        for face in CubeFace::ALL {
            tracing::info!("projecting face {}", face.suffix());
            let plane = &self.faces[face.index()];
            let image = resample(plane, sphere, unproject_gnomonic)?;
            self.faces[face.index()].replace_image(image)?;
        }
        Ok(())
    }

    /// Cubemap → sphere unprojection is not implemented: there is no
    /// per-direction face dispatch yet.
    pub fn unproject_to(&self, _sphere: &mut EquirectSphere) -> Result<(), ProjectError> {
        Err(ProjectError::UnsupportedConversion {
            from: Format::Cubemap,
            to: Format::Sphere,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::DirectionSampler;
    use image::{Rgb, RgbImage};

    #[test]
    fn face_bases_are_orthonormal() {
        for face in CubeFace::ALL {
            let (c, u, v) = (face.center(), face.u_dir(), face.v_dir());
            assert!((c.norm() - 1.0).abs() < 1e-12, "{}", face.suffix());
            assert!((u.norm() - 1.0).abs() < 1e-12, "{}", face.suffix());
            assert!((v.norm() - 1.0).abs() < 1e-12, "{}", face.suffix());
            assert_eq!(c.dot(&u), 0.0, "{}", face.suffix());
            assert_eq!(c.dot(&v), 0.0, "{}", face.suffix());
            assert_eq!(u.dot(&v), 0.0, "{}", face.suffix());
        }
    }

    #[test]
    fn face_handedness_is_consistent() {
        // Same convention on all six faces: the UV frame is oriented for
        // the inside of the cube, u × v points back at the viewer.
        for face in CubeFace::ALL {
            let cross = face.u_dir().cross(&face.v_dir());
            assert!(
                (cross + face.center()).norm() < 1e-12,
                "u x v != -center for {}",
                face.suffix()
            );
        }
    }

    #[test]
    fn suffixes_follow_the_axis_names() {
        let suffixes: Vec<_> = CubeFace::ALL.iter().map(|f| f.suffix()).collect();
        assert_eq!(suffixes, ["+x", "-x", "+y", "-y", "+z", "-z"]);
    }

    #[test]
    fn solid_color_sphere_projects_to_solid_color_faces() {
        let mut img = RgbImage::new(360, 180);
        for px in img.pixels_mut() {
            *px = Rgb([200, 50, 50]);
        }
        let sphere = EquirectSphere::from_image(img).expect("2:1 input");
        let mut cubemap = Cubemap::with_shape(GridShape::new(64, 64)).expect("shape");
        cubemap.project_from(&sphere).expect("projection");

        for (face, plane) in cubemap.faces() {
            let image = plane.image().expect("face filled");
            assert_eq!(image.dimensions(), (64, 64));
            assert!(
                image.pixels().all(|p| *p == Rgb([200, 50, 50])),
                "face {} not solid",
                face.suffix()
            );
        }
    }

    #[test]
    fn center_marker_lands_in_plus_x_only() {
        // White 4x4 block around the grid center (longitude 0, latitude 0,
        // i.e. direction +x) on an otherwise black panorama.
        let mut img = RgbImage::new(360, 180);
        for row in 88..=91u32 {
            for col in 178..=181u32 {
                img.put_pixel(col, row, Rgb([255, 255, 255]));
            }
        }
        let sphere = EquirectSphere::from_image(img).expect("2:1 input");
        let mut cubemap = Cubemap::with_shape(GridShape::new(64, 64)).expect("shape");
        cubemap.project_from(&sphere).expect("projection");

        let plus_x = cubemap.face(CubeFace::PosX).image().expect("face filled");
        for (row, col) in [(31, 31), (31, 32), (32, 31), (32, 32)] {
            assert_eq!(
                *plus_x.get_pixel(col, row),
                Rgb([255, 255, 255]),
                "+x center pixel ({}, {})",
                row,
                col
            );
        }
        assert_eq!(*plus_x.get_pixel(0, 0), Rgb([0, 0, 0]));

        for face in [
            CubeFace::NegX,
            CubeFace::PosY,
            CubeFace::NegY,
            CubeFace::PosZ,
            CubeFace::NegZ,
        ] {
            let image = cubemap.face(face).image().expect("face filled");
            assert!(
                image.pixels().all(|p| *p == Rgb([0, 0, 0])),
                "marker leaked into face {}",
                face.suffix()
            );
        }
    }

    #[test]
    fn face_shape_is_preserved_regardless_of_source_shape() {
        let sphere = EquirectSphere::from_image(RgbImage::new(64, 32)).expect("2:1 input");
        let mut cubemap = Cubemap::with_shape(GridShape::new(16, 24)).expect("shape");
        cubemap.project_from(&sphere).expect("projection");
        for (_, plane) in cubemap.faces() {
            assert_eq!(plane.shape(), GridShape::new(16, 24));
            assert_eq!(plane.image().expect("face filled").dimensions(), (24, 16));
        }
    }

    #[test]
    fn unprojection_to_sphere_is_unsupported() {
        let cubemap = Cubemap::with_shape(GridShape::new(8, 8)).expect("shape");
        let mut sphere =
            EquirectSphere::with_shape(EquirectSphere::DEFAULT_SHAPE).expect("shape");
        assert_eq!(
            cubemap.unproject_to(&mut sphere),
            Err(ProjectError::UnsupportedConversion {
                from: Format::Cubemap,
                to: Format::Sphere,
            })
        );
    }
}
