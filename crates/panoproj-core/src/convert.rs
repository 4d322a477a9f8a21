//! Conversion dispatch: which format pairs have an implemented projection.

use crate::error::ProjectError;

/// Panorama representation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// One 2:1 equirectangular panorama.
    Sphere,
    /// Two same-shape hemisphere images, north then south.
    Stereographic,
    /// Six square cube-face images.
    Cubemap,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Stereographic => "stereographic",
            Self::Cubemap => "cubemap",
        }
    }

    /// Number of images the format is made of.
    pub fn image_count(self) -> usize {
        match self {
            Self::Sphere => 1,
            Self::Stereographic => 2,
            Self::Cubemap => 6,
        }
    }
}

/// A resolved, implemented conversion. Callers resolve the format pair
/// first and only then load/allocate grids, so an unsupported pair never
/// produces partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Input format equals output format: write the inputs through
    /// unchanged, no projection pass.
    Identity,
    /// Equirectangular sphere → six cube faces (gnomonic unprojection).
    SphereToCubemap,
    /// Stereographic hemisphere pair → equirectangular sphere.
    StereographicToSphere,
}

impl Conversion {
    /// Map a format pair to its implemented conversion.
    ///
    /// The missing directions (cubemap → sphere, sphere → stereographic,
    /// stereographic → cubemap) report [`ProjectError::UnsupportedConversion`].
    pub fn resolve(input: Format, output: Format) -> Result<Conversion, ProjectError> {
        match (input, output) {
            (i, o) if i == o => Ok(Conversion::Identity),
            (Format::Sphere, Format::Cubemap) => Ok(Conversion::SphereToCubemap),
            (Format::Stereographic, Format::Sphere) => Ok(Conversion::StereographicToSphere),
            (from, to) => Err(ProjectError::UnsupportedConversion { from, to }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_pairs_resolve() {
        assert_eq!(
            Conversion::resolve(Format::Sphere, Format::Cubemap),
            Ok(Conversion::SphereToCubemap)
        );
        assert_eq!(
            Conversion::resolve(Format::Stereographic, Format::Sphere),
            Ok(Conversion::StereographicToSphere)
        );
    }

    #[test]
    fn same_format_is_identity_not_a_projection() {
        assert_eq!(
            Conversion::resolve(Format::Sphere, Format::Sphere),
            Ok(Conversion::Identity)
        );
    }

    #[test]
    fn stereographic_to_cubemap_is_unsupported() {
        assert_eq!(
            Conversion::resolve(Format::Stereographic, Format::Cubemap),
            Err(ProjectError::UnsupportedConversion {
                from: Format::Stereographic,
                to: Format::Cubemap,
            })
        );
    }

    #[test]
    fn cubemap_to_sphere_is_unsupported() {
        assert!(Conversion::resolve(Format::Cubemap, Format::Sphere).is_err());
    }
}
