//! panoproj CLI — convert between panoramic image representations.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use image::RgbImage;

use panoproj_core::{
    Conversion, CubeFace, Cubemap, EquirectSphere, Format, GridShape, ProjectError, Stereographic,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "panoproj")]
#[command(
    about = "Convert a 2:1 equirectangular panorama (e.g. from a 360° camera) to other formats such as a cubemap"
)]
#[command(version)]
struct Cli {
    /// Format of the input image(s).
    #[arg(value_enum)]
    input_format: InputFormatArg,

    /// Format of the output image(s). Not all combinations are supported.
    #[arg(value_enum)]
    output_format: OutputFormatArg,

    /// Input images: one equirectangular panorama for sphere, a north then
    /// a south hemisphere image for stereographic.
    #[arg(required = true)]
    input_images: Vec<PathBuf>,

    /// Output height and width if not the format default.
    #[arg(short = 's', long, num_args = 2, value_names = ["H", "W"])]
    output_shape: Option<Vec<u32>>,

    /// Filename prefix. With prefix `skybox`, cube faces are written as
    /// `output/skybox+x.png`, `output/skybox-x.png`, ...
    #[arg(short, long, default_value = "skybox")]
    prefix: String,

    /// Directory the output images are written into.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Path to write a JSON manifest of the produced files.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormatArg {
    Sphere,
    Stereographic,
}

impl InputFormatArg {
    fn to_core(self) -> Format {
        match self {
            Self::Sphere => Format::Sphere,
            Self::Stereographic => Format::Stereographic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Cubemap,
    Sphere,
}

impl OutputFormatArg {
    fn to_core(self) -> Format {
        match self {
            Self::Cubemap => Format::Cubemap,
            Self::Sphere => Format::Sphere,
        }
    }
}

#[derive(serde::Serialize)]
struct Manifest {
    input_format: Format,
    output_format: Format,
    outputs: Vec<ManifestEntry>,
}

#[derive(serde::Serialize)]
struct ManifestEntry {
    file: PathBuf,
    height: u32,
    width: u32,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> CliResult<()> {
    let input_format = cli.input_format.to_core();
    let output_format = cli.output_format.to_core();

    // Resolve the format pair before loading anything so an unsupported
    // request never produces partial output.
    let conversion = match Conversion::resolve(input_format, output_format) {
        Ok(conversion) => conversion,
        Err(err) => {
            tracing::error!("{}", err);
            return Err(err.into());
        }
    };

    let images = load_inputs(input_format, &cli.input_images)?;
    fs::create_dir_all(&cli.out_dir)?;

    let outputs = match conversion {
        Conversion::Identity => match cli.input_format {
            InputFormatArg::Sphere => write_identity_sphere(cli, images)?,
            InputFormatArg::Stereographic => write_identity_stereographic(cli, images)?,
        },
        Conversion::SphereToCubemap => convert_sphere_to_cubemap(cli, images)?,
        Conversion::StereographicToSphere => convert_stereographic_to_sphere(cli, images)?,
    };

    tracing::info!("wrote {} file(s) to {}", outputs.len(), cli.out_dir.display());

    if let Some(manifest_path) = &cli.manifest {
        write_manifest(manifest_path, input_format, output_format, outputs)?;
    }

    Ok(())
}

// ── input loading ──────────────────────────────────────────────────────

fn load_inputs(format: Format, paths: &[PathBuf]) -> CliResult<Vec<RgbImage>> {
    let expected = format.image_count();
    if paths.len() != expected {
        return Err(ProjectError::DegenerateInput(format!(
            "{} input expects {} image(s), got {}",
            format.label(),
            expected,
            paths.len()
        ))
        .into());
    }

    paths
        .iter()
        .map(|path| {
            tracing::info!("loading {}", path.display());
            let img = image::open(path).map_err(|e| -> CliError {
                format!("failed to open image {}: {}", path.display(), e).into()
            })?;
            Ok(img.to_rgb8())
        })
        .collect()
}

fn requested_shape(cli: &Cli, default: GridShape) -> GridShape {
    match cli.output_shape.as_deref() {
        Some([height, width]) => GridShape::new(*height, *width),
        _ => default,
    }
}

// ── conversions ────────────────────────────────────────────────────────

fn write_identity_sphere(cli: &Cli, mut images: Vec<RgbImage>) -> CliResult<Vec<ManifestEntry>> {
    tracing::info!("input format = output format, copying image through");
    let sphere = EquirectSphere::from_image(images.remove(0))?;
    let image = sphere.image().expect("read-mode sphere has pixel data");
    Ok(vec![write_image(image, &output_path(cli, ""))?])
}

fn write_identity_stereographic(
    cli: &Cli,
    mut images: Vec<RgbImage>,
) -> CliResult<Vec<ManifestEntry>> {
    tracing::info!("input format = output format, copying images through");
    let south = images.pop().expect("count validated at load");
    let north = images.pop().expect("count validated at load");
    let stereo = Stereographic::from_images(north, south)?;
    let north_image = stereo.north().image().expect("read-mode pair has pixel data");
    let south_image = stereo.south().image().expect("read-mode pair has pixel data");
    Ok(vec![
        write_image(north_image, &output_path(cli, "north"))?,
        write_image(south_image, &output_path(cli, "south"))?,
    ])
}

fn convert_sphere_to_cubemap(
    cli: &Cli,
    mut images: Vec<RgbImage>,
) -> CliResult<Vec<ManifestEntry>> {
    let sphere = EquirectSphere::from_image(images.remove(0))?;
    let shape = requested_shape(cli, Cubemap::DEFAULT_FACE_SHAPE);
    let mut cubemap = Cubemap::with_shape(shape)?;
    cubemap.project_from(&sphere)?;

    let mut outputs = Vec::with_capacity(CubeFace::ALL.len());
    for (face, plane) in cubemap.faces() {
        let image = plane.image().expect("projected face has pixel data");
        outputs.push(write_image(image, &output_path(cli, face.suffix()))?);
    }
    Ok(outputs)
}

fn convert_stereographic_to_sphere(
    cli: &Cli,
    mut images: Vec<RgbImage>,
) -> CliResult<Vec<ManifestEntry>> {
    let south = images.pop().expect("count validated at load");
    let north = images.pop().expect("count validated at load");
    let stereo = Stereographic::from_images(north, south)?;
    let shape = requested_shape(cli, EquirectSphere::DEFAULT_SHAPE);
    let mut sphere = EquirectSphere::with_shape(shape)?;
    stereo.unproject_to(&mut sphere)?;
    let image = sphere.image().expect("projected sphere has pixel data");
    Ok(vec![write_image(image, &output_path(cli, ""))?])
}

// ── output writing ─────────────────────────────────────────────────────

fn output_path(cli: &Cli, suffix: &str) -> PathBuf {
    cli.out_dir.join(format!("{}{}.png", cli.prefix, suffix))
}

fn write_image(image: &RgbImage, path: &Path) -> CliResult<ManifestEntry> {
    tracing::info!("writing {}", path.display());
    image.save(path).map_err(|e| -> CliError {
        format!("failed to write {}: {}", path.display(), e).into()
    })?;
    Ok(ManifestEntry {
        file: path.to_path_buf(),
        height: image.height(),
        width: image.width(),
    })
}

fn write_manifest(
    path: &Path,
    input_format: Format,
    output_format: Format,
    outputs: Vec<ManifestEntry>,
) -> CliResult<()> {
    let manifest = Manifest {
        input_format,
        output_format,
        outputs,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, &json)?;
    tracing::info!("manifest written to {}", path.display());
    Ok(())
}
