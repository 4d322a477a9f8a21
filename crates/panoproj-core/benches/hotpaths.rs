use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};

use panoproj_core::{
    bilinear_sample_rgb, resample, unproject_gnomonic, CubeFace, EquirectSphere, GridShape,
    ImagePlane,
};

fn gradient_panorama(height: u32, width: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
    }
    img
}

fn bench_bilinear_sample(c: &mut Criterion) {
    let img = gradient_panorama(512, 1024);
    c.bench_function("bilinear_sample_rgb", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..1000 {
                let row = (i as f64) * 0.511;
                let col = (i as f64) * 1.021;
                let Rgb(px) = bilinear_sample_rgb(black_box(&img), row, col);
                acc = acc.wrapping_add(px[0] as u32);
            }
            acc
        })
    });
}

fn bench_sphere_to_face(c: &mut Criterion) {
    let sphere = EquirectSphere::from_image(gradient_panorama(512, 1024)).expect("2:1 input");
    let face = CubeFace::PosX;
    let plane = ImagePlane::new(
        face.center(),
        face.u_dir(),
        face.v_dir(),
        GridShape::new(256, 256),
    );
    c.bench_function("resample_sphere_to_face_256", |b| {
        b.iter(|| resample(black_box(&plane), black_box(&sphere), unproject_gnomonic))
    });
}

criterion_group!(benches, bench_bilinear_sample, bench_sphere_to_face);
criterion_main!(benches);
