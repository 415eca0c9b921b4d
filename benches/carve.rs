#[macro_use]
extern crate criterion;

use criterion::Criterion;
use image::{Rgba, RgbaImage};
use seamcarve::{CancellationToken, PixelGrid, SeamCarver};

fn bench_carve(c: &mut Criterion) {
    let image = RgbaImage::from_fn(64, 64, |x, y| {
        Rgba([
            ((x * 31 + y * 17) % 256) as u8,
            ((x * 13 + y * 7) % 256) as u8,
            ((x * 5 + y * 23) % 256) as u8,
            255,
        ])
    });

    c.bench_function("carve 8 seams from 64x64", move |b| {
        b.iter(|| {
            let mut carver = SeamCarver::new(PixelGrid::from_image(&image));
            carver.carve(8, &CancellationToken::new()).unwrap();
            carver.into_grid().working_width()
        })
    });
}

criterion_group!(benches, bench_carve);
criterion_main!(benches);
