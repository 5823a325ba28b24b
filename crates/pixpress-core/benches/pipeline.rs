//! Benchmarks for the pixpress compression pipeline.
//!
//! Run with: cargo bench -p pixpress-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, RgbImage};
use pixpress_core::config::ProcessingConfig;
use pixpress_core::pipeline::{Codec, FitBox, ImageDecoder};
use pixpress_core::{CompressRequest, Compressor, Config};

fn sample_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn benchmark_decode(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.png");
    sample_image(1920, 1080)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();

    c.bench_function("decode_png_1080p", |b| {
        b.iter(|| {
            let _ = ImageDecoder::decode(black_box(&path));
        })
    });
}

fn benchmark_resize(c: &mut Criterion) {
    let img = sample_image(1920, 1080);
    let fit = FitBox::new(800, 800);

    c.bench_function("fit_resize_1080p_to_800", |b| {
        b.iter(|| {
            let _ = fit.apply(black_box(img.clone()));
        })
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let img = sample_image(800, 450);

    for (name, codec) in [
        ("encode_webp_q80", Codec::WebP { quality: 80 }),
        ("encode_jpeg_q80", Codec::Jpeg { quality: 80 }),
        ("encode_png", Codec::Png),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let _ = codec.encode(black_box(&img));
            })
        });
    }
}

fn benchmark_batch(c: &mut Criterion) {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    for i in 0..16 {
        sample_image(320, 240)
            .save_with_format(input.path().join(format!("{}.png", i)), ImageFormat::Png)
            .unwrap();
    }

    let compressor = Compressor::new(Config {
        processing: ProcessingConfig {
            parallel_workers: 4,
            ..Default::default()
        },
        ..Default::default()
    });
    let request = CompressRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        format: "webp".to_string(),
        quality: 80,
        max_width: 160,
        max_height: 0,
    };
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("batch_16_png_to_webp", |b| {
        b.iter(|| {
            let _ = rt.block_on(compressor.compress(black_box(request.clone())));
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_resize,
    benchmark_encode,
    benchmark_batch,
);
criterion_main!(benches);
