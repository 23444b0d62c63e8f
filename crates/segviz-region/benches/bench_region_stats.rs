use criterion::{criterion_group, criterion_main, Criterion};
use segviz_image::{Image, ImageSize, LabelMap};
use segviz_region::{
    palette::Palette,
    render::{render_mean_color, render_palette},
    stats::RegionStats,
    ExecutionStrategy,
};
use std::hint::black_box;

fn bench_size(c: &mut Criterion, width: usize, height: usize) {
    let size = ImageSize { width, height };
    let num_regions = 800;

    let mut data = vec![0u8; size.num_pixels() * 3];
    for (i, px) in data.iter_mut().enumerate() {
        *px = (i % 255) as u8;
    }
    let image = Image::new(size, 3, data).unwrap();

    // square blocks, roughly the layout of a superpixel segmentation
    let cell = ((size.num_pixels() / num_regions) as f64).sqrt().max(1.0) as usize;
    let cols = width.div_ceil(cell);
    let labels = LabelMap::new(
        size,
        (0..size.num_pixels())
            .map(|i| (((i / width) / cell * cols + (i % width) / cell) % num_regions) as i32)
            .collect(),
    )
    .unwrap();

    for (name, strategy) in [
        ("seq", ExecutionStrategy::Serial),
        ("par", ExecutionStrategy::ParallelRows),
    ] {
        c.bench_function(&format!("region_stats_{name}_{width}x{height}"), |b| {
            b.iter(|| {
                black_box(RegionStats::compute(&image, &labels, num_regions, strategy).unwrap())
            })
        });
    }

    let stats =
        RegionStats::compute(&image, &labels, num_regions, ExecutionStrategy::Serial).unwrap();
    let palette = Palette::generate(234, num_regions);

    c.bench_function(&format!("render_palette_{width}x{height}"), |b| {
        b.iter(|| {
            black_box(render_palette(&labels, &palette, ExecutionStrategy::ParallelRows).unwrap())
        })
    });

    c.bench_function(&format!("render_mean_color_{width}x{height}"), |b| {
        b.iter(|| {
            black_box(
                render_mean_color(&labels, &stats.colors, ExecutionStrategy::ParallelRows).unwrap(),
            )
        })
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_size(c, 256, 256);
    bench_size(c, 1024, 1024);
    bench_size(c, 4096, 4096);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
