#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for the scan converter and the antialiasing pass.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use trazar::prelude::*;
use trazar::render::mlaa::MorphAntialias;
use trazar::render::primitives::{rasterize_line, rasterize_triangle};

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_line");

    for size in [64u32, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut fb = Framebuffer::new(size, size).expect("valid dimensions");
            let max = (size - 1) as f32;
            b.iter(|| {
                rasterize_line(&mut fb, 0.0, 0.0, black_box(max), black_box(max * 0.7), Color::BLACK);
            });
        });
    }

    group.finish();
}

fn triangle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_triangle");

    for size in [64u32, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut fb = Framebuffer::new(size, size).expect("valid dimensions");
            let max = (size - 1) as f32;
            b.iter(|| {
                rasterize_triangle(
                    &mut fb,
                    black_box(1.0),
                    1.0,
                    max,
                    1.0,
                    max / 2.0,
                    max,
                    Color::BLUE,
                );
            });
        });
    }

    group.finish();
}

fn mlaa_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mlaa");

    for size in [64u32, 256, 1024] {
        // a frame with plenty of diagonal contrast edges
        let mut fb = Framebuffer::new(size, size).expect("valid dimensions");
        let max = (size - 1) as f32;
        rasterize_triangle(&mut fb, 0.0, 0.0, max, max * 0.3, max * 0.2, max, Color::BLACK);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut frame = fb.clone();
                let mlaa = MorphAntialias::new(black_box(&frame));
                mlaa.resolve(&mut frame);
                frame
            });
        });
    }

    group.finish();
}

fn redraw_benchmark(c: &mut Criterion) {
    let mut scene = Scene::new(100.0, 100.0);
    for i in 0..20 {
        let offset = i as f32 * 4.0;
        scene.elements.push(
            Element::new(Shape::Rect {
                position: Vec2::new(offset, offset),
                dimension: Vec2::new(20.0, 20.0),
            })
            .with_style(Style {
                fill_color: Color::RED.with_alpha(0.6),
                stroke_color: Color::BLACK,
                stroke_width: 1.0,
            }),
        );
    }

    let mut renderer = SoftwareRenderer::new(512, 512).expect("valid dimensions");
    renderer.set_scene(scene);

    c.bench_function("redraw_512", |b| {
        b.iter(|| {
            renderer.redraw();
            black_box(renderer.framebuffer().pixels().len())
        });
    });
}

criterion_group!(
    benches,
    line_benchmark,
    triangle_benchmark,
    mlaa_benchmark,
    redraw_benchmark
);
criterion_main!(benches);
