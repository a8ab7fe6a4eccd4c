//! Throughput benchmarks for CPU starfield shading.
//!
//! Run with: cargo bench -p nightfall-starfield

use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use nightfall_common::FrameContext;
use nightfall_starfield::{Starfield, StarfieldConfig};

fn bench_shade(label: &str, samples: u32, iterations: u32) {
    let field = Starfield::new(StarfieldConfig::default());

    let start = Instant::now();
    for iter in 0..iterations {
        let elapsed = iter as f32 * 0.016;
        for s in 0..samples {
            let pixel = Vec2::new((s % 800) as f32 - 400.0, (s / 800) as f32 - 300.0);
            black_box(field.shade(black_box(pixel), elapsed));
        }
    }
    let total = start.elapsed();
    let per_sample = total.as_nanos() / (samples as u128 * iterations as u128);
    println!("  {label}: {total:?} for {iterations} x {samples} samples ({per_sample} ns/sample)");
}

fn bench_frame(width: u32, height: u32) {
    let field = Starfield::new(StarfieldConfig::default());
    let frame = FrameContext::new(width, height, 0.0);

    let start = Instant::now();
    let fb = black_box(field.render(black_box(&frame)));
    println!(
        "  {width}x{height}: {:?} ({} pixels)",
        start.elapsed(),
        fb.width() * fb.height()
    );
}

fn main() {
    println!("=== Starfield: per-pixel shade ===");
    bench_shade("default config", 10_000, 10);

    let mut deep = StarfieldConfig::default();
    deep.layers = 8;
    let field = Starfield::new(deep);
    let start = Instant::now();
    for s in 0..10_000u32 {
        let pixel = Vec2::new((s % 800) as f32 - 400.0, (s / 800) as f32 - 300.0);
        black_box(field.shade(black_box(pixel), 0.5));
    }
    println!("  eight layers: {:?} for 10000 samples", start.elapsed());

    println!();
    println!("=== Starfield: full frames ===");
    bench_frame(320, 240);
    bench_frame(640, 480);
}
