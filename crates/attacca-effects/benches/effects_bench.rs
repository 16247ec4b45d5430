//! Criterion benchmarks for the transient designer
//!
//! Run with: cargo bench -p attacca-effects
#![allow(missing_docs)]

use attacca_core::ParameterInfo;
use attacca_effects::{GainComputer, TransientDesigner, TransientParams};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

/// Decaying 180 Hz hits every 100 ms over a quiet 2 kHz bed.
fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let since_hit = (i % 4800) as f32 / SAMPLE_RATE;
            let hit = (2.0 * std::f32::consts::PI * 180.0 * t).sin() * (-since_hit * 35.0).exp();
            hit * 0.8 + (2.0 * std::f32::consts::PI * 2000.0 * t).sin() * 0.05
        })
        .collect()
}

/// Settings that light up every optional stage.
fn full_chain(designer: &mut TransientDesigner) {
    for (key, value) in [
        ("attack_amount", 60.0),
        ("sustain_amount", -40.0),
        ("snap_amount", 120.0),
        ("harmonic_enhancement", 30.0),
        ("focus", 1.5),
        ("hf_saturation", 20.0),
        ("tape_clip", 1.0),
        ("clipper_enabled", 1.0),
        ("mix", 80.0),
    ] {
        if let Some(index) = designer.find_param(key) {
            designer.set_param(index, value);
        }
    }
}

fn bench_designer(c: &mut Criterion, name: &str, configure: fn(&mut TransientDesigner)) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut designer = TransientDesigner::new(SAMPLE_RATE, 2);
                configure(&mut designer);
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    designer.process_block(&mut [&mut left[..], &mut right[..]]);
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_defaults(c: &mut Criterion) {
    bench_designer(c, "TransientDesigner/defaults", |_| {});
}

fn bench_full_chain(c: &mut Criterion) {
    bench_designer(c, "TransientDesigner/full_chain", full_chain);
}

fn bench_interleaved(c: &mut Criterion) {
    let mut group = c.benchmark_group("TransientDesigner/interleaved");
    let input: Vec<f32> = generate_test_signal(1024)
        .into_iter()
        .flat_map(|x| [x, -x])
        .collect();

    group.bench_function("stereo_1024", |b| {
        let mut designer = TransientDesigner::new(SAMPLE_RATE, 2);
        full_chain(&mut designer);
        let mut buffer = input.clone();
        b.iter(|| {
            buffer.copy_from_slice(&input);
            designer.process_interleaved(&mut buffer);
            black_box(buffer[0])
        })
    });

    group.finish();
}

fn bench_gain_computer(c: &mut Criterion) {
    let params = TransientParams {
        attack_amount: 60.0,
        snap_amount: 120.0,
        harmonic_enhancement: 30.0,
        ..TransientParams::default()
    };
    let computer = GainComputer::from_params(&params);

    c.bench_function("GainComputer/compute", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..256 {
                acc += computer.compute(black_box(i as f32 / 256.0)).attack;
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    bench_defaults,
    bench_full_chain,
    bench_interleaved,
    bench_gain_computer,
);

criterion_main!(benches);
