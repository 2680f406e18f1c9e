//! Benchmarks for the matching engine and transforms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use smith_core::math::{gamma_to_impedance, impedance_to_gamma};
use smith_core::matching::{Component, MatchingNetwork};

fn bench_round_trip(c: &mut Criterion) {
    let z = Complex64::new(37.0, -12.5);
    c.bench_function("impedance_gamma_round_trip", |b| {
        b.iter(|| {
            let g = impedance_to_gamma(black_box(z), 50.0).unwrap();
            black_box(gamma_to_impedance(g, 50.0).unwrap())
        })
    });
}

fn bench_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("ladder");

    for n in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("alternating_lc", n), n, |b, &n| {
            b.iter(|| {
                let mut net = MatchingNetwork::new();
                net.set_load(Complex64::new(75.0, 20.0)).unwrap();
                for i in 0..n {
                    let comp = if i % 2 == 0 {
                        Component::series_inductor(5e-9, 1e9)
                    } else {
                        Component::shunt_capacitor(2e-12, 1e9)
                    };
                    net.add_component(comp).unwrap();
                }
                black_box(net.gamma_trajectory(50.0))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_round_trip, bench_ladder);
criterion_main!(benches);
