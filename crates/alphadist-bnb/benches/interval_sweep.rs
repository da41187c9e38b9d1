// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use alphadist_bnb::engine::{DistanceEngine, EngineConfig};
use alphadist_model::generators::GeneratorSet;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generator sets with known, non-trivial interval densities.
const GENERATOR_SETS: &[&[usize]] = &[&[1, 4], &[2, 3], &[1, 3, 8], &[4, 5, 9]];

const DOMAIN: usize = 40;

fn label(generators: &[usize]) -> String {
    generators
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

fn bench_interval_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_sweep");
    group.throughput(Throughput::Elements(DOMAIN as u64));

    for gens in GENERATOR_SETS {
        let generators = GeneratorSet::new(gens.to_vec()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("S", label(gens)),
            &generators,
            |b, generators| {
                b.iter(|| {
                    let mut engine =
                        DistanceEngine::new(EngineConfig::new(generators.clone(), DOMAIN));
                    let outcome = engine.query_interval(black_box(DOMAIN)).unwrap();
                    black_box(outcome.value())
                })
            },
        );
    }
    group.finish();
}

fn bench_cyclic_prefixes(c: &mut Criterion) {
    let mut group = c.benchmark_group("cyclic_full_cycle");

    for gens in GENERATOR_SETS {
        let generators = GeneratorSet::new(gens.to_vec()).unwrap();
        let modulus = (DOMAIN / 2..DOMAIN)
            .find(|&m| !generators.has_multiple_of(m))
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("S", label(gens)),
            &generators,
            |b, generators| {
                b.iter(|| {
                    let mut engine =
                        DistanceEngine::new(EngineConfig::new(generators.clone(), DOMAIN));
                    let outcome = engine.query_cyclic(modulus, black_box(modulus)).unwrap();
                    black_box(outcome.value())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_interval_sweep, bench_cyclic_prefixes);
criterion_main!(benches);
