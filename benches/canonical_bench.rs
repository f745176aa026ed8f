//! Micro-benchmark of `Pdbm::canonical` over small-to-moderate matrices, the
//! hottest loop in the engine (`O(n^3)` coverage queries per sweep).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pdbm_engine::{Clock, ConstraintSet, EngineConfig, LinearExpression, Pdbm, Rational, RelationType, TrivialOracle};

/// Build a chain `c0 - c1 <= 1, c1 - c2 <= 1, ..., c_{n-2} - c_{n-1} <= 1`
/// so `canonical` has real shortest-path propagation work to do.
fn chain_pdbm(n: usize) -> Pdbm {
    let clocks: Vec<Clock> = (0..n).map(|_| Clock::new()).collect();
    let mut d = Pdbm::initial(clocks.iter().copied());
    for w in clocks.windows(2) {
        d = d
            .set_upper_bound(w[0], w[1], LinearExpression::of_const(Rational::one()), RelationType::Le)
            .unwrap();
    }
    d
}

fn bench_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical");
    let oracle = TrivialOracle;
    let config = EngineConfig::default();

    for &n in &[4usize, 8, 16] {
        let dbm = chain_pdbm(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let out = black_box(&dbm)
                    .canonical(&ConstraintSet::empty(), &oracle, &config)
                    .unwrap();
                black_box(out)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_canonical);
criterion_main!(benches);
