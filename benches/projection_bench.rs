//! Benchmarks for the projection engine.
//!
//! Run with: `cargo bench --bench projection_bench`
//!
//! Compares the L2 route through the auxiliary space with the lumped and
//! nodal routes on continuous quadrilateral spaces.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hypsys::mesh::{Mesh, Mesh2D};
use hypsys::space::{Continuity, FeSpace, Ordering, VectorCoefficient};
use hypsys::system::ProjectionKind;
use hypsys::{Configuration, HyperbolicSystem, NodalBasis, NodeFamily, ProblemRegistry};
use std::sync::Arc;

/// Translation problem on an `n × n` perturbed grid.
fn build_system(n: usize, order: usize) -> HyperbolicSystem {
    let mesh = Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, n, n).perturbed(0.1);
    let mesh = Arc::new(Mesh::from(mesh));
    let basis = Arc::new(NodalBasis::new(order, 2, NodeFamily::GaussLobatto));
    let space = Arc::new(
        FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes)
            .expect("valid space"),
    );
    let config = Configuration::new(0, 1.0, vec![0.0, 0.0], vec![1.0, 1.0]).expect("valid config");
    ProblemRegistry::with_defaults()
        .build(space, config, VectorCoefficient::constant(vec![0.0]))
        .expect("registered problem")
}

fn initial() -> VectorCoefficient {
    VectorCoefficient::new(1, |x, _, out| {
        out[0] = (6.0 * x[0]).sin() * (4.0 * x[1]).cos();
    })
}

/// Benchmark each projection route at a fixed resolution.
fn bench_projection_routes(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection_routes");

    let mut system = build_system(16, 3);
    let fun = initial();
    let mut u = system.new_state();

    for (name, kind) in [
        ("l2", ProjectionKind::L2),
        ("lumped", ProjectionKind::Lumped),
        ("nodal", ProjectionKind::Nodal),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                system
                    .project(black_box(kind), &fun, black_box(0.0), &mut u)
                    .expect("projection");
                u.data()[0]
            });
        });
    }

    group.finish();
}

/// Benchmark the L2 route as the mesh is refined.
fn bench_l2_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("l2_projection_scaling");
    let fun = initial();

    for n in [4, 8, 16, 32] {
        let mut system = build_system(n, 2);
        let mut u = system.new_state();

        group.bench_with_input(BenchmarkId::new("elements", n * n), &n, |b, _| {
            b.iter(|| {
                system
                    .l2_projection(&fun, black_box(0.0), &mut u)
                    .expect("projection");
            });
        });
    }

    group.finish();
}

/// Benchmark system construction, which builds the auxiliary space.
fn bench_system_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_setup");

    for order in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::new("order", order), &order, |b, &order| {
            b.iter(|| build_system(black_box(16), order));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_projection_routes,
    bench_l2_scaling,
    bench_system_setup
);
criterion_main!(benches);
