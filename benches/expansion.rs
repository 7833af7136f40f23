//! Benchmarks for the construction-heavy operations of the simplex tree:
//!
//! 1. **`insert_graph`**: loading a complete 1-skeleton
//! 2. **`expansion`**: flag-complex synthesis at increasing dimension caps
//! 3. **`filtration_simplex_range`**: the O(n log n) filtration sort
//! 4. **`cofaces_simplex_range`**: scanning vs label-indexed star queries

#![allow(missing_docs)] // Criterion macros generate undocumented functions

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use simplex_tree::prelude::*;
use std::hint::black_box;

/// Complete graph on `n` vertices with distinct edge weights.
fn complete_graph(n: u32) -> Graph<f64> {
    let mut edges = Vec::new();
    let mut weight = 0.0;
    for u in 0..n {
        for v in (u + 1)..n {
            weight += 1.0;
            edges.push((u, v, weight));
        }
    }
    Graph::from_edges(edges).unwrap()
}

fn skeleton(n: u32, options: SimplexTreeOptions) -> SimplexTree<f64> {
    let mut st = SimplexTree::new(options);
    st.insert_graph(&complete_graph(n)).unwrap();
    st
}

fn benchmark_insert_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_graph");
    for &n in &[16u32, 64, 128] {
        let graph = complete_graph(n);
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::new("complete", n), &graph, |b, graph| {
            b.iter_batched(
                SimplexTree::<f64>::default,
                |mut st| {
                    st.insert_graph(graph).unwrap();
                    black_box(st)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");
    for &(n, max_dim) in &[(12u32, 3usize), (12, 5), (16, 3), (20, 2)] {
        group.bench_with_input(
            BenchmarkId::new("complete", format!("k{n}_dim{max_dim}")),
            &(n, max_dim),
            |b, &(n, max_dim)| {
                b.iter_batched(
                    || skeleton(n, SimplexTreeOptions::DEFAULT),
                    |mut st| {
                        st.expansion(max_dim).unwrap();
                        black_box(st.num_simplices())
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn benchmark_filtration_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtration_simplex_range");
    for &(n, max_dim) in &[(12u32, 3usize), (16, 3)] {
        let mut st = skeleton(n, SimplexTreeOptions::DEFAULT);
        st.expansion(max_dim).unwrap();
        group.throughput(Throughput::Elements(
            u64::try_from(st.num_simplices()).unwrap(),
        ));
        group.bench_with_input(
            BenchmarkId::new("sort", format!("k{n}_dim{max_dim}")),
            &st,
            |b, st| {
                b.iter(|| black_box(st.filtration_simplex_range().count()));
            },
        );
    }
    group.finish();
}

fn benchmark_cofaces(c: &mut Criterion) {
    let mut group = c.benchmark_group("cofaces_simplex_range");
    for (label, options) in [
        ("scan", SimplexTreeOptions::DEFAULT),
        ("indexed", SimplexTreeOptions::FAST_COFACES),
    ] {
        let mut st = skeleton(14, options);
        st.expansion(3).unwrap();
        let edge = st.find([6, 7]).unwrap();
        group.bench_with_input(BenchmarkId::new(label, "k14_edge_star"), &st, |b, st| {
            b.iter(|| black_box(st.cofaces_simplex_range(edge, 0).unwrap().count()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert_graph,
    benchmark_expansion,
    benchmark_filtration_order,
    benchmark_cofaces
);
criterion_main!(benches);
