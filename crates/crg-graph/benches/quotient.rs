use crg_core::Partition;
use crg_graph::{quotient_graph, ring_of_cliques};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn quotient_bench(c: &mut Criterion) {
    let graph = ring_of_cliques(50, 20).unwrap();
    let labels: Vec<usize> = (0..1_000).map(|idx| idx / 20).collect();
    let partition = Partition::from_labels(&labels);
    c.bench_function("quotient_ring_of_cliques_1k", |b| {
        b.iter(|| {
            let coarse = quotient_graph(black_box(&graph), &partition).unwrap();
            black_box(coarse);
        });
    });
}

criterion_group!(benches, quotient_bench);
criterion_main!(benches);
