use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use huffman_tree::{Selection, TreeBuilder};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in [16usize, 256, 1024] {
        // Skewed weights so merges mix leaves and internal nodes
        let weights = (0..n as u64).map(|i| (i * i) % 97 + 1).collect::<Vec<_>>();

        for (name, selection) in [
            ("linear_scan", Selection::LinearScan),
            ("min_heap", Selection::MinHeap),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &weights, |b, weights| {
                b.iter(|| {
                    let mut tree = TreeBuilder::with_selection(weights, selection).unwrap();
                    tree.build().unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
