use criterion::{black_box, criterion_group, criterion_main, Criterion};
use speller_algorithm::rotation::WordSet;

fn rotation_benchmark(c: &mut Criterion) {
    for size in [10, 1_000, 100_000] {
        let words: Vec<String> = (0..size).map(|n| format!("word{}", n)).collect();
        let mut set = WordSet::with_seed(42);

        c.bench_function(&format!("load {} words", size), |b| {
            b.iter(|| set.load(black_box(words.clone())))
        });

        set.load(words);
        c.bench_function(&format!("draw from {} words", size), |b| {
            b.iter(|| set.draw().unwrap())
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = rotation_benchmark,
}
criterion_main!(benches);
