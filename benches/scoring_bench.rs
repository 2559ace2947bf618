use cipherforge::corpus::model_from_corpus;
use cipherforge::optimizer::initialization::random_population;
use cipherforge::scorer::Scorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

const CORPUS: &str = "it was the best of times it was the worst of times it was the age of \
    wisdom it was the age of foolishness it was the epoch of belief it was the epoch of \
    incredulity it was the season of light it was the season of darkness";

const CIPHER: &str = "zg dqh gsv yvhg lu grnvh zg dqh gsv dlihg lu grnvh";

fn setup_scorer() -> Scorer {
    Scorer::new(Arc::new(model_from_corpus(CORPUS)))
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = setup_scorer();
    let mut rng = fastrand::Rng::with_seed(42);
    let keys = random_population(&mut rng, 64);

    c.bench_function("score_single_key", |b| {
        b.iter(|| scorer.score(black_box(&keys[0]), black_box(CIPHER)))
    });

    c.bench_function("score_population_64", |b| {
        b.iter(|| {
            keys.iter()
                .map(|k| scorer.score(k, black_box(CIPHER)))
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
