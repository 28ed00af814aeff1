//! Criterion benchmarks for the fit and scoring paths.
//!
//! The engine scores a short trailing window on every tick, so the
//! predict path is the latency-sensitive one; full fits happen rarely.

use criterion::{Criterion, criterion_group, criterion_main};
use hydromon_model::{
    AnomalyDetector, DEFAULT_CORPUS_SEED, DEFAULT_CORPUS_SIZE, synthetic_corpus,
};
use hydromon_types::SensorSample;

fn tick_window(count: usize) -> Vec<SensorSample> {
    (0..count)
        .map(|row| {
            let wobble = (row % 7) as f64 - 3.0;
            SensorSample::new(
                150.0 + wobble,
                80.0 + wobble * 0.5,
                50.0 + wobble * 0.3,
                row as i64 * 1_000,
            )
        })
        .collect()
}

fn bench_corpus_generation(c: &mut Criterion) {
    c.bench_function("synthetic_corpus_1000", |b| {
        b.iter(|| {
            synthetic_corpus(
                std::hint::black_box(DEFAULT_CORPUS_SIZE),
                std::hint::black_box(DEFAULT_CORPUS_SEED),
            )
        })
    });
}

fn bench_full_fit(c: &mut Criterion) {
    let Ok(corpus) = synthetic_corpus(DEFAULT_CORPUS_SIZE, DEFAULT_CORPUS_SEED) else {
        return;
    };

    c.bench_function("train_on_corpus", |b| {
        b.iter(|| {
            let mut detector = AnomalyDetector::default();
            detector.train(std::hint::black_box(Some(&corpus)))
        })
    });
}

fn bench_window_predict(c: &mut Criterion) {
    let mut detector = AnomalyDetector::default();
    if detector.train(None).is_err() {
        return;
    }
    let window = tick_window(5);

    c.bench_function("predict_tick_window", |b| {
        b.iter(|| detector.predict(std::hint::black_box(&window)))
    });
}

criterion_group!(
    benches,
    bench_corpus_generation,
    bench_full_fit,
    bench_window_predict,
);

criterion_main!(benches);
