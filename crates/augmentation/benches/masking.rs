use augmentation::{mask_features, standardize, FeatureMasker, MaskConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn utterance(time: usize, channels: usize) -> Array2<f32> {
    Array2::from_shape_fn((time, channels), |(t, c)| ((t * 31 + c * 7) % 97) as f32)
}

fn bench_mask_features(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let config = MaskConfig::default().with_frequency(20, 2).with_time_ratio(40, 0.3);
    let features = utterance(1000, 80);

    c.bench_function("mask_features_1000x80", |b| {
        b.iter(|| {
            let mut copy = features.clone();
            mask_features(&mut copy, black_box(&config), &mut rng).unwrap();
            black_box(copy)
        });
    });
}

fn bench_batch(c: &mut Criterion) {
    let config = MaskConfig::default().with_frequency(20, 2).with_time(20, 10);
    let mut masker = FeatureMasker::from_seed(config, 7);
    let batch: Vec<Array2<f32>> = (0..32).map(|_| utterance(300, 80)).collect();

    c.bench_function("apply_batch_32x300x80", |b| {
        b.iter(|| {
            let mut copy = batch.clone();
            masker.apply_batch(&mut copy).unwrap();
            black_box(copy)
        });
    });
}

fn bench_standardize(c: &mut Criterion) {
    let features = utterance(1000, 80);

    c.bench_function("standardize_1000x80", |b| {
        b.iter(|| {
            let mut copy = features.clone();
            standardize(&mut copy).unwrap();
            black_box(copy)
        });
    });
}

criterion_group!(benches, bench_mask_features, bench_batch, bench_standardize);
criterion_main!(benches);
