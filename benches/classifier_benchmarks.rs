//! Benchmarks for per-frame classification cost

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use head_gesture::{
    gesture_classifier::{count_direction_changes, ClassifierSettings, GestureClassifier},
    landmarks::{LandmarkSample, Point3},
};

fn noisy_frames(count: usize) -> Vec<LandmarkSample> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.1;
            let chin = Point3::new(0.5, 0.6 + 0.005 * rand::random::<f64>(), 0.01 * t.sin());
            let side_head = Point3::new(0.8 + 0.005 * rand::random::<f64>(), 0.4, 0.005 * t.cos());
            LandmarkSample::new(chin, side_head, Point3::new(0.5, 0.2, 0.0), Point3::new(0.5, 0.7, 0.0))
        })
        .collect()
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let frames = noisy_frames(300);

    for window in [8, 16, 32] {
        let settings = ClassifierSettings {
            frames_to_analyze: window,
            ..ClassifierSettings::default()
        };
        let mut classifier = GestureClassifier::with_settings(settings);

        group.bench_with_input(BenchmarkId::new("stream_300", window), &frames, |b, frames| {
            b.iter(|| {
                classifier.reset();
                for frame in frames {
                    black_box(classifier.classify(black_box(frame)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_direction_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("direction_changes");

    for len in [8, 64, 512] {
        let values: Vec<f64> = (0..len).map(|i| 0.02 * (i as f64 * 0.7).sin()).collect();
        group.bench_with_input(BenchmarkId::new("len", len), &values, |b, values| {
            b.iter(|| black_box(count_direction_changes(black_box(values), 0.01)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_classify, benchmark_direction_changes);
criterion_main!(benches);
