use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lexdrill_core::model::{ProgressRecord, MAX_WEIGHT, MIN_WEIGHT};
use lexdrill_core::outcome::{apply_outcome, Outcome};
use lexdrill_core::selector::{select_next, SelectionMode};

fn make_records(n: usize, skewed: bool) -> Vec<ProgressRecord> {
    (0..n)
        .map(|i| {
            let mut r = ProgressRecord::new(format!("word-{i}"));
            if skewed && i % 10 != 0 {
                r.weight = MIN_WEIGHT;
            }
            r
        })
        .collect()
}

fn bench_select_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_next");
    let mut rng = StdRng::seed_from_u64(11);

    for n in [150, 1200, 5000] {
        let uniform = make_records(n, false);
        group.bench_function(format!("weighted/uniform/{n}"), |b| {
            b.iter(|| select_next(black_box(n), black_box(&uniform), SelectionMode::Weighted, 0, &mut rng))
        });

        let skewed = make_records(n, true);
        group.bench_function(format!("weighted/skewed/{n}"), |b| {
            b.iter(|| select_next(black_box(n), black_box(&skewed), SelectionMode::Weighted, 0, &mut rng))
        });
    }

    let records = make_records(5000, false);
    group.bench_function("sequential/5000", |b| {
        b.iter(|| select_next(5000, black_box(&records), SelectionMode::Sequential, black_box(4321), &mut rng))
    });

    group.finish();
}

fn bench_apply_outcome(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_outcome");
    let mut record = ProgressRecord::new("你好");
    record.weight = MAX_WEIGHT / 2.0;
    record.attempts = 12;
    record.correct = 8;
    record.total_time = 30.0;
    record.avg_time = 2.5;

    for outcome in [Outcome::Correct, Outcome::Incorrect, Outcome::Skipped] {
        group.bench_function(outcome.to_string(), |b| {
            b.iter(|| apply_outcome(black_box(&record), outcome, black_box(1.8)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select_next, bench_apply_outcome);
criterion_main!(benches);
