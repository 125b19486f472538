use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandwise_core::estimator::{BandMatchModel, ConfidenceEstimator};
use bandwise_core::table::DifficultyTable;
use bandwise_core::{Level, TestSession};

fn history(n: usize) -> Vec<bool> {
    (0..n).map(|i| i % 3 != 0).collect()
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let table = DifficultyTable::new();
    let estimator = ConfidenceEstimator::<BandMatchModel>::default();

    for n in [15usize, 40, 200] {
        let answers = history(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| estimator.estimate(black_box(&table), black_box(&answers), Level::B1))
        });
    }

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let answers = history(40);

    group.bench_function("submit_40", |b| {
        b.iter(|| {
            let mut session = TestSession::create(Some(2)).expect("valid level");
            for &a in &answers {
                let _ = session.submit_answer("bench", black_box(a));
            }
            session.state().confidence()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_session);
criterion_main!(benches);
