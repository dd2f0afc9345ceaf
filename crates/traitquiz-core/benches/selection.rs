use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use traitquiz_core::engine::AssessmentEngine;
use traitquiz_core::session::{Session, SessionSelection};

fn bench_draw(c: &mut Criterion) {
    let engine = AssessmentEngine::builtin().unwrap();
    let catalog = engine.catalog().clone();
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function("draw_builtin_selection", |b| {
        b.iter(|| SessionSelection::draw(black_box(&catalog), &mut rng))
    });
}

fn bench_full_session(c: &mut Criterion) {
    let engine = AssessmentEngine::builtin().unwrap();

    c.bench_function("answer_and_evaluate", |b| {
        b.iter(|| {
            let mut session = Session::with_seed(black_box(7));
            let answers: Vec<String> = engine
                .selection(&mut session)
                .iter()
                .map(|s| s.question.options()[0].clone())
                .collect();
            for (i, answer) in answers.iter().enumerate() {
                engine.record_answer(&mut session, i, answer).unwrap();
            }
            engine.evaluate(&mut session).unwrap()
        })
    });
}

criterion_group!(benches, bench_draw, bench_full_session);
criterion_main!(benches);
