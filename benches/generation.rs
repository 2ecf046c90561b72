use criterion::{black_box, criterion_group, criterion_main, Criterion};

use word_architect::core::{GameRng, GenerationMode};
use word_architect::morphemes::{GameData, MorphemeLookup};
use word_architect::questions::{build_breakdown, check_answer, QuestionGenerator};

const GAME_DATA: &str = include_str!("../data/game-data.json");

fn bench_generate(c: &mut Criterion) {
    let data = GameData::from_json_str(GAME_DATA).unwrap();
    let mut group = c.benchmark_group("generate");

    for (name, mode) in [
        ("curated", GenerationMode::Curated),
        ("derived", GenerationMode::Derived),
    ] {
        let generator = QuestionGenerator::new(mode);
        let mut rng = GameRng::new(42);
        group.bench_function(name, |b| {
            b.iter(|| generator.generate(black_box(&data), &mut rng).unwrap())
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let data = GameData::from_json_str(GAME_DATA).unwrap();
    let question = QuestionGenerator::new(GenerationMode::Derived)
        .generate(&data, &mut GameRng::new(7))
        .unwrap();

    c.bench_function("lookup_index", |b| {
        b.iter(|| MorphemeLookup::new(black_box(&data.morphemes)))
    });

    let lookup = MorphemeLookup::new(&data.morphemes);
    c.bench_function("breakdown", |b| {
        b.iter(|| build_breakdown(black_box(&question), &lookup))
    });

    let submitted = format!("  {}  ", question.answer.to_uppercase());
    c.bench_function("check_answer", |b| {
        b.iter(|| check_answer(black_box(&submitted), &question))
    });
}

criterion_group!(benches, bench_generate, bench_lookup);
criterion_main!(benches);
