use criterion::{Criterion, criterion_group, criterion_main};
use lexigrid_core::*;
use rand::prelude::*;
use std::hint::black_box;

const WORDS: &str = include_str!("../../assets/words.txt");

fn bench_search(c: &mut Criterion) {
    let config = GameConfig::default();
    let trie = load_dictionary(WORDS, &config).unwrap();
    let dist = LetterDistribution::english();

    let mut group = c.benchmark_group("search");
    for size in [4, 5] {
        let board = GameBoard::random(size, &dist, &mut SmallRng::seed_from_u64(size.into()));
        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter(|| WordSearch::new(black_box(&board), &trie).find_all_words())
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let trie = load_dictionary(WORDS, &GameConfig::default()).unwrap();

    let mut group = c.benchmark_group("generate");
    for size in [4, 5] {
        let config = GameConfig {
            board_size: size,
            ..Default::default()
        };
        group.bench_function(format!("{size}x{size}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                RandomBoardGenerator::new(black_box(seed)).generate(&config, &trie)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_generate);
criterion_main!(benches);
