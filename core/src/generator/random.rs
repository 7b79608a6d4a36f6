use rand::prelude::*;
use web_time::Instant;

use super::*;

/// Generation strategy that draws every letter independently, then re-rolls cells no word passes through until the
/// whole board is covered or the retry bound from the config is used up.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    distribution: LetterDistribution,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_distribution(seed, LetterDistribution::english())
    }

    pub fn with_distribution(seed: u64, distribution: LetterDistribution) -> Self {
        Self { seed, distribution }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &GameConfig, trie: &Trie) -> GeneratedBoard {
        let started = Instant::now();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut board = GameBoard::random(config.board_size, &self.distribution, &mut rng);
        let mut words = WordSearch::new(&board, trie).find_all_words();
        let mut rerolls = 0;

        loop {
            let covered = coverage(&words);
            let Some(unused) = board.iter_coords().find(|pos| !covered.contains(pos)) else {
                break;
            };
            if rerolls >= config.max_regen_retries {
                log::warn!(
                    "Board still has uncovered cells after {} re-rolls, first at {}",
                    rerolls,
                    unused
                );
                break;
            }

            let letter = self.distribution.sample(&mut rng);
            log::trace!("Re-rolling uncovered cell {} to {:?}", unused, letter);
            board = board
                .with_letter(unused, letter)
                .expect("coordinate comes from the board");
            words = WordSearch::new(&board, trie).find_all_words();
            rerolls += 1;
        }

        log::debug!(
            "Generated board with {} word paths after {} re-rolls in {:?}",
            words.len(),
            rerolls,
            started.elapsed()
        );
        GeneratedBoard {
            board,
            words,
            rerolls,
        }
    }
}
