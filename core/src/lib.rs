#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use gesture::*;
pub use letters::*;
pub use scoring::*;
pub use session::*;
pub use solver::*;
pub use trie::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod gesture;
mod letters;
mod scoring;
mod session;
mod solver;
mod trie;
mod types;

/// Round length used while iterating on the game.
pub const FAST_ROUND_SECS: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the board.
    pub board_size: Coord,
    /// Seconds in one round.
    pub round_secs: u32,
    pub tick_interval_ms: u64,
    /// How long submission feedback stays visible.
    pub flash_ms: u64,
    /// Radians a drag may deviate from the direction of the cell it enters.
    pub angle_tolerance: f32,
    /// Shorter dictionary words are never loaded.
    pub min_word_len: usize,
    /// Re-rolls allowed while trying to get every cell onto some word path.
    pub max_regen_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 4,
            round_secs: 180,
            tick_interval_ms: 1000,
            flash_ms: 111,
            angle_tolerance: 0.4,
            min_word_len: 3,
            max_regen_retries: 5,
        }
    }
}

impl GameConfig {
    pub const MIN_BOARD_SIZE: Coord = 2;
    pub const MAX_BOARD_SIZE: Coord = 12;

    pub fn fast() -> Self {
        Self {
            round_secs: FAST_ROUND_SECS,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_BOARD_SIZE..=Self::MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidConfig("board_size must be between 2 and 12"));
        }
        if self.round_secs == 0 {
            return Err(GameError::InvalidConfig("round_secs must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig("tick_interval_ms must be at least 1"));
        }
        if !self.angle_tolerance.is_finite() || self.angle_tolerance <= 0.0 {
            return Err(GameError::InvalidConfig("angle_tolerance must be positive"));
        }
        if self.min_word_len == 0 {
            return Err(GameError::InvalidConfig("min_word_len must be at least 1"));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.board_size, self.board_size)
    }

    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub const fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

/// Loads a word list into a trie, failing when nothing of the minimum length is left.
pub fn load_dictionary(text: &str, config: &GameConfig) -> Result<Trie> {
    let trie = Trie::from_word_list(text, config.min_word_len);
    if trie.is_empty() {
        return Err(GameError::EmptyDictionary(config.min_word_len));
    }
    Ok(trie)
}
