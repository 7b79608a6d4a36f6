use alloc::vec::Vec;
use crate::*;
pub use random::*;

mod random;

/// A board together with every word path the search found on it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedBoard {
    pub board: GameBoard,
    pub words: Vec<BoardWord>,
    /// Cells re-drawn while chasing full coverage, never more than the configured retry bound.
    pub rerolls: u32,
}

pub trait BoardGenerator {
    fn generate(self, config: &GameConfig, trie: &Trie) -> GeneratedBoard;
}
