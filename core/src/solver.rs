use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// One way of spelling `word` on a board, `path` starts at the first letter.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardWord {
    pub word: String,
    pub path: Vec<BoardCoord>,
}

/// Exhaustive depth-first search of every dictionary word spelled by a simple path of adjacent cells.
#[derive(Clone, Copy, Debug)]
pub struct WordSearch<'a> {
    board: &'a GameBoard,
    trie: &'a Trie,
}

/// Scratch buffers shared by the whole recursion from one starting cell.
struct SearchState {
    visited: Array2<bool>,
    word: String,
    path: Vec<BoardCoord>,
}

impl<'a> WordSearch<'a> {
    pub fn new(board: &'a GameBoard, trie: &'a Trie) -> Self {
        Self { board, trie }
    }

    /// Every `(word, path)` pair on the board, sorted by word and then by path.
    pub fn find_all_words(&self) -> Vec<BoardWord> {
        let started = Instant::now();
        let mut found = Vec::new();

        for start in self.board.iter_coords() {
            let mut state = SearchState {
                visited: Array2::from_elem(
                    (usize::from(self.board.size()), usize::from(self.board.size())),
                    false,
                ),
                word: String::new(),
                path: Vec::new(),
            };
            self.visit(start, Trie::ROOT, &mut state, &mut found);
        }

        found.sort();
        log::debug!(
            "Found {} word paths on {}x{} board in {:?}",
            found.len(),
            self.board.size(),
            self.board.size(),
            started.elapsed()
        );
        found
    }

    fn visit(
        &self,
        coords: BoardCoord,
        node: NodeId,
        state: &mut SearchState,
        found: &mut Vec<BoardWord>,
    ) {
        if state.visited[coords.to_nd_index()] {
            return;
        }
        let Some(letter) = self.board.get(coords) else {
            return;
        };
        // not even a prefix, prune the branch
        let Some(node) = self.trie.step(node, letter) else {
            return;
        };

        let word_len = state.word.len();
        state.word.extend(letter.to_lowercase());
        state.path.push(coords);
        state.visited[coords.to_nd_index()] = true;

        if self.trie.is_word(node) {
            found.push(BoardWord {
                word: state.word.clone(),
                path: state.path.clone(),
            });
        }

        for next in self.board.neighbors(coords) {
            self.visit(next, node, state, found);
        }

        state.visited[coords.to_nd_index()] = false;
        state.path.pop();
        state.word.truncate(word_len);
    }
}

/// Sorted, deduplicated word strings of a search result.
pub fn distinct_words(words: &[BoardWord]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Coordinates touched by at least one path.
pub fn coverage(words: &[BoardWord]) -> HashSet<BoardCoord> {
    words.iter().flat_map(|w| w.path.iter().copied()).collect()
}
