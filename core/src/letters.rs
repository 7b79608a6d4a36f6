use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Returned when floating point rounding leaves a draw above every cumulative entry.
pub const FALLBACK_LETTER: char = '#';

/// English letter frequencies in percent.
const ENGLISH_FREQUENCIES: [(char, f64); 26] = [
    ('E', 12.70),
    ('T', 9.06),
    ('A', 8.17),
    ('O', 7.51),
    ('I', 6.97),
    ('N', 6.75),
    ('S', 6.33),
    ('H', 6.09),
    ('R', 5.99),
    ('D', 4.25),
    ('L', 4.03),
    ('C', 2.78),
    ('U', 2.76),
    ('M', 2.41),
    ('W', 2.36),
    ('F', 2.23),
    ('G', 2.02),
    ('Y', 1.97),
    ('P', 1.93),
    ('B', 1.49),
    ('V', 0.98),
    ('K', 0.77),
    ('J', 0.15),
    ('X', 0.15),
    ('Q', 0.10),
    ('Z', 0.07),
];

/// Cumulative probability table used to draw board letters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterDistribution {
    cumulative: Vec<(char, f64)>,
}

impl Default for LetterDistribution {
    fn default() -> Self {
        Self::english()
    }
}

impl LetterDistribution {
    pub fn english() -> Self {
        Self::from_weights(&ENGLISH_FREQUENCIES).expect("built-in table is valid")
    }

    /// Builds the table from arbitrary non-negative weights, normalized so the last entry is close to `1.0`.
    pub fn from_weights(weights: &[(char, f64)]) -> Result<Self> {
        if weights.iter().any(|&(_, w)| !w.is_finite() || w < 0.0) {
            return Err(GameError::InvalidDistribution);
        }
        let total: f64 = weights.iter().map(|&(_, w)| w).sum();
        if weights.is_empty() || total <= 0.0 {
            return Err(GameError::InvalidDistribution);
        }

        let mut acc = 0.0;
        let cumulative = weights
            .iter()
            .map(|&(letter, weight)| {
                acc += weight / total;
                (letter, acc)
            })
            .collect();
        Ok(Self { cumulative })
    }

    /// Picks the first letter whose cumulative probability exceeds `draw`.
    pub fn letter_for(&self, draw: f64) -> char {
        self.cumulative
            .iter()
            .find(|&&(_, cumulative)| draw < cumulative)
            .map_or_else(
                || {
                    log::warn!("Letter draw {} fell past the distribution", draw);
                    FALLBACK_LETTER
                },
                |&(letter, _)| letter,
            )
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> char {
        self.letter_for(rng.random::<f64>())
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().map_or(0.0, |&(_, c)| c)
    }
}
