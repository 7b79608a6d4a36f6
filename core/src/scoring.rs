/// Points for words of length 3 to 26, each entry the sum of the two before it.
const WORD_POINTS: [u32; 24] = [
    1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765, 10946,
    17711, 28657, 46368,
];

const SHORTEST_SCORED: usize = 3;

/// Points awarded for a word of `len` characters, 0 outside the table.
pub fn word_points(len: usize) -> u32 {
    len.checked_sub(SHORTEST_SCORED)
        .and_then(|i| WORD_POINTS.get(i))
        .copied()
        .unwrap_or(0)
}

/// Points for a single word, counted in characters.
pub fn score_word(word: &str) -> u32 {
    word_points(word.chars().count())
}

/// Sum of [`score_word`] over `words`, callers pass distinct words.
pub fn max_score<'a>(words: impl IntoIterator<Item = &'a str>) -> u32 {
    words.into_iter().map(score_word).sum()
}
