use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Quarter-turn orientation the board is displayed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn next(self) -> Self {
        use Rotation::*;
        match self {
            Deg0 => Deg90,
            Deg90 => Deg180,
            Deg180 => Deg270,
            Deg270 => Deg0,
        }
    }

    pub const fn inverse(self) -> Self {
        use Rotation::*;
        match self {
            Deg0 => Deg0,
            Deg90 => Deg270,
            Deg180 => Deg180,
            Deg270 => Deg90,
        }
    }

    pub const fn degrees(self) -> u16 {
        use Rotation::*;
        match self {
            Deg0 => 0,
            Deg90 => 90,
            Deg180 => 180,
            Deg270 => 270,
        }
    }


    /// Where `coords` ends up after turning a `size`×`size` board by this rotation.
    pub const fn apply(self, coords: BoardCoord, size: Coord) -> BoardCoord {
        use Rotation::*;
        let BoardCoord { row, col } = coords;
        let last = size - 1;
        match self {
            Deg0 => coords,
            Deg90 => BoardCoord::new(col, last - row),
            Deg180 => BoardCoord::new(last - row, last - col),
            Deg270 => BoardCoord::new(last - col, row),
        }
    }
}

/// Immutable square grid of letters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBoard {
    letters: Array2<char>,
}

impl GameBoard {
    /// Fills every cell independently from `distribution`.
    pub fn random<R: Rng>(size: Coord, distribution: &LetterDistribution, rng: &mut R) -> Self {
        let size = usize::from(size.max(1));
        let letters = Array2::from_shape_simple_fn((size, size), || distribution.sample(rng));
        Self { letters }
    }

    pub fn from_letters(rows: Vec<Vec<char>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size > usize::from(Coord::MAX) || rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<char> = rows.into_iter().flatten().collect();
        let letters =
            Array2::from_shape_vec((size, size), flat).map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { letters })
    }

    pub fn size(&self) -> Coord {
        // Construction caps the side length at `Coord::MAX`.
        self.letters.nrows() as Coord
    }

    pub fn get(&self, coords: BoardCoord) -> Option<char> {
        self.letters.get(coords.to_nd_index()).copied()
    }

    pub fn neighbors(&self, coords: BoardCoord) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = BoardCoord> + use<> {
        iter_coords(self.size())
    }

    /// Copy of this board with one cell replaced.
    pub fn with_letter(&self, coords: BoardCoord, letter: char) -> Result<Self> {
        if !coords.in_bounds(self.size()) {
            return Err(GameError::InvalidCoords);
        }
        let mut letters = self.letters.clone();
        letters[coords.to_nd_index()] = letter;
        Ok(Self { letters })
    }

    /// Display grid for `rotation`: the cell shown at `[row, col]` holds the underlying coordinate drawn there.
    pub fn rotated_coordinates(&self, rotation: Rotation) -> Array2<BoardCoord> {
        let size = self.size();
        let mut grid = Array2::from_elem(self.letters.dim(), BoardCoord::default());
        for coords in self.iter_coords() {
            grid[rotation.apply(coords, size).to_nd_index()] = coords;
        }
        grid
    }

    /// Letters along `path`, `None` if any coordinate is out of bounds.
    pub fn spell(&self, path: &[BoardCoord]) -> Option<String> {
        path.iter().map(|&coords| self.get(coords)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.letters.rows().into_iter().map(|row| row.iter().collect())
    }
}

impl Index<BoardCoord> for GameBoard {
    type Output = char;

    fn index(&self, coords: BoardCoord) -> &Self::Output {
        &self.letters[coords.to_nd_index()]
    }
}

/// Parses rows separated by commas, whitespace or newlines, e.g. `"CATS,OREN,DIAL,PEGS"`.
impl FromStr for GameBoard {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().flat_map(char::to_uppercase).collect())
            .collect();
        Self::from_letters(rows)
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.letters.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, letter) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rand::{SeedableRng, rngs::SmallRng};

    fn board() -> GameBoard {
        "CATS,OREN,DIAL,PEGS".parse().unwrap()
    }

    #[test]
    fn parses_rows_and_indexes_letters() {
        let board = board();
        assert_eq!(board.size(), 4);
        assert_eq!(board[BoardCoord::new(0, 0)], 'C');
        assert_eq!(board.get(BoardCoord::new(1, 3)), Some('N'));
        assert_eq!(board.get(BoardCoord::new(4, 0)), None);
        assert_eq!(board.get(BoardCoord::new(0, 9)), None);
    }

    #[test]
    fn rejects_non_square_letters() {
        let rows = vec![vec!['A', 'B'], vec!['C']];
        assert_eq!(GameBoard::from_letters(rows), Err(GameError::InvalidBoardShape));
        assert_eq!(GameBoard::from_letters(vec![]), Err(GameError::InvalidBoardShape));
        assert!("ABC,DEF".parse::<GameBoard>().is_err());
    }

    #[test]
    fn equality_compares_letters() {
        assert_eq!(board(), board());
        let patched = board().with_letter(BoardCoord::new(3, 3), 'X').unwrap();
        assert_ne!(board(), patched);
        assert_eq!(patched[BoardCoord::new(3, 3)], 'X');
        assert_eq!(
            board().with_letter(BoardCoord::new(4, 0), 'X'),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn neighbors_use_fixed_order() {
        let board = board();
        let neighbors: Vec<_> = board.neighbors(BoardCoord::new(0, 1)).collect();
        assert_eq!(
            neighbors,
            vec![
                BoardCoord::new(0, 2),
                BoardCoord::new(1, 2),
                BoardCoord::new(1, 1),
                BoardCoord::new(1, 0),
                BoardCoord::new(0, 0),
            ]
        );
    }

    #[test]
    fn rotation_formulas() {
        let c = BoardCoord::new(0, 1);
        assert_eq!(Rotation::Deg0.apply(c, 4), c);
        assert_eq!(Rotation::Deg90.apply(c, 4), BoardCoord::new(1, 3));
        assert_eq!(Rotation::Deg180.apply(c, 4), BoardCoord::new(3, 2));
        assert_eq!(Rotation::Deg270.apply(c, 4), BoardCoord::new(2, 0));
    }

    #[test]
    fn four_quarter_turns_return_home() {
        for coords in iter_coords(5) {
            let turned = (0..4).fold(coords, |c, _| Rotation::Deg90.apply(c, 5));
            assert_eq!(turned, coords);
            let rotation = Rotation::Deg270;
            assert_eq!(rotation.inverse().apply(rotation.apply(coords, 5), 5), coords);
        }
        let mut rotation = Rotation::Deg0;
        for _ in 0..4 {
            rotation = rotation.next();
        }
        assert_eq!(rotation, Rotation::Deg0);
    }

    #[test]
    fn rotated_coordinates_map_display_cells_back() {
        let board = board();
        let grid = board.rotated_coordinates(Rotation::Deg90);
        // top-left on screen shows what used to be the bottom-left corner
        assert_eq!(grid[[0, 0]], BoardCoord::new(3, 0));
        assert_eq!(grid[[0, 3]], BoardCoord::new(0, 0));
        for display in board.iter_coords() {
            assert_eq!(
                grid[display.to_nd_index()],
                Rotation::Deg90.inverse().apply(display, 4)
            );
        }
    }

    #[test]
    fn random_board_is_seeded() {
        let dist = LetterDistribution::english();
        let a = GameBoard::random(5, &dist, &mut SmallRng::seed_from_u64(3));
        let b = GameBoard::random(5, &dist, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a.size(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn spell_and_display() {
        let board = board();
        let path = [BoardCoord::new(0, 0), BoardCoord::new(0, 1), BoardCoord::new(0, 2)];
        assert_eq!(board.spell(&path).as_deref(), Some("CAT"));
        assert_eq!(board.spell(&[BoardCoord::new(9, 9)]), None);
        assert_eq!(board.to_string().lines().next(), Some("C A T S"));
        assert_eq!(board.rows().nth(1).as_deref(), Some("OREN"));
    }
}
