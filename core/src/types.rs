use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Position on the board, `row` grows downwards and `col` to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardCoord {
    pub row: Coord,
    pub col: Coord,
}

impl BoardCoord {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn in_bounds(self, size: Coord) -> bool {
        self.row < size && self.col < size
    }

    /// Whether `other` is one of the up to 8 cells touching `self`.
    pub const fn is_adjacent(self, other: BoardCoord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr | dc) != 0
    }
}

impl From<(Coord, Coord)> for BoardCoord {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for BoardCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for BoardCoord {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every coordinate of a `size`×`size` board in row-major order.
pub fn iter_coords(size: Coord) -> impl Iterator<Item = BoardCoord> {
    (0..size).flat_map(move |row| (0..size).map(move |col| BoardCoord::new(row, col)))
}

/// Offsets as `(row, col)`, clockwise starting at north-west.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: BoardCoord, delta: (i8, i8), size: Coord) -> Option<BoardCoord> {
    let (dr, dc) = delta;

    let row = coords.row.checked_add_signed(dr)?;
    if row >= size {
        return None;
    }

    let col = coords.col.checked_add_signed(dc)?;
    if col >= size {
        return None;
    }

    Some(BoardCoord::new(row, col))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: BoardCoord,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: BoardCoord, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = BoardCoord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn collect(center: (Coord, Coord), size: Coord) -> Vec<(Coord, Coord)> {
        NeighborIter::new(center.into(), size)
            .map(|c| (c.row, c.col))
            .collect()
    }

    #[test]
    fn center_cell_has_eight_neighbors_in_clockwise_order() {
        assert_eq!(
            collect((1, 1), 3),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]
        );
    }

    #[test]
    fn corner_cells_are_clipped() {
        assert_eq!(collect((0, 0), 4), vec![(0, 1), (1, 1), (1, 0)]);
        assert_eq!(collect((3, 3), 4), vec![(2, 2), (2, 3), (3, 2)]);
    }

    #[test]
    fn adjacency_excludes_self_and_distant_cells() {
        let a = BoardCoord::new(2, 2);
        assert!(a.is_adjacent(BoardCoord::new(1, 3)));
        assert!(a.is_adjacent(BoardCoord::new(2, 1)));
        assert!(!a.is_adjacent(a));
        assert!(!a.is_adjacent(BoardCoord::new(0, 2)));
    }

    #[test]
    fn iter_coords_is_row_major() {
        let coords: Vec<_> = iter_coords(2).collect();
        assert_eq!(
            coords,
            vec![
                BoardCoord::new(0, 0),
                BoardCoord::new(0, 1),
                BoardCoord::new(1, 0),
                BoardCoord::new(1, 1),
            ]
        );
    }
}
