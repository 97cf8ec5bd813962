use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;

use crate::error::PuzzleError;

/// Direction a tile slides into the empty slot.
///
/// `Up` pulls the tile below the hole upwards, so the hole itself moves down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset `(rows, cols)` from the empty slot to the tile that moves.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A tile, identified by the slot it occupies in the solved picture.
    Tile(usize),
    Empty,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Row-major grid of tiles with exactly one empty slot.
///
/// In the solved order slot `i` holds `Tile(i)` and the last slot is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    slots: Vec<Slot>,
}

impl Puzzle {
    /// Creates a solved grid. Call [`Puzzle::shuffle`] before handing it to a player.
    pub fn new(rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 || rows * cols < 2 {
            return Err(PuzzleError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            slots: Self::identity(rows * cols),
        })
    }

    /// Builds a grid from an explicit arrangement. `slots` must hold every
    /// tile id below `rows * cols - 1` once, plus one empty slot.
    pub fn from_slots(rows: usize, cols: usize, slots: Vec<Slot>) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::new(rows, cols)?;
        let len = puzzle.len();
        if slots.len() != len {
            return Err(PuzzleError::InvalidSlots { expected: len - 1 });
        }

        let mut seen = vec![false; len];
        for slot in &slots {
            let key = match slot {
                Slot::Tile(id) if *id < len - 1 => *id,
                Slot::Tile(_) => return Err(PuzzleError::InvalidSlots { expected: len - 1 }),
                Slot::Empty => len - 1,
            };
            if std::mem::replace(&mut seen[key], true) {
                return Err(PuzzleError::InvalidSlots { expected: len - 1 });
            }
        }

        puzzle.slots = slots;
        Ok(puzzle)
    }

    fn identity(len: usize) -> Vec<Slot> {
        (0..len)
            .map(|i| if i + 1 == len { Slot::Empty } else { Slot::Tile(i) })
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut thread_rng());
    }

    /// Uniform permutation of all slots. Solvability is not enforced.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.slots.shuffle(rng);
    }

    pub fn find_empty(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_empty)
    }

    /// True when the tile at `index` shares an edge with the empty slot.
    pub fn can_move(&self, index: usize) -> bool {
        let Some(empty) = self.find_empty() else {
            return false;
        };
        if index >= self.slots.len() {
            return false;
        }

        let vertical = index.abs_diff(empty) == self.cols;
        let horizontal = index.abs_diff(empty) == 1 && index / self.cols == empty / self.cols;
        vertical || horizontal
    }

    /// Slides the tile at `index` into the empty slot. Returns false and
    /// leaves the grid untouched when the tile is not adjacent to the hole.
    pub fn move_tile(&mut self, index: usize) -> bool {
        if !self.can_move(index) {
            return false;
        }
        match self.find_empty() {
            Some(empty) => {
                self.slots.swap(index, empty);
                true
            }
            None => false,
        }
    }

    /// Index of the tile that `movement` would slide, if it exists.
    pub fn target_of(&self, movement: Move) -> Option<usize> {
        let empty = self.find_empty()?;
        let (dr, dc) = movement.as_offset();

        let row = (empty / self.cols) as isize + dr;
        let col = (empty % self.cols) as isize + dc;

        if row >= 0 && row < self.rows as isize && col >= 0 && col < self.cols as isize {
            Some(row as usize * self.cols + col as usize)
        } else {
            None
        }
    }

    pub fn apply_move(&mut self, movement: Move) -> bool {
        match self.target_of(movement) {
            Some(index) => self.move_tile(index),
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, slot)| match slot {
                Slot::Tile(id) => *id == i,
                Slot::Empty => i + 1 == self.slots.len(),
            })
    }

    pub fn reset(&mut self) {
        self.slots = Self::identity(self.slots.len());
    }

    pub fn restart(&mut self) {
        self.shuffle();
    }

    /// Whether legal slides can bring the current arrangement back to the
    /// solved order.
    pub fn is_solvable(&self) -> bool {
        let Some(empty) = self.find_empty() else {
            return false;
        };
        let inversions = Self::count_inversions(&self.slots);

        if self.rows == 1 || self.cols == 1 {
            // A single line of tiles can only shift the hole, never reorder.
            inversions == 0
        } else if self.cols % 2 == 1 {
            // Horizontal slides keep the inversion count, vertical ones
            // shift it by an even number.
            inversions % 2 == 0
        } else {
            // Each vertical slide flips inversion parity and the hole's row.
            let empty_row = empty / self.cols;
            (inversions + empty_row) % 2 == (self.rows - 1) % 2
        }
    }

    fn count_inversions(slots: &[Slot]) -> usize {
        let tiles: Vec<usize> = slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Tile(id) => Some(*id),
                Slot::Empty => None,
            })
            .collect();

        tiles
            .iter()
            .enumerate()
            .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.slots.chunks(self.cols) {
            for slot in row {
                // The empty space is represented by 0
                let label = match slot {
                    Slot::Tile(id) => id + 1,
                    Slot::Empty => 0,
                };
                write!(f, "{:2} ", label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn with_slots(rows: usize, cols: usize, slots: Vec<Slot>) -> Puzzle {
        Puzzle::from_slots(rows, cols, slots).unwrap()
    }

    fn tiles(order: &[Option<usize>]) -> Vec<Slot> {
        order
            .iter()
            .map(|t| t.map_or(Slot::Empty, Slot::Tile))
            .collect()
    }

    #[test]
    fn new_grid_is_solved_with_empty_last() {
        let puzzle = Puzzle::new(3, 3).unwrap();
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.find_empty(), Some(8));
        assert_eq!(puzzle.slot(0), Some(Slot::Tile(0)));
        assert_eq!(puzzle.slot(9), None);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            Puzzle::new(1, 1),
            Err(PuzzleError::InvalidDimensions { rows: 1, cols: 1 })
        );
        assert!(Puzzle::new(0, 4).is_err());
        assert!(Puzzle::new(1, 2).is_ok());
    }

    #[test]
    fn down_from_corner_moves_hole_up() {
        let mut puzzle = Puzzle::new(3, 3).unwrap();
        assert!(puzzle.apply_move(Move::Down));
        assert_eq!(puzzle.find_empty(), Some(5));
        assert_eq!(puzzle.slot(8), Some(Slot::Tile(5)));
    }

    #[test]
    fn moves_off_the_grid_are_ignored() {
        let mut puzzle = Puzzle::new(3, 3).unwrap();
        assert!(!puzzle.apply_move(Move::Up));
        assert!(!puzzle.apply_move(Move::Left));
        assert!(puzzle.is_solved());
    }

    #[test]
    fn horizontal_moves_do_not_wrap_rows() {
        // Hole at 3 (start of the middle row): tile 2 is index-adjacent but
        // sits on the previous row.
        let mut puzzle = with_slots(
            3,
            3,
            tiles(&[Some(0), Some(1), Some(2), None, Some(3), Some(4), Some(5), Some(6), Some(7)]),
        );
        assert!(!puzzle.can_move(2));
        assert!(!puzzle.apply_move(Move::Right));
        assert!(puzzle.apply_move(Move::Left));
        assert_eq!(puzzle.find_empty(), Some(4));
    }

    #[test]
    fn adjacency_around_middle_right_hole() {
        let puzzle = with_slots(
            3,
            3,
            tiles(&[Some(0), Some(1), Some(2), Some(3), Some(4), None, Some(6), Some(7), Some(5)]),
        );
        assert!(puzzle.can_move(2));
        assert!(puzzle.can_move(4));
        assert!(puzzle.can_move(8));
        assert!(!puzzle.can_move(3));
        assert!(!puzzle.can_move(6));
        assert!(!puzzle.can_move(5));
        assert!(!puzzle.can_move(42));
    }

    #[test]
    fn target_of_follows_tile_direction() {
        let puzzle = with_slots(
            3,
            3,
            tiles(&[Some(0), Some(1), Some(2), Some(3), None, Some(5), Some(6), Some(7), Some(4)]),
        );
        assert_eq!(puzzle.target_of(Move::Up), Some(7));
        assert_eq!(puzzle.target_of(Move::Down), Some(1));
        assert_eq!(puzzle.target_of(Move::Left), Some(5));
        assert_eq!(puzzle.target_of(Move::Right), Some(3));
    }

    #[test]
    fn shuffle_keeps_every_tile() {
        let mut puzzle = Puzzle::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        puzzle.shuffle_with(&mut rng);

        let mut ids: Vec<usize> = puzzle
            .slots()
            .iter()
            .filter_map(|s| match s {
                Slot::Tile(id) => Some(*id),
                Slot::Empty => None,
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..15).collect::<Vec<_>>());
        assert_eq!(puzzle.slots().iter().filter(|s| s.is_empty()).count(), 1);
    }

    #[test]
    fn reset_restores_identity() {
        let mut puzzle = Puzzle::new(3, 4).unwrap();
        puzzle.shuffle_with(&mut StdRng::seed_from_u64(3));
        puzzle.reset();
        assert!(puzzle.is_solved());
        assert_eq!(puzzle, Puzzle::new(3, 4).unwrap());
    }

    #[test]
    fn solvability_of_swapped_pair() {
        let solvable = Puzzle::new(3, 3).unwrap();
        assert!(solvable.is_solvable());

        let odd = with_slots(
            3,
            3,
            tiles(&[Some(1), Some(0), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7), None]),
        );
        assert!(!odd.is_solvable());

        let mut even = Puzzle::new(4, 4).unwrap();
        assert!(even.is_solvable());
        even.apply_move(Move::Down);
        assert!(even.is_solvable());
        even.slots.swap(0, 1);
        assert!(!even.is_solvable());
    }

    #[test]
    fn single_line_grids_cannot_reorder() {
        let row = with_slots(1, 4, tiles(&[Some(2), Some(0), Some(1), None]));
        assert!(!row.is_solvable());
        assert!(!row.is_solved());

        let column = with_slots(4, 1, tiles(&[Some(2), Some(0), Some(1), None]));
        assert!(!column.is_solvable());

        let shifted = with_slots(1, 4, tiles(&[None, Some(0), Some(1), Some(2)]));
        assert!(shifted.is_solvable());

        let mut slid = Puzzle::new(3, 1).unwrap();
        assert!(slid.apply_move(Move::Down));
        assert!(slid.is_solvable());
    }

    #[test]
    fn from_slots_rejects_bad_arrangements() {
        let bad = PuzzleError::InvalidSlots { expected: 3 };
        assert_eq!(Puzzle::from_slots(2, 2, tiles(&[Some(0), Some(1), None])), Err(bad.clone()));
        assert_eq!(
            Puzzle::from_slots(2, 2, tiles(&[Some(0), Some(0), Some(1), None])),
            Err(bad.clone())
        );
        assert_eq!(
            Puzzle::from_slots(2, 2, tiles(&[Some(0), Some(1), None, None])),
            Err(bad.clone())
        );
        assert_eq!(
            Puzzle::from_slots(2, 2, tiles(&[Some(0), Some(1), Some(3), None])),
            Err(bad)
        );
        assert!(Puzzle::from_slots(2, 2, tiles(&[Some(2), None, Some(1), Some(0)])).is_ok());
    }

    #[test]
    fn display_uses_one_based_labels() {
        let puzzle = Puzzle::new(2, 2).unwrap();
        assert_eq!(puzzle.to_string(), " 1  2 \n 3  0 \n");
    }
}
