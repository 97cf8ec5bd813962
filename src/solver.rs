//! Optimal move search (IDA*) used for hints.

use crate::error::SolveError;
use crate::puzzle::{Move, Puzzle, Slot};

/// Node limit for [`solve`]. Enough for any 3x3 board, most 4x4 boards run out.
pub const NODE_BUDGET: usize = 5_000_000;

pub fn solve(puzzle: &Puzzle) -> Result<Vec<Move>, SolveError> {
    solve_with_budget(puzzle, NODE_BUDGET)
}

/// Shortest move sequence that brings `puzzle` back to the solved order.
pub fn solve_with_budget(puzzle: &Puzzle, budget: usize) -> Result<Vec<Move>, SolveError> {
    if !puzzle.is_solvable() {
        return Err(SolveError::Unsolvable);
    }

    let mut search = Search {
        board: puzzle.clone(),
        path: Vec::new(),
        nodes: 0,
        budget,
    };
    let mut bound = heuristic(&search.board);

    loop {
        match search.ida_star_search(0, bound, None) {
            Step::Found => return Ok(search.path),
            Step::Exceeded(next) => bound = next,
            Step::Aborted => return Err(SolveError::BudgetExhausted { nodes: search.nodes }),
            Step::DeadEnd => return Err(SolveError::Unsolvable),
        }
    }
}

enum Step {
    Found,
    /// Smallest f-cost that went over the bound.
    Exceeded(usize),
    DeadEnd,
    Aborted,
}

struct Search {
    board: Puzzle,
    path: Vec<Move>,
    nodes: usize,
    budget: usize,
}

impl Search {
    fn ida_star_search(&mut self, g: usize, bound: usize, last_move: Option<Move>) -> Step {
        self.nodes += 1;
        if self.nodes > self.budget {
            return Step::Aborted;
        }

        let f = g + heuristic(&self.board);
        if f > bound {
            return Step::Exceeded(f);
        }
        if self.board.is_solved() {
            return Step::Found;
        }

        let mut min = usize::MAX;
        for dir in Move::ALL {
            if last_move == Some(dir.opposite()) {
                continue;
            }
            if !self.board.apply_move(dir) {
                continue;
            }

            self.path.push(dir);
            match self.ida_star_search(g + 1, bound, Some(dir)) {
                Step::Found => return Step::Found,
                Step::Aborted => return Step::Aborted,
                Step::Exceeded(t) => min = min.min(t),
                Step::DeadEnd => {}
            }
            self.path.pop();
            self.board.apply_move(dir.opposite());
        }

        if min == usize::MAX {
            Step::DeadEnd
        } else {
            Step::Exceeded(min)
        }
    }
}

fn heuristic(puzzle: &Puzzle) -> usize {
    manhattan_distance(puzzle) + 2 * linear_conflicts(puzzle)
}

fn manhattan_distance(puzzle: &Puzzle) -> usize {
    let cols = puzzle.cols();
    puzzle
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| match slot {
            Slot::Tile(id) => Some((i, *id)),
            Slot::Empty => None,
        })
        .map(|(i, id)| (i / cols).abs_diff(id / cols) + (i % cols).abs_diff(id % cols))
        .sum()
}

/// Tiles sitting in their goal row (or column) but in the wrong relative
/// order. Each line contributes the number of tiles that must leave it, so
/// the estimate stays admissible.
fn linear_conflicts(puzzle: &Puzzle) -> usize {
    let rows = puzzle.rows();
    let cols = puzzle.cols();
    let slots = puzzle.slots();
    let mut conflicts = 0;

    // Row conflicts
    for row in 0..rows {
        let goals: Vec<usize> = (0..cols)
            .filter_map(|col| match slots[row * cols + col] {
                Slot::Tile(id) if id / cols == row => Some(id % cols),
                _ => None,
            })
            .collect();
        conflicts += goals.len() - longest_increasing(&goals);
    }

    // Column conflicts
    for col in 0..cols {
        let goals: Vec<usize> = (0..rows)
            .filter_map(|row| match slots[row * cols + col] {
                Slot::Tile(id) if id % cols == col => Some(id / cols),
                _ => None,
            })
            .collect();
        conflicts += goals.len() - longest_increasing(&goals);
    }

    conflicts
}

fn longest_increasing(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 0..values.len() {
        for j in 0..i {
            if values[j] < values[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_zero_when_solved() {
        let puzzle = Puzzle::new(4, 4).unwrap();
        assert_eq!(heuristic(&puzzle), 0);
    }

    #[test]
    fn two_displaced_tiles() {
        let mut puzzle = Puzzle::new(3, 3).unwrap();
        puzzle.apply_move(Move::Down);
        puzzle.apply_move(Move::Right);
        assert_eq!(manhattan_distance(&puzzle), 2);
        assert_eq!(linear_conflicts(&puzzle), 0);
        assert_eq!(heuristic(&puzzle), 2);
    }

    #[test]
    fn longest_increasing_subsequence() {
        assert_eq!(longest_increasing(&[2, 0, 1]), 2);
        assert_eq!(longest_increasing(&[2, 1, 0]), 1);
        assert_eq!(longest_increasing(&[0, 1, 2]), 3);
        assert_eq!(longest_increasing(&[]), 0);
    }

    #[test]
    fn budget_is_enforced() {
        let mut puzzle = Puzzle::new(3, 3).unwrap();
        puzzle.apply_move(Move::Down);
        puzzle.apply_move(Move::Right);
        assert!(matches!(
            solve_with_budget(&puzzle, 1),
            Err(SolveError::BudgetExhausted { .. })
        ));
    }
}
