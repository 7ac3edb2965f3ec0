use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, CellState, Position, NEIGHBOR_OFFSETS};
use crate::error::Error;

/// A pathfinding strategy over a [`Board`].
///
/// On success the discovered route is written onto the board (`Route` for
/// the interior cells, `StartEnd` for the start) and the full set of on-path
/// coordinates, endpoints included, is returned. On
/// [`Error::PathNotFound`] the board is left exactly as it was.
pub trait PathfindingAlgorithm {
    fn find_path(
        &mut self,
        board: &mut Board,
        start: Position,
        goal: Position,
    ) -> Result<FxHashSet<Position>, Error>;
}

/// Manhattan distance between two cells, the admissible and consistent
/// heuristic for unit-cost 4-connected movement.
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    let rows = (a.row as i64 - b.row as i64).unsigned_abs();
    let cols = (a.col as i64 - b.col as i64).unsigned_abs();
    (rows + cols) as u32
}

/// Neighbours of `pos` that are on the board and not walls, in the fixed
/// up, left, right, down order.
pub fn open_neighbors(board: &Board, pos: Position) -> Vec<Position> {
    let mut neighbors = Vec::with_capacity(4);
    for (d_row, d_col) in NEIGHBOR_OFFSETS {
        if let Some(neighbor) = pos.offset(d_row, d_col) {
            if board
                .get(neighbor.row, neighbor.col)
                .map_or(false, |state| state != CellState::Wall)
            {
                neighbors.push(neighbor);
            }
        }
    }
    neighbors
}

/// Walks the predecessor chain from `goal` back to `start`, marking every
/// cell on the way `Route` and finally the start `StartEnd`. Returns the set
/// of on-path coordinates including both endpoints.
pub fn reconstruct_path(
    board: &mut Board,
    came_from: &FxHashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Result<FxHashSet<Position>, Error> {
    let mut path = FxHashSet::default();
    path.insert(goal);

    let mut current = goal;
    while current != start {
        current = *came_from.get(&current).ok_or(Error::InvariantViolation(
            "predecessor chain does not reach the start cell",
        ))?;
        path.insert(current);
        board.set(current.row, current.col, CellState::Route)?;
    }
    board.set(start.row, start.col, CellState::StartEnd)?;

    Ok(path)
}

/// Dense visited markers sized to the board's logical dimensions.
pub(crate) struct VisitedGrid {
    cols: usize,
    cells: Vec<bool>,
}

impl VisitedGrid {
    pub fn new(board: &Board) -> Self {
        let (rows, cols) = board.size();
        VisitedGrid {
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn mark(&mut self, pos: Position) {
        self.cells[pos.row * self.cols + pos.col] = true;
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.cells[pos.row * self.cols + pos.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(4, 4);
        assert_eq!(manhattan_distance(a, b), 8);
        assert_eq!(manhattan_distance(b, a), 8);
        assert_eq!(manhattan_distance(a, a), 0);
    }

    #[test]
    fn open_neighbors_skips_walls_and_edges() {
        let mut board = Board::new(3, 3, false).unwrap();
        board.set(0, 1, CellState::Wall).unwrap();

        let neighbors = open_neighbors(&board, Position::new(0, 0));
        assert_eq!(neighbors, vec![Position::new(1, 0)]);
    }

    #[test]
    fn neighbor_order_is_up_left_right_down() {
        let board = Board::new(3, 3, false).unwrap();
        let neighbors = open_neighbors(&board, Position::new(1, 1));
        assert_eq!(
            neighbors,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1)
            ]
        );
    }
}
