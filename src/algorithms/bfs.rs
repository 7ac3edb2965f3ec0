use std::collections::VecDeque;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    open_neighbors, reconstruct_path, PathfindingAlgorithm, VisitedGrid,
};
use crate::board::{Board, Position};
use crate::error::Error;

/// Breadth-first search. Uniform edge weights mean discovery order already
/// yields a shortest path, so no cost bookkeeping is needed.
#[derive(Default)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl PathfindingAlgorithm for BreadthFirst {
    fn find_path(
        &mut self,
        board: &mut Board,
        start: Position,
        goal: Position,
    ) -> Result<FxHashSet<Position>, Error> {
        board.get(start.row, start.col)?;
        board.get(goal.row, goal.col)?;

        let mut frontier = VecDeque::new();
        let mut visited = VisitedGrid::new(board);
        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();

        frontier.push_back(start);
        visited.mark(start);

        let mut expansions = 0usize;
        while let Some(current) = frontier.pop_front() {
            if current == goal {
                debug!("bfs reached goal after {expansions} expansions");
                return reconstruct_path(board, &came_from, start, goal);
            }
            expansions += 1;

            for neighbor in open_neighbors(board, current) {
                // Marking at discovery time keeps a cell from being enqueued
                // once per approach direction.
                if !visited.is_marked(neighbor) {
                    came_from.insert(neighbor, current);
                    visited.mark(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }

        Err(Error::PathNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    #[test]
    fn open_field_path_has_manhattan_length() {
        let mut board = Board::new(5, 5, true).unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(4, 4);

        let path = BreadthFirst::new().find_path(&mut board, start, goal).unwrap();

        assert_eq!(path.len(), 9);
        assert!(path.contains(&start));
        assert!(path.contains(&goal));
    }

    #[test]
    fn routes_around_a_center_wall() {
        let mut board = Board::new(3, 3, false).unwrap();
        board.set(1, 1, CellState::Wall).unwrap();

        let path = BreadthFirst::new()
            .find_path(&mut board, Position::new(0, 0), Position::new(2, 2))
            .unwrap();

        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Position::new(1, 1)));
    }

    #[test]
    fn degenerate_single_cell_query() {
        let mut board = Board::new(1, 1, false).unwrap();
        let origin = Position::new(0, 0);

        let path = BreadthFirst::new().find_path(&mut board, origin, origin).unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(board.get(0, 0), Ok(CellState::StartEnd));
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let mut board = Board::new(4, 4, false).unwrap();
        for (row, col) in [(0, 2), (1, 2), (2, 2), (3, 2)] {
            board.set(row, col, CellState::Wall).unwrap();
        }
        let pristine = board.clone();

        let result =
            BreadthFirst::new().find_path(&mut board, Position::new(0, 0), Position::new(0, 3));

        assert_eq!(result, Err(Error::PathNotFound));
        assert_eq!(board, pristine);
    }
}
