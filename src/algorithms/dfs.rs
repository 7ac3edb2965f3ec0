use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    open_neighbors, reconstruct_path, PathfindingAlgorithm, VisitedGrid,
};
use crate::board::{Board, Position};
use crate::error::Error;

/// Depth-first search: breadth-first with the FIFO frontier swapped for a
/// stack. Finds some path, not necessarily a shortest one.
#[derive(Default)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl PathfindingAlgorithm for DepthFirst {
    fn find_path(
        &mut self,
        board: &mut Board,
        start: Position,
        goal: Position,
    ) -> Result<FxHashSet<Position>, Error> {
        board.get(start.row, start.col)?;
        board.get(goal.row, goal.col)?;

        let mut frontier = Vec::new();
        let mut visited = VisitedGrid::new(board);
        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();

        frontier.push(start);
        visited.mark(start);

        let mut expansions = 0usize;
        while let Some(current) = frontier.pop() {
            if current == goal {
                debug!("dfs reached goal after {expansions} expansions");
                return reconstruct_path(board, &came_from, start, goal);
            }
            expansions += 1;

            // Same discovery-time marking and neighbour order as BFS; only
            // the pop end differs.
            for neighbor in open_neighbors(board, current) {
                if !visited.is_marked(neighbor) {
                    came_from.insert(neighbor, current);
                    visited.mark(neighbor);
                    frontier.push(neighbor);
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

    /// Every cell on the returned path must be reachable from a neighbouring
    /// path cell, i.e. the set forms one 4-connected component.
    fn assert_connected(path: &FxHashSet<Position>, start: Position) {
        let mut seen = FxHashSet::default();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(pos) = stack.pop() {
            for (d_row, d_col) in crate::board::NEIGHBOR_OFFSETS {
                if let Some(next) = pos.offset(d_row, d_col) {
                    if path.contains(&next) && seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
        assert_eq!(seen.len(), path.len());
    }

    #[test]
    fn finds_some_path_on_an_open_field() {
        let mut board = Board::new(5, 5, true).unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(4, 4);

        let path = DepthFirst::new().find_path(&mut board, start, goal).unwrap();

        assert!(path.contains(&start));
        assert!(path.contains(&goal));
        // A valid route is at least as long as the Manhattan distance.
        assert!(path.len() >= 9);
        assert_connected(&path, start);
    }

    #[test]
    fn routes_around_a_center_wall() {
        let mut board = Board::new(3, 3, false).unwrap();
        board.set(1, 1, CellState::Wall).unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(2, 2);

        let path = DepthFirst::new().find_path(&mut board, start, goal).unwrap();

        assert!(!path.contains(&Position::new(1, 1)));
        assert_connected(&path, start);
    }

    #[test]
    fn degenerate_single_cell_query() {
        let mut board = Board::new(1, 1, false).unwrap();
        let origin = Position::new(0, 0);

        let path = DepthFirst::new().find_path(&mut board, origin, origin).unwrap();

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
            DepthFirst::new().find_path(&mut board, Position::new(0, 0), Position::new(0, 3));

        assert_eq!(result, Err(Error::PathNotFound));
        assert_eq!(board, pristine);
    }

    #[test]
    fn corridor_path_is_deterministic() {
        let mut board = Board::new(1, 4, false).unwrap();

        let path = DepthFirst::new()
            .find_path(&mut board, Position::new(0, 0), Position::new(0, 3))
            .unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(board.get(0, 1), Ok(CellState::Route));
        assert_eq!(board.get(0, 2), Ok(CellState::Route));
    }
}
