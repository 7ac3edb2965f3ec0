use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    manhattan_distance, open_neighbors, reconstruct_path, PathfindingAlgorithm,
};
use crate::board::{Board, Position};
use crate::error::Error;

/// Frontier entry ordered by estimated total cost `f = g + h`, with an
/// insertion sequence number so equal-cost entries pop in insertion order.
#[derive(Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    seq: u64,
    pos: Position,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison to make BinaryHeap a min-heap
        match other.f.cmp(&self.f) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ordering => ordering,
        }
    }
}

/// A* search with the Manhattan heuristic, optimal on unit-cost
/// 4-connected grids.
#[derive(Default)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl PathfindingAlgorithm for AStar {
    fn find_path(
        &mut self,
        board: &mut Board,
        start: Position,
        goal: Position,
    ) -> Result<FxHashSet<Position>, Error> {
        board.get(start.row, start.col)?;
        board.get(goal.row, goal.col)?;

        let mut open = BinaryHeap::new();
        let mut in_open: FxHashSet<Position> = FxHashSet::default();
        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();
        let mut g_scores: FxHashMap<Position, u32> = FxHashMap::default();
        let mut seq = 0u64;

        // Absent keys stand for an infinite path cost.
        let get_g = |g_scores: &FxHashMap<Position, u32>, pos: Position| -> u32 {
            g_scores.get(&pos).copied().unwrap_or(u32::MAX)
        };

        g_scores.insert(start, 0);
        open.push(FrontierEntry {
            f: manhattan_distance(start, goal),
            seq,
            pos: start,
        });
        in_open.insert(start);

        let mut expansions = 0usize;
        while let Some(entry) = open.pop() {
            let current = entry.pos;
            if current == goal {
                debug!("a_star reached goal after {expansions} expansions");
                return reconstruct_path(board, &came_from, start, goal);
            }
            in_open.remove(&current);
            expansions += 1;

            for neighbor in open_neighbors(board, current) {
                let tentative_g = get_g(&g_scores, current).saturating_add(1);
                if tentative_g < get_g(&g_scores, neighbor) {
                    came_from.insert(neighbor, current);
                    g_scores.insert(neighbor, tentative_g);
                    if in_open.insert(neighbor) {
                        seq += 1;
                        open.push(FrontierEntry {
                            f: tentative_g.saturating_add(manhattan_distance(neighbor, goal)),
                            seq,
                            pos: neighbor,
                        });
                    }
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

        let path = AStar::new().find_path(&mut board, start, goal).unwrap();

        // Manhattan distance 8 => 9 cells including both endpoints.
        assert_eq!(path.len(), 9);
        assert!(path.contains(&start));
        assert!(path.contains(&goal));
        assert_eq!(board.get(0, 0), Ok(CellState::StartEnd));
    }

    #[test]
    fn routes_around_a_center_wall() {
        let mut board = Board::new(3, 3, false).unwrap();
        board.set(1, 1, CellState::Wall).unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(2, 2);

        let path = AStar::new().find_path(&mut board, start, goal).unwrap();

        // Still a length-4 route, just not through the middle.
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Position::new(1, 1)));
        assert_eq!(board.get(1, 1), Ok(CellState::Wall));
    }

    #[test]
    fn degenerate_single_cell_query() {
        let mut board = Board::new(1, 1, false).unwrap();
        let origin = Position::new(0, 0);

        let path = AStar::new().find_path(&mut board, origin, origin).unwrap();

        assert_eq!(path.len(), 1);
        assert!(path.contains(&origin));
        assert_eq!(board.get(0, 0), Ok(CellState::StartEnd));
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let mut board = Board::new(4, 4, false).unwrap();
        for (row, col) in [(2, 0), (2, 1), (2, 2), (2, 3)] {
            board.set(row, col, CellState::Wall).unwrap();
        }
        let pristine = board.clone();

        let result = AStar::new().find_path(&mut board, Position::new(0, 0), Position::new(3, 3));

        assert_eq!(result, Err(Error::PathNotFound));
        assert_eq!(board, pristine);
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut board = Board::new(3, 3, false).unwrap();
        let result = AStar::new().find_path(&mut board, Position::new(0, 0), Position::new(3, 3));
        assert_eq!(result, Err(Error::OutOfBounds { row: 3, col: 3 }));
    }

    #[test]
    fn interior_route_cells_are_marked() {
        let mut board = Board::new(1, 4, false).unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(0, 3);

        let path = AStar::new().find_path(&mut board, start, goal).unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(board.get(0, 0), Ok(CellState::StartEnd));
        assert_eq!(board.get(0, 1), Ok(CellState::Route));
        assert_eq!(board.get(0, 2), Ok(CellState::Route));
        // The goal cell is the driver's to mark; the algorithm leaves it alone.
        assert_eq!(board.get(0, 3), Ok(CellState::Path));
    }
}
