use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, CellState, Position, NEIGHBOR_OFFSETS};
use crate::error::Error;
use crate::generators::{MazeGenerator, RenderHook};

/// The 8-neighbourhood inspected by the isolation check, four orthogonal
/// offsets first.
const EXTENDED_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Randomized depth-first ("growing tree") maze generation.
///
/// Extends a tree of carved cells from the top of an explicit stack,
/// backtracking when the active cell has no carvable neighbour left. A
/// neighbour wall is carvable only when the isolation check says the new
/// cell would touch no carved region other than the one it grows from,
/// which keeps the maze loop-free.
pub struct RandomDepthFirst<'a> {
    board: &'a mut Board,
    rng: &'a mut StdRng,
    stack: Vec<Position>,
    multiplier: u32,
    hook: Option<&'a mut dyn RenderHook>,
}

impl<'a> RandomDepthFirst<'a> {
    /// Fills the board with walls and prepares a generation run. Same
    /// dimension and cadence requirements as [`super::RandomPrim`].
    pub fn new(
        board: &'a mut Board,
        rng: &'a mut StdRng,
        multiplier: u32,
        hook: Option<&'a mut dyn RenderHook>,
    ) -> Result<Self, Error> {
        if multiplier == 0 {
            return Err(Error::InvalidMultiplier);
        }
        let (rows, cols) = board.size();
        if rows < 3 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        board.fill(CellState::Wall);
        Ok(RandomDepthFirst {
            board,
            rng,
            stack: Vec::new(),
            multiplier,
            hook,
        })
    }

    fn state_at(&self, pos: Position) -> Option<CellState> {
        self.board.get(pos.row, pos.col).ok()
    }

    /// Offsets excluded from the isolation check for a cell approached
    /// along `dir`: the three positions on the side the carve came from,
    /// which necessarily touch the active region.
    fn ignored_offsets(dir: (isize, isize)) -> [(isize, isize); 3] {
        let (d_row, d_col) = dir;
        if d_row != 0 {
            [(-d_row, d_col), (-d_row, d_row), (-d_row, -d_row)]
        } else {
            [(d_row, -d_col), (d_col, -d_col), (-d_col, -d_col)]
        }
    }

    /// True when carving `candidate`, reached along `dir`, would touch no
    /// carved cell outside the approach side: every in-bounds cell of the
    /// extended neighbourhood minus the ignored offsets must still be wall.
    fn is_isolated(&self, dir: (isize, isize), candidate: Position) -> bool {
        let ignored = Self::ignored_offsets(dir);
        EXTENDED_OFFSETS.iter().all(|&(d_row, d_col)| {
            if ignored.contains(&(d_row, d_col)) {
                return true;
            }
            match candidate.offset(d_row, d_col) {
                Some(pos) => self
                    .state_at(pos)
                    .map_or(true, |state| state == CellState::Wall),
                None => true,
            }
        })
    }

    /// A uniformly random neighbour wall of `cell` whose far side passes
    /// the isolation check, `None` when the cell is exhausted.
    fn random_unvisited_neighbor(&mut self, cell: Position) -> Option<Position> {
        let mut candidates = Vec::with_capacity(4);
        for (d_row, d_col) in NEIGHBOR_OFFSETS {
            if let Some(neighbor) = cell.offset(d_row, d_col) {
                if self.state_at(neighbor) == Some(CellState::Wall)
                    && self.is_isolated((d_row, d_col), neighbor)
                {
                    candidates.push(neighbor);
                }
            }
        }
        candidates.choose(self.rng).copied()
    }

    fn yield_frame(&mut self, count: &mut u32) {
        if *count % self.multiplier == 0 {
            if let Some(hook) = self.hook.as_mut() {
                hook.process_events();
                hook.draw_frame(self.board);
            }
            *count = 0;
        }
        *count += 1;
    }
}

impl MazeGenerator for RandomDepthFirst<'_> {
    fn generate(&mut self) -> Result<(), Error> {
        let (rows, _) = self.board.size();
        let start = Position::new(self.rng.gen_range(1..=rows - 2), 0);
        self.board.set(start.row, start.col, CellState::Path)?;
        self.stack.push(start);

        let mut count = 0u32;
        let mut carved = 1usize;
        while let Some(cell) = self.stack.pop() {
            if let Some(next) = self.random_unvisited_neighbor(cell) {
                // Re-push the active cell so the walk can back up to it
                // once the new branch is exhausted.
                self.stack.push(cell);
                self.board.set(next.row, next.col, CellState::Path)?;
                carved += 1;
                self.yield_frame(&mut count);
                self.stack.push(next);
            }
        }

        debug!("randomized depth-first carved {carved} cells starting from {start}");
        Ok(())
    }
}
