use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::board::{Board, CellState, Position, NEIGHBOR_OFFSETS};
use crate::error::Error;
use crate::generators::{MazeGenerator, RenderHook};

/// Randomized Prim's algorithm.
///
/// Grows a spanning maze from a random left-edge cell by repeatedly picking
/// a random frontier wall and carving through it when it separates exactly
/// one carved cell from unvisited territory.
pub struct RandomPrim<'a> {
    board: &'a mut Board,
    rng: &'a mut StdRng,
    walls: Vec<Position>,
    multiplier: u32,
    hook: Option<&'a mut dyn RenderHook>,
}

impl<'a> RandomPrim<'a> {
    /// Fills the board with walls and prepares a generation run. The board
    /// needs at least 3 rows for the randomized edge start; `multiplier` is
    /// the carve cadence between visualization yields and must be positive.
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
        Ok(RandomPrim {
            board,
            rng,
            walls: Vec::new(),
            multiplier,
            hook,
        })
    }

    fn state_at(&self, pos: Position) -> Option<CellState> {
        self.board.get(pos.row, pos.col).ok()
    }

    /// Pushes every still-walled neighbour of `pos` onto the frontier list.
    /// Duplicates are fine; they are re-validated when popped.
    fn push_neighboring_walls(&mut self, pos: Position) {
        for (d_row, d_col) in NEIGHBOR_OFFSETS {
            if let Some(neighbor) = pos.offset(d_row, d_col) {
                if self.state_at(neighbor) == Some(CellState::Wall) {
                    self.walls.push(neighbor);
                }
            }
        }
    }

    /// The already-carved cells among the four neighbours of `pos`.
    fn surrounding_paths(&self, pos: Position) -> Vec<Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|&neighbor| self.state_at(neighbor) == Some(CellState::Path))
            .collect()
    }

    /// The still-walled cell on the far side of `wall`, opposite its single
    /// carved neighbour along the same axis. `None` when the far side is
    /// off the board or already carved.
    fn passage(&self, wall: Position) -> Result<Option<Position>, Error> {
        let paths = self.surrounding_paths(wall);
        let carved = match paths.as_slice() {
            [single] => *single,
            _ => {
                return Err(Error::InvariantViolation(
                    "a frontier wall must touch exactly one carved cell",
                ))
            }
        };

        let d_row = carved.row as isize - wall.row as isize;
        let d_col = carved.col as isize - wall.col as isize;
        let candidate = wall.offset(-d_row, -d_col);
        match candidate {
            Some(pos) if self.state_at(pos) == Some(CellState::Wall) => Ok(Some(pos)),
            _ => Ok(None),
        }
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

impl MazeGenerator for RandomPrim<'_> {
    fn generate(&mut self) -> Result<(), Error> {
        let (rows, _) = self.board.size();
        let start = Position::new(self.rng.gen_range(1..=rows - 2), 0);
        self.board.set(start.row, start.col, CellState::Path)?;
        self.push_neighboring_walls(start);

        let mut count = 0u32;
        let mut carved = 1usize;
        while !self.walls.is_empty() {
            let index = self.rng.gen_range(0..self.walls.len());
            let wall = self.walls.swap_remove(index);

            // Only walls dividing exactly one carved cell from unvisited
            // territory are carved; everything else is a stale entry.
            if self.surrounding_paths(wall).len() != 1 {
                continue;
            }
            if let Some(unvisited) = self.passage(wall)? {
                self.board.set(wall.row, wall.col, CellState::Path)?;
                self.board.set(unvisited.row, unvisited.col, CellState::Path)?;
                carved += 2;
                self.yield_frame(&mut count);
                self.push_neighboring_walls(unvisited);
            }
        }

        debug!("randomized prim carved {carved} cells starting from {start}");
        Ok(())
    }
}
