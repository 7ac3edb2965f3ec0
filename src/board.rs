use std::fmt;

use crate::error::Error;

/// Relative (row, col) offsets of the four reachable neighbours of a cell,
/// in the expansion order shared by every algorithm in this crate:
/// up, left, right, down.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// A logical (row, col) cell address on a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Applies a signed (row, col) offset, `None` if either component would
    /// go negative. Upper bounds are the board's concern, not the position's.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row as isize + d_row;
        let col = self.col as isize + d_col;
        if row < 0 || col < 0 {
            None
        } else {
            Some(Position::new(row as usize, col as usize))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The closed set of values a board cell may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// Traversable, the ungenerated default.
    Path = 0,
    /// Impassable.
    Wall = 1,
    /// Overlay marking a cell on the most recently discovered path.
    Route = 2,
    /// Overlay marking a query endpoint.
    StartEnd = 3,
}

impl CellState {
    /// One-character rendering of the state, used by the text display.
    pub fn glyph(self) -> char {
        match self {
            CellState::Path => '.',
            CellState::Wall => '#',
            CellState::Route => 'o',
            CellState::StartEnd => 'S',
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Path),
            1 => Ok(CellState::Wall),
            2 => Ok(CellState::Route),
            3 => Ok(CellState::StartEnd),
            other => Err(Error::InvalidCellValue(other)),
        }
    }
}

/// A bounded rectangular grid of [`CellState`] cells.
///
/// Storage is a flat row-major vector over the physical grid. When the board
/// is bordered, physical storage is one ring larger than the logical grid on
/// every side and the ring stays `Wall` forever; all public coordinates are
/// logical and translated internally, so neighbour checks in the algorithms
/// never need edge-condition branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    border: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Creates a `rows` x `cols` board with every logical cell set to
    /// [`CellState::Path`]. Dimensions must both be positive.
    pub fn new(rows: usize, cols: usize, bordered: bool) -> Result<Board, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let border = usize::from(bordered);
        let (phys_rows, phys_cols) = (rows + 2 * border, cols + 2 * border);
        let mut board = Board {
            rows,
            cols,
            border,
            cells: vec![CellState::Wall; phys_rows * phys_cols],
        };
        board.fill(CellState::Path);
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Logical (rows, cols) of the usable board.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Physical (rows, cols) of the backing storage, border ring included.
    pub fn actual_size(&self) -> (usize, usize) {
        (self.rows + 2 * self.border, self.cols + 2 * self.border)
    }

    pub fn is_bordered(&self) -> bool {
        self.border != 0
    }

    /// Range check on a logical coordinate; says nothing about cell state.
    pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, Error> {
        if !self.is_valid_position(row, col) {
            return Err(Error::OutOfBounds { row, col });
        }
        Ok(self.cells[self.index(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), Error> {
        if !self.is_valid_position(row, col) {
            return Err(Error::OutOfBounds { row, col });
        }
        let index = self.index(row, col);
        self.cells[index] = state;
        Ok(())
    }

    /// Sets every logical cell to `state`. Border cells are untouched.
    pub fn fill(&mut self, state: CellState) {
        for row in 0..self.rows {
            let start = self.index(row, 0);
            self.cells[start..start + self.cols].fill(state);
        }
    }

    /// Reinitializes all logical cells to [`CellState::Path`] in place.
    pub fn reset(&mut self) {
        self.fill(CellState::Path);
    }

    /// Rewrites every logical cell currently holding `from` to `to`. Used to
    /// clear `Route`/`StartEnd` overlays without disturbing walls.
    pub fn replace(&mut self, from: CellState, to: CellState) {
        for row in 0..self.rows {
            let start = self.index(row, 0);
            for cell in &mut self.cells[start..start + self.cols] {
                if *cell == from {
                    *cell = to;
                }
            }
        }
    }

    /// A copy of one logical row, `None` if the index is out of range.
    pub fn row(&self, row: usize) -> Option<Vec<CellState>> {
        if row >= self.rows {
            return None;
        }
        let start = self.index(row, 0);
        Some(self.cells[start..start + self.cols].to_vec())
    }

    /// A copy of one logical column, `None` if the index is out of range.
    pub fn col(&self, col: usize) -> Option<Vec<CellState>> {
        if col >= self.cols {
            return None;
        }
        Some((0..self.rows).map(|row| self.cells[self.index(row, col)]).collect())
    }

    /// Row-major traversal of the logical cells.
    pub fn iter_logical(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols)
                .map(move |col| (Position::new(row, col), self.cells[self.index(row, col)]))
        })
    }

    /// Row-major traversal of every physical cell, border ring included.
    /// Coordinates here are physical storage indices; this is for rendering,
    /// not algorithm logic.
    pub fn iter_physical(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let phys_cols = self.cols + 2 * self.border;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &state)| (Position::new(index / phys_cols, index % phys_cols), state))
    }

    /// Translates a logical coordinate to its physical storage index.
    fn index(&self, row: usize, col: usize) -> usize {
        (row + self.border) * (self.cols + 2 * self.border) + col + self.border
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (phys_rows, phys_cols) = self.actual_size();
        for row in 0..phys_rows {
            for col in 0..phys_cols {
                write!(f, "{} ", self.cells[row * phys_cols + col].glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
