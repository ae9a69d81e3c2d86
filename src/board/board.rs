//! Board structure: a square grid of cells that only ever gains stones

use std::fmt;

use tracing::instrument;

use super::{Move, Pos, Stone, BOARD_SIZE, MAX_BOARD_SIZE};
use crate::error::{GomokuError, Result};

/// Game board.
///
/// Public mutation is append-only: [`Board::place`] fills an empty cell and
/// refuses everything else. The search engine temporarily writes and restores
/// cells through a crate-private path (see `search::position`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major cells
    cells: Vec<Stone>,
    /// Number of non-empty cells
    stones: usize,
}

impl Board {
    /// Create an empty board of the default size
    pub fn new() -> Self {
        Self::empty(BOARD_SIZE)
    }

    /// Create an empty `size` x `size` board.
    ///
    /// Coordinates are `u8`, so `size` must be in `1..=255`.
    pub fn with_size(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GomokuError::invalid(format!(
                "board size {size} is out of range 1..={MAX_BOARD_SIZE}"
            )));
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            stones: 0,
        }
    }

    /// Parse a board from text rows.
    ///
    /// `.` is empty, `X`/`B` black, `O`/`W` white. Whitespace inside a row is
    /// ignored. The board must be square.
    ///
    /// ```
    /// use gomoku::{Board, Pos, Stone};
    ///
    /// let board = Board::from_rows(&["X..", ".O.", "..."]).unwrap();
    /// assert_eq!(board.get(Pos::new(1, 1)), Stone::White);
    /// ```
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(GomokuError::invalid("board has no rows"));
        }
        let mut board = Board::with_size(size)?;
        for (r, row) in rows.iter().enumerate() {
            let mut width = 0;
            for ch in row.as_ref().chars().filter(|c| !c.is_whitespace()) {
                let stone = Stone::from_symbol(ch).ok_or_else(|| {
                    GomokuError::invalid(format!("unknown cell {ch:?} in row {r}"))
                })?;
                if width < size && stone != Stone::Empty {
                    #[allow(clippy::cast_possible_truncation)]
                    let pos = Pos::new(r as u8, width as u8);
                    board.set(pos, stone);
                }
                width += 1;
            }
            if width != size {
                return Err(GomokuError::invalid(format!(
                    "row {r} has {width} cells, expected {size}"
                )));
            }
        }
        Ok(board)
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check signed coordinates against the board edges
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Convert signed coordinates into a position on this board
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        if !self.contains(row, col) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pos = Pos::new(row as u8, col as u8);
        Some(pos)
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        usize::from(pos.row) * self.size + usize::from(pos.col)
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)]
    }

    /// Get stone at signed coordinates, `None` when off the board
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.pos_at(row, col).map(|pos| self.get(pos))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone into an empty cell.
    ///
    /// Stones are never removed or recolored once placed.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<()> {
        if stone == Stone::Empty {
            return Err(GomokuError::invalid("cannot place an empty stone"));
        }
        if !self.contains(i32::from(pos.row), i32::from(pos.col)) {
            return Err(GomokuError::OutOfBounds {
                row: i32::from(pos.row),
                col: i32::from(pos.col),
            });
        }
        if !self.is_empty(pos) {
            return Err(GomokuError::CellOccupied { pos });
        }
        self.set(pos, stone);
        Ok(())
    }

    /// Place a move, see [`Board::place`]
    pub fn apply(&mut self, mov: Move) -> Result<()> {
        self.place(mov.pos, mov.stone)
    }

    /// Raw cell write, returns the previous cell state.
    /// Only the search's undo stack may write over a stone.
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, stone: Stone) -> Stone {
        let idx = self.index(pos);
        let prior = self.cells[idx];
        match (prior == Stone::Empty, stone == Stone::Empty) {
            (true, false) => self.stones += 1,
            (false, true) => self.stones -= 1,
            _ => {}
        }
        self.cells[idx] = stone;
        prior
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// True iff no cell is empty
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// Center cell `(size / 2, size / 2)`
    #[inline]
    pub fn center(&self) -> Pos {
        #[allow(clippy::cast_possible_truncation)]
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        (0..self.cells.len()).map(move |i| Pos::new((i / size) as u8, (i % size) as u8))
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        self.positions()
            .map(move |pos| (pos, self.get(pos)))
            .filter(|(_, stone)| *stone != Stone::Empty)
    }

    /// One text row per board row, in the `from_rows` format
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|s| s.symbol()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
