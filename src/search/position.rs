//! Search position: one mutable board plus an undo stack
//!
//! Every `make` is paired with an `unmake` on the way back up the tree, so
//! sibling branches always start from the same board.

use crate::board::{Board, Pos, Stone};

#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    /// (cell, previous contents)
    undo: Vec<(Pos, Stone)>,
}

impl Position {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            undo: Vec::with_capacity(16),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves currently applied on top of the root board
    #[inline]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Put `stone` on `pos`, remembering what was there
    #[inline]
    pub fn make(&mut self, pos: Pos, stone: Stone) {
        let prior = self.board.set(pos, stone);
        self.undo.push((pos, prior));
    }

    /// Revert the most recent `make`
    #[inline]
    pub fn unmake(&mut self) {
        if let Some((pos, prior)) = self.undo.pop() {
            self.board.set(pos, prior);
        }
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
