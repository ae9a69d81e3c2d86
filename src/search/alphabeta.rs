//! Depth-limited minimax with alpha-beta pruning
//!
//! # Features
//!
//! - Terminal test by whole-board scan, leaf scoring by the static heuristic
//! - Candidates ranked from the AI's side at every node, capped by remaining depth
//! - Early exit, at the root too, as soon as a child returns a win for the side choosing
//! - One board mutated in place with an undo stack; no per-node copies
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone};
//! use gomoku::config::{Rules, SearchLimits};
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(Rules::default());
//! let board = Board::new();
//!
//! let result = searcher.search(&board, Stone::Black, SearchLimits::new(2, 5));
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! ```

use tracing::{instrument, trace};

use crate::board::{Board, Pos, Stone};
use crate::config::{Rules, SearchLimits};
use crate::eval::evaluate;
use crate::rules::scan_winner;

use super::candidates::candidate_moves;
use super::ordering::{rank_moves, ScoredMove};
use super::position::Position;

/// Score of a won position for the AI; the negation is a loss
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Moves explored at an interior node, by remaining depth.
///
/// Nodes close to the horizon look wider than nodes deep in the tree.
#[inline]
pub fn node_move_cap(depth: u8) -> usize {
    match depth {
        1 => 20,
        2 => 12,
        _ => 8,
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best root move, `None` only when there was nothing to search
    pub best_move: Option<Pos>,
    /// Minimax value of the best move
    pub score: f64,
    /// Depth searched
    pub depth: u8,
    /// Nodes visited
    pub nodes: u64,
}

/// Alpha-beta searcher.
///
/// Holds the rules it scores under and a node counter; no state survives
/// between searches.
#[derive(Debug, Clone)]
pub struct Searcher {
    rules: Rules,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self { rules, nodes: 0 }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Nodes visited since the searcher was created
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search the root for `ai`.
    ///
    /// Candidates are ranked, cut to `limits.root_moves`, and each one is
    /// searched to `limits.depth - 1` with the opponent to move. The first
    /// move reaching the highest value wins ties.
    #[instrument(skip(self, board), fields(stones = board.stone_count()))]
    pub fn search(&mut self, board: &Board, ai: Stone, limits: SearchLimits) -> SearchResult {
        let start_nodes = self.nodes;
        let moves = candidate_moves(board);
        let mut ranked = rank_moves(board, &moves, ai, &self.rules);
        ranked.truncate(limits.root_moves);

        let child_depth = limits.depth.saturating_sub(1);
        let mut position = Position::new(board.clone());
        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;

        for ScoredMove { pos, .. } in ranked {
            position.make(pos, ai);
            // The running best is a valid lower bound: anything at or below it
            // loses the strict comparison anyway.
            let score = self.minimax(
                &mut position,
                child_depth,
                false,
                ai,
                ai.opponent(),
                best_score,
                f64::INFINITY,
            );
            position.unmake();
            trace!(row = pos.row, col = pos.col, score, "root move");

            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            if best_score >= WIN_SCORE {
                break;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            depth: limits.depth,
            nodes: self.nodes - start_nodes,
        }
    }

    /// Minimax value of `board` for `ai` with `to_move` to play.
    ///
    /// Convenience wrapper over [`Searcher::minimax`] with open bounds.
    pub fn score(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        ai: Stone,
        to_move: Stone,
    ) -> f64 {
        let mut position = Position::new(board.clone());
        self.minimax(
            &mut position,
            depth,
            maximizing,
            ai,
            to_move,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }

    /// Alpha-beta minimax.
    ///
    /// `maximizing` says whose score is being chosen at this node; `to_move`
    /// is the color placed by this node's children. Both flip every ply.
    /// Terminal checks run in order: AI run, opponent run, full board, horizon.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        position: &mut Position,
        depth: u8,
        maximizing: bool,
        ai: Stone,
        to_move: Stone,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.nodes += 1;

        let board = position.board();
        match scan_winner(board, &self.rules) {
            Some(winner) if winner == ai => return WIN_SCORE,
            Some(_) => return -WIN_SCORE,
            None => {}
        }
        if board.is_full() {
            return 0.0;
        }
        if depth == 0 {
            return evaluate(board, ai, &self.rules);
        }

        let moves = candidate_moves(board);
        let mut ranked = rank_moves(board, &moves, ai, &self.rules);
        ranked.truncate(node_move_cap(depth));
        let next = to_move.opponent();

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            for ScoredMove { pos, .. } in ranked {
                position.make(pos, to_move);
                let child = self.minimax(position, depth - 1, false, ai, next, alpha, beta);
                position.unmake();

                value = value.max(child);
                alpha = alpha.max(value);
                if alpha >= beta || value >= WIN_SCORE {
                    break;
                }
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for ScoredMove { pos, .. } in ranked {
                position.make(pos, to_move);
                let child = self.minimax(position, depth - 1, true, ai, next, alpha, beta);
                position.unmake();

                value = value.min(child);
                beta = beta.min(value);
                if alpha >= beta || value <= -WIN_SCORE {
                    break;
                }
            }
            value
        }
    }
}
