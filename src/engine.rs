//! Main AI Engine integrating all search components
//!
//! The engine picks a move with a fixed priority:
//!
//! 1. **Immediate win**: first candidate that completes a run for the AI
//! 2. **Block**: first candidate where the opponent would complete a run
//! 3. **Only move**: a single candidate survives the root cap, nothing to compare
//! 4. **Alpha-Beta**: ranked, capped root moves searched to the difficulty's depth
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new();
//! board.place(Pos::new(5, 5), Stone::Black).unwrap();
//!
//! let result = engine
//!     .choose_move_with_stats(&board, Stone::White, Difficulty::Easy)
//!     .unwrap();
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::board::{Board, Pos, Stone};
use crate::config::{Difficulty, GameConfig};
use crate::error::{GomokuError, Result};
use crate::search::{
    candidate_moves, is_immediate_win, rank_moves, score_move, SearchResult, Searcher, WIN_SCORE,
};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SearchType {
    /// Move completes a run for the AI
    ImmediateWin,
    /// Move stops the opponent completing a run
    Block,
    /// Only one candidate was left after the root cap
    OnlyMove,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Minimax value for alpha-beta results, [`WIN_SCORE`] for an immediate
    /// win, the move ordering score otherwise
    pub score: f64,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn block(pos: Pos, score: f64, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score,
            search_type: SearchType::Block,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn only_move(pos: Pos, score: f64, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score,
            search_type: SearchType::OnlyMove,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(pos: Pos, result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Stateless between calls apart from the lifetime node counter; every call
/// is a pure function of the board, the side and the difficulty.
///
/// # Example
///
/// ```
/// use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
///
/// let mut engine = AIEngine::new();
/// let board = Board::new();
/// let pos = engine.choose_move(&board, Stone::Black, Difficulty::Hard).unwrap();
/// assert_eq!(pos, Pos::new(5, 5));
/// ```
#[derive(Debug, Clone)]
pub struct AIEngine {
    config: GameConfig,
    searcher: Searcher,
}

impl AIEngine {
    /// Create an engine with the default 10x10, five-in-a-row configuration
    #[must_use]
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self {
            searcher: Searcher::new(config.rules),
            config,
        }
    }

    /// Create an engine with a custom configuration, validated first
    pub fn with_config(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            searcher: Searcher::new(config.rules),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Configured time budget. Not enforced: a started search runs to the end.
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.config.time_limit_ms)
    }

    /// Total nodes searched by this engine
    pub fn nodes_searched(&self) -> u64 {
        self.searcher.nodes()
    }

    /// Get the best move for `ai`.
    ///
    /// Use `choose_move_with_stats` if you need search statistics.
    pub fn choose_move(&mut self, board: &Board, ai: Stone, difficulty: Difficulty) -> Result<Pos> {
        self.choose_move_with_stats(board, ai, difficulty)
            .map(|result| result.best_move)
    }

    /// Like `choose_move`, with the difficulty given by name.
    /// Unknown names play at medium strength.
    pub fn choose_move_named(&mut self, board: &Board, ai: Stone, difficulty: &str) -> Result<Pos> {
        self.choose_move(board, ai, Difficulty::from_name(difficulty))
    }

    /// Get the best move with search statistics.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the board size differs from the configured size or
    ///   `ai` is `Stone::Empty`
    /// - `NoLegalMoves` if the board is full
    #[instrument(skip(self, board))]
    pub fn choose_move_with_stats(
        &mut self,
        board: &Board,
        ai: Stone,
        difficulty: Difficulty,
    ) -> Result<MoveResult> {
        let start = Instant::now();
        self.validate(board, ai)?;

        let rules = self.config.rules;
        let opponent = ai.opponent();
        let candidates = candidate_moves(board);
        if candidates.is_empty() {
            return Err(GomokuError::NoLegalMoves);
        }

        // 1. Our own winning move
        if let Some(&pos) = candidates
            .iter()
            .find(|&&pos| is_immediate_win(board, pos, ai, &rules))
        {
            let result = MoveResult::immediate_win(pos, elapsed_ms(start));
            log_result(&result);
            return Ok(result);
        }

        // 2. Opponent's winning move must be blocked
        if let Some(&pos) = candidates
            .iter()
            .find(|&&pos| is_immediate_win(board, pos, opponent, &rules))
        {
            let score = score_move(board, pos, ai, &rules);
            let result = MoveResult::block(pos, score, elapsed_ms(start));
            log_result(&result);
            return Ok(result);
        }

        let limits = self.config.limits(difficulty);

        // 3. Nothing to compare against
        if candidates.len().min(limits.root_moves) == 1 {
            let top = rank_moves(board, &candidates, ai, &rules)
                .into_iter()
                .next()
                .ok_or(GomokuError::NoLegalMoves)?;
            let result = MoveResult::only_move(top.pos, top.score, elapsed_ms(start));
            log_result(&result);
            return Ok(result);
        }

        // 4. Full search
        let search = self.searcher.search(board, ai, limits);
        let pos = search.best_move.ok_or(GomokuError::NoLegalMoves)?;
        let result = MoveResult::from_alphabeta(pos, search, elapsed_ms(start));
        log_result(&result);
        Ok(result)
    }

    #[instrument(level = "trace", skip(self, board), err)]
    fn validate(&self, board: &Board, ai: Stone) -> Result<()> {
        if board.size() != self.config.rules.board_size {
            return Err(GomokuError::invalid(format!(
                "board is {0}x{0}, expected {1}x{1}",
                board.size(),
                self.config.rules.board_size
            )));
        }
        if ai == Stone::Empty {
            return Err(GomokuError::invalid("AI side must be black or white"));
        }
        Ok(())
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_result(result: &MoveResult) {
    debug!(
        row = result.best_move.row,
        col = result.best_move.col,
        search_type = ?result.search_type,
        score = result.score,
        nodes = result.nodes,
        time_ms = result.time_ms,
        "move chosen"
    );
}
