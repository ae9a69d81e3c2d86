//! Gomoku AI engine for a 10x10 five-in-a-row board
//!
//! - Free-style rules: five or more in a row wins, no captures, no forbidden moves
//! - Black moves first
//! - The AI picks moves by immediate win, forced block, then alpha-beta search
//!
//! # Architecture
//!
//! - [`board`]: Board representation and coordinates
//! - [`rules`]: Win detection and game outcome
//! - [`eval`]: Line shapes, pattern scores and the static evaluation
//! - [`search`]: Candidate generation, move ordering and alpha-beta
//! - [`engine`]: Move selection integrating all components
//! - [`config`]: Rules, difficulty table and search budget
//! - [`record`]: Finished-match records and player statistics
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new();
//!
//! board.place(Pos::new(5, 5), Stone::Black).unwrap();
//!
//! // AI responds as White
//! let pos = engine.choose_move(&board, Stone::White, Difficulty::Easy).unwrap();
//! board.place(pos, Stone::White).unwrap();
//! println!("AI plays at ({}, {})", pos.row, pos.col);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod record;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Move, Pos, Stone, BOARD_SIZE, MAX_BOARD_SIZE};
pub use config::{Difficulty, GameConfig, Rules, SearchLimits};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GomokuError, Result};
pub use record::{MatchRecord, Scoreboard};
pub use rules::Outcome;
