//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation near existing stones
//! - Threat scoring for hypothetical placements
//! - Move ordering from the AI's point of view
//! - Alpha-Beta minimax over a single board with an undo stack

pub mod alphabeta;
pub mod candidates;
pub mod ordering;
pub mod position;
pub mod threat;

pub use alphabeta::{node_move_cap, SearchResult, Searcher, WIN_SCORE};
pub use candidates::candidate_moves;
pub use ordering::{rank_moves, score_move, ScoredMove};
pub use position::Position;
pub use threat::{is_immediate_win, threat_score};
