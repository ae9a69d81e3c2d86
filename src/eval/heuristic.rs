//! Heuristic evaluation function for Gomoku board positions
//!
//! Used at search leaves only. Terminal positions (a completed run or a full
//! board) are scored by the search before this is reached.
//!
//! The weights are deliberately asymmetric: opponent patterns count at 0.9x
//! and opponent center control is subtracted at 0.5x.

use crate::board::{Board, Stone, DIRECTIONS};
use crate::config::Rules;

use super::patterns::{scan_line, PatternScore};

/// Weight of opponent line patterns
pub const OPPONENT_PATTERN_WEIGHT: f64 = 0.9;

/// Weight per unit of closeness to the center
pub const POSITION_WEIGHT: f64 = 3.0;

/// Weight of opponent center control
pub const OPPONENT_POSITION_WEIGHT: f64 = 0.5;

/// Evaluate the board from the perspective of `ai`.
///
/// Higher is better for `ai`. Every stone contributes its four line patterns
/// and a center bonus of `(size - manhattan_to_center) * 3`.
#[must_use]
pub fn evaluate(board: &Board, ai: Stone, rules: &Rules) -> f64 {
    evaluate_patterns(board, ai, rules) + evaluate_positions(board, ai)
}

/// Line pattern pass. Opponent patterns are added too, at reduced weight.
fn evaluate_patterns(board: &Board, ai: Stone, rules: &Rules) -> f64 {
    let mut score = 0.0;
    for (pos, color) in board.occupied() {
        for &(dr, dc) in &DIRECTIONS {
            let shape = scan_line(board, pos, dr, dc, color, rules.win_length);
            let value = PatternScore::of(shape, rules.win_length);
            if color == ai {
                score += value;
            } else {
                score += value * OPPONENT_PATTERN_WEIGHT;
            }
        }
    }
    score
}

/// Center control pass
fn evaluate_positions(board: &Board, ai: Stone) -> f64 {
    let center = board.center();
    let size = board.size() as f64;
    board
        .occupied()
        .map(|(pos, color)| {
            let bonus = (size - f64::from(pos.manhattan(center))) * POSITION_WEIGHT;
            if color == ai {
                bonus
            } else {
                -bonus * OPPONENT_POSITION_WEIGHT
            }
        })
        .sum()
}
