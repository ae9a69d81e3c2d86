//! Move ordering
//!
//! Candidates are ranked from the AI's point of view at every node, so the
//! same board always produces the same order regardless of who is to move.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::config::Rules;

use super::threat::{is_immediate_win, threat_score};

/// Score assigned to an immediate AI win. Nothing else is added.
pub const WIN_MOVE: f64 = 500_000.0;
/// Added when the opponent would win on this cell
pub const BLOCK_MOVE: f64 = 400_000.0;
/// Per unit of closeness to the center
pub const CENTER_WEIGHT: f64 = 50.0;
/// Per neighbouring AI stone
pub const ADJACENT_OWN: f64 = 100.0;
/// Per neighbouring opponent stone
pub const ADJACENT_OPPONENT: f64 = 80.0;

/// A candidate and its ordering score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: f64,
}

/// Amplify one direction's threat for an AI stone.
/// Strong threats are boosted so that multi-direction forks stand out.
#[inline]
fn attack_weight(raw: i32) -> f64 {
    match raw {
        r if r >= 30_000 => 100_000.0,
        r if r >= 15_000 => 50_000.0,
        r if r >= 5_000 => 10_000.0,
        r => f64::from(r),
    }
}

/// Amplify one direction's threat for an opponent stone (the block value).
#[inline]
fn defense_weight(raw: i32) -> f64 {
    match raw {
        r if r >= 30_000 => 80_000.0,
        r if r >= 15_000 => 40_000.0,
        r if r >= 5_000 => 8_000.0,
        r => f64::from(r) * 0.85,
    }
}

/// Ordering score of a single candidate
pub fn score_move(board: &Board, pos: Pos, ai: Stone, rules: &Rules) -> f64 {
    let opponent = ai.opponent();

    if is_immediate_win(board, pos, ai, rules) {
        return WIN_MOVE;
    }

    let mut score = 0.0;
    if is_immediate_win(board, pos, opponent, rules) {
        score += BLOCK_MOVE;
    }

    for &dir in &DIRECTIONS {
        score += attack_weight(threat_score(board, pos, ai, dir, rules));
    }
    for &dir in &DIRECTIONS {
        score += defense_weight(threat_score(board, pos, opponent, dir, rules));
    }

    let size = board.size() as f64;
    score += (size - f64::from(pos.manhattan(board.center()))) * CENTER_WEIGHT;

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = pos.offset(dr, dc, 1);
            match board.get_at(r, c) {
                Some(s) if s == ai => score += ADJACENT_OWN,
                Some(s) if s == opponent => score += ADJACENT_OPPONENT,
                _ => {}
            }
        }
    }

    score
}

/// Rank candidates best first. Ties keep their input order.
pub fn rank_moves(board: &Board, moves: &[Pos], ai: Stone, rules: &Rules) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = moves
        .iter()
        .map(|&pos| ScoredMove {
            pos,
            score: score_move(board, pos, ai, rules),
        })
        .collect();
    // `sort_by` is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
