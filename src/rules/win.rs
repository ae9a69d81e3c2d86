//! Win condition checking
//!
//! Two views of the same rule:
//! 1. `has_win_through`: placement-local, looks only at lines through one cell.
//!    Used after every real move.
//! 2. `scan_winner`: whole-board scan, forward runs only. This is what the
//!    search uses as its terminal test.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::config::Rules;

/// Final state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    Win(Stone),
    Draw,
}

/// Length of the contiguous `color` run starting next to `pos` and walking
/// `(dr, dc)`. The cell at `pos` itself is not read. Stops after `limit` cells.
#[inline]
fn run_from(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone, limit: usize) -> usize {
    let mut count = 0;
    for step in 1..=limit as i32 {
        let (r, c) = pos.offset(dr, dc, step);
        if board.get_at(r, c) != Some(color) {
            break;
        }
        count += 1;
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// Treats `pos` as holding `color` (whether or not it does yet), so it also
/// answers "would this placement win". Only walks the 4 lines through `pos`.
#[inline]
pub fn has_win_through(board: &Board, pos: Pos, color: Stone, rules: &Rules) -> bool {
    if color == Stone::Empty {
        return false;
    }
    let reach = rules.win_length.saturating_sub(1);
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = run_from(board, pos, dr, dc, color, reach);
        let backward = run_from(board, pos, -dr, -dc, color, reach);
        forward + backward + 1 >= rules.win_length
    })
}

/// Scan the whole board for a winner.
///
/// For every occupied cell in row-major order, checks whether the next
/// `win_length - 1` cells in a forward direction hold the same color.
/// Returns the first color found.
pub fn scan_winner(board: &Board, rules: &Rules) -> Option<Stone> {
    let reach = rules.win_length.saturating_sub(1);
    board.occupied().find_map(|(pos, color)| {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| run_from(board, pos, dr, dc, color, reach) == reach)
            .then_some(color)
    })
}

/// True iff no cell is empty
#[inline]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// Cells of a winning run through `pos`, ordered end to end.
///
/// Returns an empty list when no line through `pos` qualifies. Display only,
/// the search never calls this.
pub fn winning_line(board: &Board, pos: Pos, color: Stone, rules: &Rules) -> Vec<Pos> {
    if color == Stone::Empty {
        return Vec::new();
    }
    let reach = rules.win_length.saturating_sub(1);
    for &(dr, dc) in &DIRECTIONS {
        let backward = run_from(board, pos, -dr, -dc, color, reach) as i32;
        let forward = run_from(board, pos, dr, dc, color, reach) as i32;
        if (backward + forward + 1) as usize >= rules.win_length {
            return (-backward..=forward)
                .filter_map(|step| {
                    let (r, c) = pos.offset(dr, dc, step);
                    board.pos_at(r, c)
                })
                .collect();
        }
    }
    Vec::new()
}

/// Winner or draw, `None` while the game is still running
pub fn outcome(board: &Board, rules: &Rules) -> Option<Outcome> {
    if let Some(winner) = scan_winner(board, rules) {
        return Some(Outcome::Win(winner));
    }
    is_full(board).then_some(Outcome::Draw)
}
