//! Threat evaluation for hypothetical placements
//!
//! Both functions treat the target cell as already holding the given color
//! without touching the board.

use crate::board::{Board, Pos, Stone};
use crate::config::Rules;
use crate::eval::{scan_line, ThreatScore};
use crate::rules::has_win_through;

/// Threat value of a `color` stone at `pos` along one direction.
///
/// Tiered: winning run 30000, four 15000 (one end open) or 10000, three 5000
/// (both ends open) or 2500, two 800 or 400, lone stone 100.
#[inline]
pub fn threat_score(board: &Board, pos: Pos, color: Stone, dir: (i32, i32), rules: &Rules) -> i32 {
    let shape = scan_line(board, pos, dir.0, dir.1, color, rules.win_length);
    ThreatScore::of(shape, rules.win_length)
}

/// Would a `color` stone at `pos` complete a gapless winning run?
#[inline]
pub fn is_immediate_win(board: &Board, pos: Pos, color: Stone, rules: &Rules) -> bool {
    has_win_through(board, pos, color, rules)
}
