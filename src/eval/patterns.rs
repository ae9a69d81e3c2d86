//! Line patterns and their scores
//!
//! A [`LineShape`] is what a single scan through one cell along one direction
//! sees. The same shape is priced by two tables: [`ThreatScore`] for a
//! hypothetical stone during move ordering and [`PatternScore`] for real
//! stones at search leaves.

use crate::board::{Board, Pos, Stone};

/// Run length and end state seen from one cell along one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShape {
    /// Same-colored stones on the line, counting the origin cell.
    /// May jump over a single empty cell.
    pub count: usize,
    /// Forward walk hit the edge or an opponent stone
    pub blocked_forward: bool,
    /// Backward walk hit the edge or an opponent stone
    pub blocked_backward: bool,
}

impl LineShape {
    /// Both ends open
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.blocked_forward && !self.blocked_backward
    }

    /// At least one end open
    #[inline]
    pub fn is_half_open(&self) -> bool {
        !self.blocked_forward || !self.blocked_backward
    }
}

/// Scan the line through `pos` along `(dr, dc)` as if `pos` held `color`.
///
/// Walks up to `win_length - 1` cells each way. An empty cell is stepped over
/// once; a second empty cell anywhere on the line (the budget is shared by
/// both walks) ends the walk that finds it, without marking that end blocked.
/// The cell at `pos` is never read.
pub fn scan_line(
    board: &Board,
    pos: Pos,
    dr: i32,
    dc: i32,
    color: Stone,
    win_length: usize,
) -> LineShape {
    let mut count = 1;
    let mut gaps = 0;
    let mut blocked = [false; 2];

    for (side, sign) in [1, -1].into_iter().enumerate() {
        for step in 1..win_length as i32 {
            let (r, c) = pos.offset(dr * sign, dc * sign, step);
            match board.get_at(r, c) {
                Some(s) if s == color => count += 1,
                Some(Stone::Empty) => {
                    gaps += 1;
                    if gaps > 1 {
                        break;
                    }
                }
                // Edge or opponent
                _ => {
                    blocked[side] = true;
                    break;
                }
            }
        }
    }

    LineShape {
        count,
        blocked_forward: blocked[0],
        blocked_backward: blocked[1],
    }
}

/// Threat value of a hypothetical stone, one direction
pub struct ThreatScore;

impl ThreatScore {
    /// Run reaches the winning length
    pub const WIN: i32 = 30_000;
    /// Four with at least one open end
    pub const FOUR: i32 = 15_000;
    pub const BLOCKED_FOUR: i32 = 10_000;
    /// Three with both ends open
    pub const OPEN_THREE: i32 = 5_000;
    pub const BLOCKED_THREE: i32 = 2_500;
    pub const OPEN_TWO: i32 = 800;
    pub const BLOCKED_TWO: i32 = 400;
    pub const SINGLE: i32 = 100;

    pub fn of(shape: LineShape, win_length: usize) -> i32 {
        if shape.count >= win_length {
            return Self::WIN;
        }
        match shape.count {
            4 if shape.is_half_open() => Self::FOUR,
            4 => Self::BLOCKED_FOUR,
            3 if shape.is_open() => Self::OPEN_THREE,
            3 => Self::BLOCKED_THREE,
            2 if shape.is_open() => Self::OPEN_TWO,
            2 => Self::BLOCKED_TWO,
            1 => Self::SINGLE,
            _ => 0,
        }
    }
}

/// Static value of a real stone's line, one direction
pub struct PatternScore;

impl PatternScore {
    /// Open four: _OOOO_
    pub const OPEN_FOUR: f64 = 50_000.0;
    /// Closed four: XOOOO_ or _OOOOX
    pub const CLOSED_FOUR: f64 = 25_000.0;
    pub const OPEN_THREE: f64 = 10_000.0;
    pub const CLOSED_THREE: f64 = 5_000.0;
    pub const OPEN_TWO: f64 = 500.0;
    pub const CLOSED_TWO: f64 = 250.0;
    pub const SINGLE: f64 = 25.0;

    /// Completed runs score nothing here; the search handles them as terminal.
    pub fn of(shape: LineShape, win_length: usize) -> f64 {
        if shape.count >= win_length {
            return 0.0;
        }
        match shape.count {
            4 if shape.is_open() => Self::OPEN_FOUR,
            4 => Self::CLOSED_FOUR,
            3 if shape.is_open() => Self::OPEN_THREE,
            3 => Self::CLOSED_THREE,
            2 if shape.is_open() => Self::OPEN_TWO,
            2 => Self::CLOSED_TWO,
            1 => Self::SINGLE,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(count: usize, blocked_forward: bool, blocked_backward: bool) -> LineShape {
        LineShape {
            count,
            blocked_forward,
            blocked_backward,
        }
    }

    #[test]
    fn test_threat_table() {
        assert_eq!(ThreatScore::of(shape(5, true, true), 5), 30_000);
        assert_eq!(ThreatScore::of(shape(6, false, false), 5), 30_000);
        assert_eq!(ThreatScore::of(shape(4, true, false), 5), 15_000);
        assert_eq!(ThreatScore::of(shape(4, true, true), 5), 10_000);
        assert_eq!(ThreatScore::of(shape(3, false, false), 5), 5_000);
        assert_eq!(ThreatScore::of(shape(3, false, true), 5), 2_500);
        assert_eq!(ThreatScore::of(shape(2, false, false), 5), 800);
        assert_eq!(ThreatScore::of(shape(2, true, false), 5), 400);
        assert_eq!(ThreatScore::of(shape(1, true, true), 5), 100);
    }

    #[test]
    fn test_pattern_table() {
        assert_eq!(PatternScore::of(shape(5, false, false), 5), 0.0);
        assert_eq!(PatternScore::of(shape(4, false, false), 5), 50_000.0);
        assert_eq!(PatternScore::of(shape(4, false, true), 5), 25_000.0);
        assert_eq!(PatternScore::of(shape(3, false, false), 5), 10_000.0);
        assert_eq!(PatternScore::of(shape(3, true, false), 5), 5_000.0);
        assert_eq!(PatternScore::of(shape(2, false, false), 5), 500.0);
        assert_eq!(PatternScore::of(shape(2, true, true), 5), 250.0);
        assert_eq!(PatternScore::of(shape(1, false, false), 5), 25.0);
    }

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::CLOSED_TWO);
        assert!(PatternScore::CLOSED_TWO > PatternScore::SINGLE);
    }

    #[test]
    fn test_scan_open_three() {
        let board = Board::from_rows(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "...XX.....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ])
        .unwrap();
        // Hypothetical X at (4, 5): XXX with space both sides
        let s = scan_line(&board, Pos::new(4, 5), 0, 1, Stone::Black, 5);
        assert_eq!(s.count, 3);
        assert!(s.is_open());
    }

    #[test]
    fn test_scan_blocked_by_edge_and_opponent() {
        let board = Board::from_rows(&[
            "XXX.......",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ])
        .unwrap();
        let s = scan_line(&board, Pos::new(0, 0), 0, 1, Stone::Black, 5);
        assert_eq!(s.count, 3);
        assert!(!s.blocked_forward);
        assert!(s.blocked_backward);

        let board = Board::from_rows(&[
            "..........",
            "..OXX.....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ])
        .unwrap();
        let s = scan_line(&board, Pos::new(1, 3), 0, 1, Stone::Black, 5);
        assert_eq!(s.count, 2);
        assert!(s.blocked_backward);
        assert!(!s.blocked_forward);
    }

    #[test]
    fn test_scan_steps_over_one_gap() {
        let board = Board::from_rows(&[
            "..........",
            "..........",
            "..X.XX....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ])
        .unwrap();
        // Origin (2, 2): forward sees gap, X, X, then a second gap ends it
        let s = scan_line(&board, Pos::new(2, 2), 0, 1, Stone::Black, 5);
        assert_eq!(s.count, 3);
        assert!(!s.blocked_forward);
        // The gap budget is spent, so the backward walk stops at once
        assert!(!s.blocked_backward);
    }

    #[test]
    fn test_scan_ignores_origin_cell() {
        let board = Board::from_rows(&[
            "O.........",
            "X.........",
            "X.........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ])
        .unwrap();
        // (0, 0) holds White; scanning as Black treats it as Black
        let s = scan_line(&board, Pos::new(0, 0), 1, 0, Stone::Black, 5);
        assert_eq!(s.count, 3);
        assert!(s.blocked_backward);
    }
}
