//! Candidate move generation
//!
//! Only empty cells close to existing stones are worth searching.

use crate::board::{Board, Pos, Stone};

/// Chebyshev distance from a stone within which empty cells are candidates
pub const CANDIDATE_RADIUS: i32 = 2;

/// Empty cells within [`CANDIDATE_RADIUS`] of any stone.
///
/// Deduplicated, in discovery order: stones are visited row-major, and each
/// stone's neighbourhood row by row. An empty board yields only the center;
/// a full board yields nothing.
pub fn candidate_moves(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let size = board.size();
    let mut seen = vec![false; size * size];
    let mut moves = Vec::with_capacity(48);

    for (pos, _) in board.occupied() {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                let (r, c) = pos.offset(dr, dc, 1);
                let Some(near) = board.pos_at(r, c) else {
                    continue;
                };
                let idx = usize::from(near.row) * size + usize::from(near.col);
                if seen[idx] || board.get(near) != Stone::Empty {
                    continue;
                }
                seen[idx] = true;
                moves.push(near);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_center() {
        assert_eq!(candidate_moves(&Board::new()), vec![Pos::new(5, 5)]);
        assert_eq!(candidate_moves(&Board::with_size(7).unwrap()), vec![Pos::new(3, 3)]);
    }

    #[test]
    fn test_full_board_has_none() {
        let mut board = Board::with_size(3).unwrap();
        for (i, pos) in board.positions().collect::<Vec<_>>().into_iter().enumerate() {
            let stone = if i % 2 == 0 { Stone::Black } else { Stone::White };
            board.place(pos, stone).unwrap();
        }
        assert!(candidate_moves(&board).is_empty());
    }

    #[test]
    fn test_radius_two_square() {
        let mut board = Board::new();
        board.place(Pos::new(5, 5), Stone::Black).unwrap();
        let moves = candidate_moves(&board);
        // 5x5 square minus the stone itself
        assert_eq!(moves.len(), 24);
        assert!(moves.iter().all(|m| {
            (i32::from(m.row) - 5).abs() <= 2 && (i32::from(m.col) - 5).abs() <= 2
        }));
        assert!(!moves.contains(&Pos::new(5, 5)));
        assert!(!moves.contains(&Pos::new(5, 8)));
        // Discovery order is row by row
        assert_eq!(moves[0], Pos::new(3, 3));
        assert_eq!(moves[23], Pos::new(7, 7));
    }

    #[test]
    fn test_corner_clipped_and_deduplicated() {
        let mut board = Board::new();
        board.place(Pos::new(0, 0), Stone::Black).unwrap();
        board.place(Pos::new(0, 1), Stone::White).unwrap();
        let moves = candidate_moves(&board);
        // Rows 0..=2, cols 0..=3, minus two stones
        assert_eq!(moves.len(), 10);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), moves.len());
        // Cells first reached from the second stone come last
        assert_eq!(moves.last(), Some(&Pos::new(2, 3)));
    }
}
