use super::*;
use crate::error::GomokuError;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_symbols() {
    for stone in [Stone::Empty, Stone::Black, Stone::White] {
        assert_eq!(Stone::from_symbol(stone.symbol()), Some(stone));
    }
    assert_eq!(Stone::from_symbol('B'), Some(Stone::Black));
    assert_eq!(Stone::from_symbol('w'), Some(Stone::White));
    assert_eq!(Stone::from_symbol('?'), None);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_manhattan() {
    assert_eq!(Pos::new(5, 5).manhattan(Pos::new(5, 5)), 0);
    assert_eq!(Pos::new(0, 0).manhattan(Pos::new(5, 5)), 10);
    assert_eq!(Pos::new(9, 2).manhattan(Pos::new(5, 5)), 7);
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.size(), BOARD_SIZE);
    assert!(board.is_board_empty());
    assert!(!board.is_full());
    assert_eq!(board.center(), Pos::new(5, 5));
    assert_eq!(board.occupied().count(), 0);
}

#[test]
fn test_place_is_append_only() {
    let mut board = Board::new();
    board.place(Pos::new(3, 4), Stone::Black).unwrap();
    assert_eq!(board.get(Pos::new(3, 4)), Stone::Black);
    assert_eq!(board.stone_count(), 1);

    let err = board.place(Pos::new(3, 4), Stone::White).unwrap_err();
    assert_eq!(err, GomokuError::CellOccupied { pos: Pos::new(3, 4) });
    assert_eq!(board.get(Pos::new(3, 4)), Stone::Black);

    assert!(matches!(
        board.place(Pos::new(0, 0), Stone::Empty),
        Err(GomokuError::InvalidInput { .. })
    ));
    assert!(matches!(
        board.place(Pos::new(10, 0), Stone::Black),
        Err(GomokuError::OutOfBounds { row: 10, col: 0 })
    ));
}

#[test]
fn test_contains_and_get_at() {
    let board = Board::new();
    assert!(board.contains(0, 0));
    assert!(board.contains(9, 9));
    assert!(!board.contains(-1, 0));
    assert!(!board.contains(0, 10));
    assert_eq!(board.get_at(9, 9), Some(Stone::Empty));
    assert_eq!(board.get_at(10, 9), None);
}

#[test]
fn test_from_rows_round_trip() {
    let rows = [
        "X.........",
        ".O........",
        "..........",
        "..........",
        "....XO....",
        "..........",
        "..........",
        "..........",
        "..........",
        ".........X",
    ];
    let board = Board::from_rows(&rows).unwrap();
    assert_eq!(board.stone_count(), 5);
    assert_eq!(board.get(Pos::new(4, 5)), Stone::White);
    assert_eq!(board.get(Pos::new(9, 9)), Stone::Black);
    assert_eq!(board.rows(), rows.iter().map(|r| r.to_string()).collect::<Vec<_>>());
    assert_eq!(board.to_string().lines().count(), 10);
}

#[test]
fn test_from_rows_ignores_whitespace() {
    let board = Board::from_rows(&["X . .", ". O .", ". . ."]).unwrap();
    assert_eq!(board.size(), 3);
    assert_eq!(board.get(Pos::new(0, 0)), Stone::Black);
    assert_eq!(board.get(Pos::new(1, 1)), Stone::White);
}

#[test]
fn test_from_rows_rejects_malformed() {
    assert!(matches!(
        Board::from_rows::<&str>(&[]),
        Err(GomokuError::InvalidInput { .. })
    ));
    // Short row
    assert!(matches!(
        Board::from_rows(&["...", "..", "..."]),
        Err(GomokuError::InvalidInput { .. })
    ));
    // Long row
    assert!(matches!(
        Board::from_rows(&["...", "....", "..."]),
        Err(GomokuError::InvalidInput { .. })
    ));
    // Unknown cell value
    assert!(matches!(
        Board::from_rows(&["...", ".Z.", "..."]),
        Err(GomokuError::InvalidInput { .. })
    ));
}

#[test]
fn test_full_board() {
    let mut board = Board::with_size(3).unwrap();
    let positions: Vec<Pos> = board.positions().collect();
    assert_eq!(positions.len(), 9);
    for (i, pos) in positions.into_iter().enumerate() {
        let stone = if i % 2 == 0 { Stone::Black } else { Stone::White };
        board.place(pos, stone).unwrap();
    }
    assert!(board.is_full());
    assert_eq!(board.occupied().count(), 9);
}

#[test]
fn test_set_restores_count() {
    let mut board = Board::new();
    let prior = board.set(Pos::new(2, 2), Stone::White);
    assert_eq!(prior, Stone::Empty);
    assert_eq!(board.stone_count(), 1);
    let prior = board.set(Pos::new(2, 2), Stone::Empty);
    assert_eq!(prior, Stone::White);
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_with_size_bounds() {
    assert!(matches!(Board::with_size(0), Err(GomokuError::InvalidInput { .. })));
    assert!(matches!(Board::with_size(256), Err(GomokuError::InvalidInput { .. })));
    assert!(matches!(Board::with_size(300), Err(GomokuError::InvalidInput { .. })));

    // Largest board still addresses every cell exactly once
    let board = Board::with_size(MAX_BOARD_SIZE).unwrap();
    assert_eq!(board.size(), 255);
    let last = board.positions().last().unwrap();
    assert_eq!(last, Pos::new(254, 254));
    assert_eq!(board.positions().count(), 255 * 255);
    assert_eq!(board.get_at(255, 0), None);
}
