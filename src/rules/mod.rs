//! Game rules: five (or more) in a row wins, a full board without one is a draw

pub mod win;

pub use win::{has_win_through, is_full, outcome, scan_winner, winning_line, Outcome};
