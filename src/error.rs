//! Error type shared by the board, the rules and the AI engine

use derive_more::Display;

use crate::board::Pos;

/// Errors reported by the core.
///
/// None of these are fatal to the host: every one is returned to the caller
/// as a local, recoverable outcome.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GomokuError {
    /// Malformed board, player or configuration
    #[display("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Coordinates outside the board
    #[display("Position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    /// Stones are never overwritten
    #[display("Cell ({}, {}) is already occupied", pos.row, pos.col)]
    CellOccupied { pos: Pos },

    /// The board is full, there is nothing to search
    #[display("No legal moves left on the board")]
    NoLegalMoves,

    /// Match history could not be read or written
    #[display("Storage error: {reason}")]
    Storage { reason: String },
}

impl GomokuError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        GomokuError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn storage(reason: impl Into<String>) -> Self {
        GomokuError::Storage {
            reason: reason.into(),
        }
    }
}

impl std::error::Error for GomokuError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GomokuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GomokuError::invalid("row 3 has 9 cells, expected 10");
        assert_eq!(err.to_string(), "Invalid input: row 3 has 9 cells, expected 10");

        let err = GomokuError::CellOccupied { pos: Pos::new(2, 7) };
        assert_eq!(err.to_string(), "Cell (2, 7) is already occupied");

        let err = GomokuError::OutOfBounds { row: -1, col: 4 };
        assert_eq!(err.to_string(), "Position (-1, 4) is off the board");

        assert_eq!(GomokuError::NoLegalMoves.to_string(), "No legal moves left on the board");

        let err = GomokuError::storage("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&GomokuError::NoLegalMoves);
    }
}
