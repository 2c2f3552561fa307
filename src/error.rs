use crate::piece::Color;
use crate::square::Cell;

/// Errors raised by the board core and the game driver.
///
/// Configuration errors come from building a board; precondition errors mean
/// the caller asked for something the core refuses to do, and the board is
/// left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    InvalidSize,

    #[error("layout is {found_rows}x{found_cols}, expected {expected}x{expected}")]
    LayoutSize {
        expected: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("invalid layout character: {0:?}")]
    InvalidLayoutChar(char),

    #[error("cell ({file}, {rank}) is off the board")]
    OutOfBounds { file: i64, rank: i64 },

    #[error("no piece on departure cell {0}")]
    EmptyDeparture(Cell),

    #[error("departure and destination are both {0}")]
    SameCell(Cell),

    #[error("piece on {cell} does not belong to {turn}")]
    WrongSide { cell: Cell, turn: Color },

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Cell, to: Cell },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid move notation: {0}")]
    InvalidMove(String),

    #[error("board state is corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cell() {
        let err = BoardError::EmptyDeparture(Cell::new(4, 1));
        assert_eq!(err.to_string(), "no piece on departure cell e2");

        let err = BoardError::OutOfBounds { file: -1, rank: 8 };
        assert_eq!(err.to_string(), "cell (-1, 8) is off the board");
    }

    #[test]
    fn layout_size_message() {
        let err = BoardError::LayoutSize { expected: 8, found_rows: 7, found_cols: 8 };
        assert_eq!(err.to_string(), "layout is 7x8, expected 8x8");
    }
}
