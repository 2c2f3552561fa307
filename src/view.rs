use serde::Serialize;

use crate::board::Board;
use crate::piece::{Color, PieceType};
use crate::square::Cell;

/// What a renderer needs to draw one occupied square.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SquarePiece {
    pub piece_type: PieceType,
    pub color: Color,
    /// Present for pawns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_moved: Option<bool>,
}

/// Read-only picture of a board for presentation layers.
///
/// `squares[rank][file]`, rank 0 first.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub size: usize,
    pub squares: Vec<Vec<Option<SquarePiece>>>,
    pub current_turn: Color,
    pub last_move: Option<[Cell; 2]>,
}

impl Board {
    pub fn snapshot(&self, current_turn: Color) -> BoardView {
        let squares = (0..self.size())
            .map(|rank| {
                (0..self.size())
                    .map(|file| {
                        self.piece_at(Cell::new(file, rank)).map(|p| SquarePiece {
                            piece_type: p.piece_type(),
                            color: p.color(),
                            has_moved: p.has_moved(),
                        })
                    })
                    .collect()
            })
            .collect();
        BoardView {
            size: self.size(),
            squares,
            current_turn,
            last_move: None,
        }
    }
}
