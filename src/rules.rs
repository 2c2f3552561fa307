use crate::board::Board;
use crate::error::BoardError;
use crate::square::Cell;

/// Move generation for a piece, supplied from outside the core.
///
/// Implementations decide everything about legality: geometry, blocking,
/// checks, and whether a piece may land on its own colour.
pub trait MoveRules {
    fn legal_destinations(&self, board: &Board, from: Cell) -> Vec<Cell>;
}

impl<F> MoveRules for F
where
    F: Fn(&Board, Cell) -> Vec<Cell>,
{
    fn legal_destinations(&self, board: &Board, from: Cell) -> Vec<Cell> {
        self(board, from)
    }
}

impl Board {
    /// Legal destinations for the piece on `from`.
    ///
    /// Served from the piece's cache when it is fresh; otherwise `rules` is
    /// asked and the answer is cached until the piece next moves.
    pub fn legal_destinations<R: MoveRules + ?Sized>(
        &mut self,
        from: Cell,
        rules: &R,
    ) -> Result<Vec<Cell>, BoardError> {
        let (file, rank) = from.signed();
        if !self.contains(file, rank) {
            return Err(from.out_of_bounds());
        }
        let cached = self
            .piece_at(from)
            .ok_or(BoardError::EmptyDeparture(from))?
            .generated_moves()
            .map(<[Cell]>::to_vec);
        if let Some(moves) = cached {
            return Ok(moves);
        }

        let moves = rules.legal_destinations(self, from);
        if let Some(piece) = self.piece_at_mut(from) {
            piece.set_generated_moves(moves.clone());
        }
        Ok(moves)
    }
}
