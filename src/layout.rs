use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::piece::PieceKind;
use crate::square::Cell;

/// Standard starting position, far side (rank 8) first.
pub const STANDARD_ROWS: [&str; 8] = [
    "rnbqkbnr",
    "pppppppp",
    "........",
    "........",
    "........",
    "........",
    "PPPPPPPP",
    "RNBQKBNR",
];

/// A table of starting kinds, one row per rank.
///
/// Row 0 is the far side (the highest rank), the last row is the near side
/// (rank 0). Within a row, index 0 is the `a` file. `None` marks an empty
/// cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    rows: Vec<Vec<Option<PieceKind>>>,
}

impl Layout {
    pub fn new(rows: Vec<Vec<Option<PieceKind>>>) -> Self {
        Layout { rows }
    }

    pub fn standard() -> Self {
        Layout::from_rows(&STANDARD_ROWS)
            .unwrap_or_else(|_| unreachable!("standard layout only uses FEN letters"))
    }

    /// Parse rows of FEN letters with `.` for an empty cell.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '.' => Ok(None),
                        c => PieceKind::from_char(c)
                            .map(Some)
                            .ok_or(BoardError::InvalidLayoutChar(c)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layout { rows })
    }

    /// Fails unless the table is exactly `size` rows of `size` entries.
    pub fn check_size(&self, size: usize) -> Result<(), BoardError> {
        let found_rows = self.rows.len();
        let bad_row = self.rows.iter().find(|row| row.len() != size);
        if found_rows != size || bad_row.is_some() {
            return Err(BoardError::LayoutSize {
                expected: size,
                found_rows,
                found_cols: bad_row.or(self.rows.first()).map_or(0, Vec::len),
            });
        }
        Ok(())
    }

    /// The starting kind for `cell`, with the far-side-first row order
    /// mapped onto ranks. Only meaningful once `check_size` has passed.
    pub fn kind_at(&self, cell: Cell) -> Option<PieceKind> {
        let size = self.rows.len();
        if cell.rank >= size {
            return None;
        }
        self.rows[size - 1 - cell.rank].get(cell.file).copied().flatten()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, PieceType};

    #[test]
    fn standard_orientation() {
        let layout = Layout::standard();
        assert!(layout.check_size(8).is_ok());
        assert_eq!(
            layout.kind_at(Cell::new(4, 0)),
            Some(PieceKind::new(PieceType::King, Color::White))
        );
        assert_eq!(
            layout.kind_at(Cell::new(3, 7)),
            Some(PieceKind::new(PieceType::Queen, Color::Black))
        );
        assert_eq!(
            layout.kind_at(Cell::new(4, 1)),
            Some(PieceKind::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(layout.kind_at(Cell::new(4, 3)), None);
    }

    #[test]
    fn rejects_unknown_letters() {
        assert_eq!(
            Layout::from_rows(&["k.", ".x"]),
            Err(BoardError::InvalidLayoutChar('x'))
        );
    }

    #[test]
    fn size_mismatch() {
        let layout = Layout::from_rows(&["k..", "...", "..K"]).unwrap();
        assert!(layout.check_size(3).is_ok());
        assert_eq!(
            layout.check_size(8),
            Err(BoardError::LayoutSize { expected: 8, found_rows: 3, found_cols: 3 })
        );

        let ragged = Layout::from_rows(&["k..", "..", "..K"]).unwrap();
        assert_eq!(
            ragged.check_size(3),
            Err(BoardError::LayoutSize { expected: 3, found_rows: 3, found_cols: 2 })
        );
    }
}
