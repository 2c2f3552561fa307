use std::fmt;

use serde::{Deserialize, Serialize};

use crate::square::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Upper-case FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

/// A piece type together with its colour, e.g. "black knight".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceKind {
    pub piece_type: PieceType,
    pub color: Color,
}

impl PieceKind {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        PieceKind { piece_type, color }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn to_char(self) -> char {
        let c = self.piece_type.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let upper = c.to_ascii_uppercase();
        PieceType::ALL
            .iter()
            .find(|pt| pt.letter() == upper)
            .map(|&pt| PieceKind::new(pt, color))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.color, self.piece_type)
    }
}

/// State only pawns carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnState {
    pub has_moved: bool,
}

/// The per-type payload of a piece. Only `Pawn` holds mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Pawn(PawnState),
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Variant {
    fn fresh(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => Variant::Pawn(PawnState::default()),
            PieceType::Knight => Variant::Knight,
            PieceType::Bishop => Variant::Bishop,
            PieceType::Rook => Variant::Rook,
            PieceType::Queen => Variant::Queen,
            PieceType::King => Variant::King,
        }
    }

    fn piece_type(&self) -> PieceType {
        match self {
            Variant::Pawn(_) => PieceType::Pawn,
            Variant::Knight => PieceType::Knight,
            Variant::Bishop => PieceType::Bishop,
            Variant::Rook => PieceType::Rook,
            Variant::Queen => PieceType::Queen,
            Variant::King => PieceType::King,
        }
    }
}

/// A piece on the board.
///
/// The kind never changes once built. `generated_moves` holds the legal
/// destinations last computed by the rules collaborator; `None` means they
/// are stale and must be recomputed before use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    variant: Variant,
    #[serde(skip)]
    generated_moves: Option<Vec<Cell>>,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            color,
            variant: Variant::fresh(piece_type),
            generated_moves: None,
        }
    }

    pub fn from_kind(kind: PieceKind) -> Self {
        Piece::new(kind.piece_type, kind.color)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn piece_type(&self) -> PieceType {
        self.variant.piece_type()
    }

    pub fn kind(&self) -> PieceKind {
        PieceKind::new(self.piece_type(), self.color)
    }

    pub fn is_pawn(&self) -> bool {
        matches!(self.variant, Variant::Pawn(_))
    }

    pub fn as_pawn(&self) -> Option<&PawnState> {
        match &self.variant {
            Variant::Pawn(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_pawn_mut(&mut self) -> Option<&mut PawnState> {
        match &mut self.variant {
            Variant::Pawn(state) => Some(state),
            _ => None,
        }
    }

    /// `Some(flag)` for pawns, `None` for every other type.
    pub fn has_moved(&self) -> Option<bool> {
        self.as_pawn().map(|p| p.has_moved)
    }

    /// Records that this piece has moved. Only pawns track it; calling it
    /// again, or on another type, changes nothing.
    pub fn set_has_moved(&mut self) {
        if let Some(pawn) = self.as_pawn_mut() {
            pawn.has_moved = true;
        }
    }

    pub fn generated_moves(&self) -> Option<&[Cell]> {
        self.generated_moves.as_deref()
    }

    pub fn set_generated_moves(&mut self, moves: Vec<Cell>) {
        self.generated_moves = Some(moves);
    }

    pub fn reset_generated_moves(&mut self) {
        self.generated_moves = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters() {
        let bn = PieceKind::new(PieceType::Knight, Color::Black);
        assert_eq!(bn.to_char(), 'n');
        assert_eq!(PieceKind::from_char('n'), Some(bn));
        assert_eq!(
            PieceKind::from_char('Q'),
            Some(PieceKind::new(PieceType::Queen, Color::White))
        );
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }

    #[test]
    fn only_pawns_track_moves() {
        let mut pawn = Piece::new(PieceType::Pawn, Color::White);
        assert_eq!(pawn.has_moved(), Some(false));
        pawn.set_has_moved();
        pawn.set_has_moved();
        assert_eq!(pawn.has_moved(), Some(true));

        let mut rook = Piece::new(PieceType::Rook, Color::Black);
        rook.set_has_moved();
        assert_eq!(rook.has_moved(), None);
        assert_eq!(rook.kind(), PieceKind::new(PieceType::Rook, Color::Black));
    }

    #[test]
    fn generated_moves_start_stale() {
        let mut knight = Piece::new(PieceType::Knight, Color::White);
        assert!(knight.generated_moves().is_none());
        knight.set_generated_moves(vec![Cell::new(2, 2)]);
        assert_eq!(knight.generated_moves(), Some(&[Cell::new(2, 2)][..]));
        knight.reset_generated_moves();
        assert!(knight.generated_moves().is_none());
    }

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::Black.to_string(), "black");
    }
}
