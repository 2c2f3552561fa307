use serde::{Deserialize, Serialize};

use crate::board::{Board, MoveOutcome};
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::moves::Move;
use crate::piece::{Color, PieceKind};
use crate::rules::MoveRules;
use crate::view::BoardView;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub moved: PieceKind,
    pub captured: Option<PieceKind>,
}

/// A board plus the turn that goes with it.
///
/// This is the caller the core expects: it checks that the piece being moved
/// belongs to the side to move (and, with [`Game::play_checked`], asks a
/// rules collaborator for legality) before handing the move to
/// [`Board::apply_move_detailed`], then keeps the returned turn.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current_turn: Color,
    history: Vec<MoveRecord>,
    captured_white: Vec<PieceKind>,
    captured_black: Vec<PieceKind>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::new())
    }

    pub fn with_config(config: &GameConfig) -> Result<Self, BoardError> {
        Ok(Game::from_board(Board::initialize(&config.layout, config.size)?))
    }

    /// Start from an arbitrary position with White to move.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            current_turn: Color::White,
            history: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.current_turn
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Pieces of `color` that have been captured so far.
    pub fn captured(&self, color: Color) -> &[PieceKind] {
        match color {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    pub fn snapshot(&self) -> BoardView {
        let mut view = self.board.snapshot(self.current_turn);
        view.last_move = self.history.last().map(|r| [r.mv.from, r.mv.to]);
        view
    }

    fn check_side_to_move(&self, m: &Move) -> Result<(), BoardError> {
        let from = m.from;
        let (file, rank) = from.signed();
        if !self.board.contains(file, rank) {
            return Err(from.out_of_bounds());
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(BoardError::EmptyDeparture(from))?;
        if piece.color() != self.current_turn {
            return Err(BoardError::WrongSide {
                cell: from,
                turn: self.current_turn,
            });
        }
        Ok(())
    }

    /// Play a move whose legality the caller has already settled.
    pub fn play(&mut self, m: &Move) -> Result<MoveOutcome, BoardError> {
        self.check_side_to_move(m)?;
        let outcome = self.board.apply_move_detailed(m, self.current_turn)?;
        self.current_turn = outcome.next_turn;
        if let Some(captured) = outcome.captured {
            match captured.color {
                Color::White => self.captured_white.push(captured),
                Color::Black => self.captured_black.push(captured),
            }
        }
        self.history.push(MoveRecord {
            mv: *m,
            moved: outcome.moved,
            captured: outcome.captured,
        });
        Ok(outcome)
    }

    /// Play a move only if `rules` lists its destination.
    pub fn play_checked<R: MoveRules + ?Sized>(
        &mut self,
        m: &Move,
        rules: &R,
    ) -> Result<MoveOutcome, BoardError> {
        self.check_side_to_move(m)?;
        let legal = self.board.legal_destinations(m.from, rules)?;
        if !legal.contains(&m.to) {
            return Err(BoardError::IllegalMove { from: m.from, to: m.to });
        }
        self.play(m)
    }

    pub fn play_uci(&mut self, text: &str) -> Result<MoveOutcome, BoardError> {
        let m = Move::from_uci(text)?;
        self.play(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;
    use crate::square::Cell;

    fn sq(s: &str) -> Cell {
        s.parse().unwrap()
    }

    #[test]
    fn threads_the_turn() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::White);
        game.play_uci("e2e4").unwrap();
        assert_eq!(game.turn(), Color::Black);
        game.play_uci("e7e5").unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.history()[0].mv.to_uci(), "e2e4");
    }

    #[test]
    fn rejects_the_wrong_side() {
        let mut game = Game::new();
        assert_eq!(
            game.play_uci("e7e5"),
            Err(BoardError::WrongSide { cell: sq("e7"), turn: Color::White })
        );
        assert_eq!(game.play_uci("e4e5"), Err(BoardError::EmptyDeparture(sq("e4"))));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn far_off_board_departure() {
        let mut game = Game::new();
        let m = Move::new(Cell::new(0, usize::MAX), sq("a3"));
        assert_eq!(
            game.play(&m),
            Err(BoardError::OutOfBounds { file: 0, rank: i64::MAX })
        );
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn records_captures() {
        let mut game = Game::new();
        for uci in ["e2e4", "d7d5", "e4d5"] {
            game.play_uci(uci).unwrap();
        }
        let pawn = PieceKind::new(PieceType::Pawn, Color::Black);
        assert_eq!(game.captured(Color::Black), &[pawn]);
        assert!(game.captured(Color::White).is_empty());
        assert_eq!(game.history()[2].captured, Some(pawn));
        assert_eq!(game.snapshot().last_move, Some([sq("e4"), sq("d5")]));
    }

    #[test]
    fn checked_play_consults_the_rules() {
        let mut game = Game::new();
        let pushes = |board: &Board, from: Cell| {
            from.offset(0, 1, board.size()).into_iter().collect::<Vec<_>>()
        };
        assert_eq!(
            game.play_checked(&Move::from_uci("e2e4").unwrap(), &pushes),
            Err(BoardError::IllegalMove { from: sq("e2"), to: sq("e4") })
        );
        assert_eq!(game.turn(), Color::White);
        game.play_checked(&Move::from_uci("e2e3").unwrap(), &pushes).unwrap();
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn custom_config() {
        let config = GameConfig::from_rows(&["k..", "...", "..K"]).unwrap();
        let mut game = Game::with_config(&config).unwrap();
        game.play_uci("c1b2").unwrap();
        assert_eq!(
            game.board().kind_at(sq("b2")),
            Some(PieceKind::new(PieceType::King, Color::White))
        );
    }
}
