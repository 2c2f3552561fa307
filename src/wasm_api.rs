use crate::game::Game as CoreGame;
use crate::moves::Move;
use crate::piece::Color;
use crate::square::Cell;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<crate::view::BoardView>,
    error: Option<String>,
}

#[derive(Serialize)]
struct CapturedJson {
    white: Vec<String>,
    black: Vec<String>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn rejected(reason: String) -> JsValue {
    console::warn_1(&JsValue::from_str(&reason));
    to_js(&MoveResult {
        board_state: None,
        error: Some(reason),
    })
}

#[wasm_bindgen]
pub struct Game {
    game: CoreGame,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            game: CoreGame::new(),
        }
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&self.game.snapshot())
    }

    pub fn current_turn(&self) -> String {
        self.game.turn().to_string()
    }

    pub fn make_move(
        &mut self,
        from_file: usize,
        from_rank: usize,
        to_file: usize,
        to_rank: usize,
    ) -> JsValue {
        let m = Move::new(Cell::new(from_file, from_rank), Cell::new(to_file, to_rank));
        match self.game.play(&m) {
            Ok(_) => to_js(&MoveResult {
                board_state: Some(self.game.snapshot()),
                error: None,
            }),
            Err(err) => rejected(err.to_string()),
        }
    }

    pub fn make_uci_move(&mut self, uci: &str) -> JsValue {
        match self.game.play_uci(uci) {
            Ok(_) => to_js(&MoveResult {
                board_state: Some(self.game.snapshot()),
                error: None,
            }),
            Err(err) => rejected(err.to_string()),
        }
    }

    /// Destinations the rules layer last cached for the piece on this
    /// square, or `null` when they are stale or the square is empty.
    pub fn get_cached_moves_for_square(&self, file: usize, rank: usize) -> JsValue {
        let cached = self
            .game
            .board()
            .piece_at(Cell::new(file, rank))
            .and_then(|p| p.generated_moves())
            .map(|cells| cells.iter().map(|c| [c.file, c.rank]).collect::<Vec<_>>());
        match cached {
            Some(cells) => to_js(&cells),
            None => JsValue::NULL,
        }
    }

    pub fn get_captured(&self) -> JsValue {
        let names = |color: Color| -> Vec<String> {
            self.game
                .captured(color)
                .iter()
                .map(|k| format!("{:?}", k.piece_type))
                .collect()
        };
        to_js(&CapturedJson {
            white: names(Color::White),
            black: names(Color::Black),
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
