pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod layout;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod square;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::{Board, MoveOutcome, PieceId};
pub use error::BoardError;
pub use game::Game;
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind, PieceType};
pub use square::{Cell, BOARD_SIZE};
