use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::square::{parse_prefix, Cell};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Move { from, to }
    }

    /// Convert to UCI notation, e.g. "e2e4"
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse from UCI notation
    pub fn from_uci(s: &str) -> Result<Move, BoardError> {
        let invalid = || BoardError::InvalidMove(s.to_string());
        let (from, rest) = parse_prefix(s).ok_or_else(invalid)?;
        let (to, rest) = parse_prefix(rest).ok_or_else(invalid)?;
        if !rest.is_empty() {
            return Err(invalid());
        }
        Ok(Move { from, to })
    }
}
