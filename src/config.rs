use crate::error::BoardError;
use crate::layout::Layout;
use crate::square::BOARD_SIZE;

/// How a game starts: the board size and the layout placed on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub layout: Layout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        GameConfig {
            size: BOARD_SIZE,
            layout: Layout::standard(),
        }
    }

    /// A square board sized by the number of rows given. Rows are listed far
    /// side first, using FEN letters and `.` for empty cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        if rows.is_empty() {
            return Err(BoardError::InvalidSize);
        }
        let layout = Layout::from_rows(rows)?;
        layout.check_size(rows.len())?;
        Ok(GameConfig {
            size: rows.len(),
            layout,
        })
    }
}
