use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Number of files and ranks on a standard board.
pub const BOARD_SIZE: usize = 8;

/// A `(file, rank)` address on the board.
///
/// File 0 is the `a` file, rank 0 is White's back rank (algebraic rank 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub file: usize,
    pub rank: usize,
}

/// True iff `0 <= file < size` and `0 <= rank < size`.
#[inline]
pub fn in_bounds_for(file: i64, rank: i64, size: usize) -> bool {
    let size = saturating_i64(size);
    file >= 0 && rank >= 0 && file < size && rank < size
}

#[inline]
fn saturating_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl Cell {
    pub const fn new(file: usize, rank: usize) -> Self {
        Cell { file, rank }
    }

    /// Builds a cell from signed coordinates, rejecting anything off a
    /// `size`-wide board.
    pub fn checked(file: i64, rank: i64, size: usize) -> Result<Self, BoardError> {
        if in_bounds_for(file, rank, size) {
            Ok(Cell::new(file as usize, rank as usize))
        } else {
            Err(BoardError::OutOfBounds { file, rank })
        }
    }

    /// The cell `(file + df, rank + dr)` if it stays on a `size`-wide board.
    pub fn offset(self, df: i64, dr: i64, size: usize) -> Option<Cell> {
        let (file, rank) = self.signed();
        Cell::checked(file.checked_add(df)?, rank.checked_add(dr)?, size).ok()
    }

    /// Coordinates as signed integers, saturating at `i64::MAX`.
    pub fn signed(self) -> (i64, i64) {
        (saturating_i64(self.file), saturating_i64(self.rank))
    }

    pub(crate) fn out_of_bounds(self) -> BoardError {
        let (file, rank) = self.signed();
        BoardError::OutOfBounds { file, rank }
    }

    /// Row-major index into a `size`-wide dense grid.
    #[inline]
    pub(crate) fn index(self, size: usize) -> usize {
        self.rank * size + self.file
    }

    /// Parse algebraic notation such as `"e4"`. Ranks may have more than one
    /// digit (`"a10"`) for boards larger than 9×9.
    pub fn from_algebraic(s: &str) -> Result<Self, BoardError> {
        let (cell, rest) = parse_prefix(s).ok_or_else(|| BoardError::InvalidSquare(s.to_string()))?;
        if !rest.is_empty() {
            return Err(BoardError::InvalidSquare(s.to_string()));
        }
        Ok(cell)
    }
}

/// Reads one `<letter><digits>` square from the front of `s` and returns it
/// with the unread remainder.
pub(crate) fn parse_prefix(s: &str) -> Option<(Cell, &str)> {
    let bytes = s.as_bytes();
    let letter = *bytes.first()?;
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rank: usize = s[1..1 + digits].parse().ok()?;
    if rank == 0 {
        return None;
    }
    let cell = Cell::new((letter - b'a') as usize, rank - 1);
    Some((cell, &s[1 + digits..]))
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file < 26 {
            write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

impl FromStr for Cell {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cell::from_algebraic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_names() {
        assert_eq!(Cell::new(4, 1).to_string(), "e2");
        assert_eq!(Cell::new(0, 0).to_string(), "a1");
        assert_eq!(Cell::new(7, 7).to_string(), "h8");
        assert_eq!("e4".parse::<Cell>().unwrap(), Cell::new(4, 3));
        assert_eq!(Cell::from_algebraic("a10").unwrap(), Cell::new(0, 9));
    }

    #[test]
    fn rejects_malformed_squares() {
        for bad in ["", "e", "4e", "E4", "e0", "e4x", "-1"] {
            assert!(
                matches!(Cell::from_algebraic(bad), Err(BoardError::InvalidSquare(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn bounds_for_any_size() {
        assert!(in_bounds_for(0, 0, 8));
        assert!(in_bounds_for(7, 7, 8));
        assert!(!in_bounds_for(8, 0, 8));
        assert!(!in_bounds_for(0, -1, 8));
        assert!(in_bounds_for(4, 4, 5));
        assert!(!in_bounds_for(5, 4, 5));
        assert!(!in_bounds_for(0, 0, 0));
    }

    #[test]
    fn offset_stays_on_board() {
        let e2 = Cell::new(4, 1);
        assert_eq!(e2.offset(0, 2, BOARD_SIZE), Some(Cell::new(4, 3)));
        assert_eq!(e2.offset(0, -2, BOARD_SIZE), None);
        assert_eq!(Cell::new(7, 7).offset(1, 0, BOARD_SIZE), None);
        assert_eq!(
            Cell::checked(-1, 3, BOARD_SIZE),
            Err(BoardError::OutOfBounds { file: -1, rank: 3 })
        );
    }

    #[test]
    fn extreme_coordinates_do_not_wrap() {
        let far = Cell::new(usize::MAX, 0);
        assert_eq!(far.signed(), (i64::MAX, 0));
        assert_eq!(far.out_of_bounds(), BoardError::OutOfBounds { file: i64::MAX, rank: 0 });
        assert_eq!(far.offset(1, 0, BOARD_SIZE), None);
        assert_eq!(Cell::new(3, 3).offset(i64::MIN, 0, BOARD_SIZE), None);
        assert_eq!(Cell::new(3, 3).offset(0, i64::MAX, BOARD_SIZE), None);
        assert!(in_bounds_for(5, 5, usize::MAX));
    }
}
