use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::layout::Layout;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::{in_bounds_for, Cell, BOARD_SIZE};

/// Identity of a piece placed on a board.
///
/// Arena slots are recycled, but each reuse bumps the slot's generation, so
/// an id taken before a piece was removed no longer resolves afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId {
    index: usize,
    generation: u32,
}

impl PieceId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// What a single `apply_move` did, for callers that want more than the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub next_turn: Color,
    pub moved: PieceKind,
    pub captured: Option<PieceKind>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    piece: Option<Piece>,
}

/// The authoritative grid.
///
/// Cells hold ids into `arena`, which owns every piece on the board. Each
/// live arena entry is referenced by exactly one cell; capture frees the
/// entry and puts its slot on the free list.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Option<PieceId>>,
    arena: Vec<Slot>,
    #[serde(skip)]
    free: Vec<usize>,
}

/// Deserialised fields, checked before they become a `Board`.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Option<PieceId>>,
    arena: Vec<Slot>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.size == 0 {
            return Err(BoardError::InvalidSize);
        }
        let free = raw
            .arena
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.piece.is_none())
            .map(|(index, _)| index)
            .collect();
        let board = Board {
            size: raw.size,
            cells: raw.cells,
            arena: raw.arena,
            free,
        };
        board.check_invariants()?;
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }
        Ok(Board {
            size,
            cells: vec![None; size * size],
            arena: Vec::new(),
            free: Vec::new(),
        })
    }

    /// Build a board whose occupancy mirrors `layout`.
    pub fn initialize(layout: &Layout, size: usize) -> Result<Self, BoardError> {
        let mut board = Board::empty(size)?;
        layout.check_size(size)?;
        for cell in board.all_cells().collect::<Vec<_>>() {
            if let Some(kind) = layout.kind_at(cell) {
                board.place(Piece::from_kind(kind), cell)?;
            }
        }
        Ok(board)
    }

    /// The standard chess starting position.
    pub fn new() -> Self {
        Board::initialize(&Layout::standard(), BOARD_SIZE)
            .unwrap_or_else(|_| unreachable!("standard layout is 8x8"))
    }

    /// Whether `(file, rank)` lies on a standard board.
    pub fn is_in_bounds(file: i64, rank: i64) -> bool {
        in_bounds_for(file, rank, BOARD_SIZE)
    }

    /// Whether `(file, rank)` lies on this board, whatever its size.
    pub fn contains(&self, file: i64, rank: i64) -> bool {
        in_bounds_for(file, rank, self.size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Every cell, rank 0 first, files left to right.
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |rank| (0..size).map(move |file| Cell::new(file, rank)))
    }

    fn slot(&self, cell: Cell) -> Result<usize, BoardError> {
        if cell.file < self.size && cell.rank < self.size {
            Ok(cell.index(self.size))
        } else {
            Err(cell.out_of_bounds())
        }
    }

    /// Take the piece out of the arena and recycle its slot.
    fn release(&mut self, id: PieceId) -> Option<Piece> {
        let slot = self.arena.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let piece = slot.piece.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(piece)
    }

    /// Put `piece` on `cell`. Whatever the cell held before is discarded, so
    /// callers that want to keep it must `remove` it first.
    pub fn place(&mut self, piece: Piece, cell: Cell) -> Result<PieceId, BoardError> {
        let slot = self.slot(cell)?;
        if let Some(old) = self.cells[slot].take() {
            self.release(old);
        }
        let id = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.arena[index];
                entry.piece = Some(piece);
                PieceId { index, generation: entry.generation }
            }
            None => {
                self.arena.push(Slot { generation: 0, piece: Some(piece) });
                PieceId { index: self.arena.len() - 1, generation: 0 }
            }
        };
        self.cells[slot] = Some(id);
        Ok(id)
    }

    /// Empty `cell`, returning what was on it. Removing from an empty cell
    /// is fine and returns `None`.
    pub fn remove(&mut self, cell: Cell) -> Result<Option<Piece>, BoardError> {
        let slot = self.slot(cell)?;
        let old = self.cells[slot].take();
        Ok(old.and_then(|id| self.release(id)))
    }

    pub fn piece_id_at(&self, cell: Cell) -> Option<PieceId> {
        self.slot(cell).ok().and_then(|slot| self.cells[slot])
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.piece.as_ref())
    }

    fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.arena
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.piece.as_mut())
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.piece_id_at(cell).and_then(|id| self.piece(id))
    }

    pub fn piece_at_mut(&mut self, cell: Cell) -> Option<&mut Piece> {
        let id = self.piece_id_at(cell)?;
        self.piece_mut(id)
    }

    pub fn kind_at(&self, cell: Cell) -> Option<PieceKind> {
        self.piece_at(cell).map(Piece::kind)
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.piece_id_at(cell).is_none()
    }

    /// Occupied cells with their pieces, rank 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, &Piece)> + '_ {
        self.all_cells()
            .filter_map(move |cell| self.piece_at(cell).map(|p| (cell, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn find(&self, kind: PieceKind) -> Vec<Cell> {
        self.pieces()
            .filter(|(_, p)| p.kind() == kind)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// The current occupancy as a layout table, far side first.
    pub fn to_layout(&self) -> Layout {
        let rows = (0..self.size)
            .rev()
            .map(|rank| {
                (0..self.size)
                    .map(|file| self.kind_at(Cell::new(file, rank)))
                    .collect()
            })
            .collect();
        Layout::new(rows)
    }

    /// Verify that every cell points at a live piece, every live piece sits
    /// on exactly one cell, and the free list only names empty slots.
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        if self.size.checked_mul(self.size) != Some(self.cells.len()) {
            return Err(BoardError::Corrupt(format!(
                "{} cells on a {}x{} board",
                self.cells.len(),
                self.size,
                self.size
            )));
        }
        let mut seen = vec![false; self.arena.len()];
        for cell in self.all_cells() {
            let Some(id) = self.cells[cell.index(self.size)] else {
                continue;
            };
            if self.piece(id).is_none() {
                return Err(BoardError::Corrupt(format!("{cell} points at a freed piece")));
            }
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(BoardError::Corrupt(format!("piece {} is on two cells", id.index())));
            }
        }
        if let Some(orphan) = self
            .arena
            .iter()
            .zip(&seen)
            .position(|(slot, &seen)| slot.piece.is_some() && !seen)
        {
            return Err(BoardError::Corrupt(format!("piece {orphan} is on no cell")));
        }
        if let Some(&bad) = self
            .free
            .iter()
            .find(|&&index| self.arena.get(index).map_or(true, |slot| slot.piece.is_some()))
        {
            return Err(BoardError::Corrupt(format!("free slot {bad} is not empty")));
        }
        Ok(())
    }

    /// Apply an authorised move and return whose turn it is next.
    ///
    /// Legality is the caller's business: the destination is cleared
    /// unconditionally, whatever colour stands there, and the side to move
    /// is not checked against the moving piece. The board is left unchanged
    /// when an error is returned.
    pub fn apply_move(&mut self, m: &Move, turn: Color) -> Result<Color, BoardError> {
        self.apply_move_detailed(m, turn).map(|outcome| outcome.next_turn)
    }

    /// Same as [`Board::apply_move`], also reporting the moved and captured kinds.
    pub fn apply_move_detailed(&mut self, m: &Move, turn: Color) -> Result<MoveOutcome, BoardError> {
        let from = self.slot(m.from)?;
        let to = self.slot(m.to)?;
        if from == to {
            return Err(BoardError::SameCell(m.from));
        }
        let id = self.cells[from].ok_or(BoardError::EmptyDeparture(m.from))?;
        let piece = self
            .piece_mut(id)
            .ok_or_else(|| BoardError::Corrupt(format!("{} points at a freed piece", m.from)))?;
        let moved = piece.kind();

        if piece.is_pawn() {
            piece.set_has_moved();
        }

        // Capture: the occupant is dropped for good.
        let captured = self.remove(m.to)?.map(|p| p.kind());

        self.cells[to] = Some(id);
        self.cells[from] = None;

        if let Some(piece) = self.piece_mut(id) {
            piece.reset_generated_moves();
        }

        Ok(MoveOutcome {
            next_turn: turn.opposite(),
            moved,
            captured,
        })
    }
}
