//! Board module - manages the game grid
//!
//! The board is a square N x N grid where each cell can be empty or hold a tile.
//! Uses a flat array for better cache locality and zero-allocation.
//! Indices are row-major: `index = row * size + col`, row 0 is the top.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::rng::RandomSource;
use crate::types::{
    Cell, Symbol, Tile, MAX_BOARD_SIDE, MAX_CELLS, MIN_BOARD_SIDE, MIN_RUN, SYMBOL_COUNT,
};

/// The game board - N x N cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: ArrayVec<Cell, MAX_CELLS>,
}

impl Board {
    /// Create a new empty board
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        let mut cells = ArrayVec::new();
        for _ in 0..size * size {
            cells.push(None);
        }
        Ok(Self { size, cells })
    }

    /// Fill a board with random symbols such that no run of three exists.
    ///
    /// Each cell is drawn from the symbols that do not complete a run with the two
    /// cells to its left or the two cells above it, so generation never backtracks.
    pub fn generate<R: RandomSource>(
        size: usize,
        alphabet: &[Symbol],
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        check_alphabet(alphabet)?;
        let mut board = Self::empty(size)?;

        for idx in 0..size * size {
            let (row, col) = board.coords(idx);
            let left = (col >= MIN_RUN - 1)
                .then(|| board.pair_symbol(idx - 1, idx - 2))
                .flatten();
            let above = (row >= MIN_RUN - 1)
                .then(|| board.pair_symbol(idx - size, idx - 2 * size))
                .flatten();

            let candidates: ArrayVec<Symbol, SYMBOL_COUNT> = alphabet
                .iter()
                .copied()
                .filter(|&s| Some(s) != left && Some(s) != above)
                .take(SYMBOL_COUNT)
                .collect();
            let pick = rng.next_range(candidates.len() as u32) as usize;
            board.cells[idx] = Some(Tile::new(candidates[pick]));
        }

        Ok(board)
    }

    /// Build a board from a full row-major list of symbols
    pub fn from_symbols(size: usize, symbols: &[Symbol]) -> Result<Self, BoardError> {
        check_size(size)?;
        if symbols.len() != size * size {
            return Err(BoardError::CellCount {
                expected: size * size,
                actual: symbols.len(),
            });
        }
        Ok(Self {
            size,
            cells: symbols.iter().map(|&s| Some(Tile::new(s))).collect(),
        })
    }

    /// Build a board from raw cells (empty cells allowed)
    pub fn from_cells(size: usize, cells: &[Cell]) -> Result<Self, BoardError> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(BoardError::CellCount {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self {
            size,
            cells: cells.iter().copied().collect(),
        })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the board
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    /// (row, col) of a flat index
    #[inline(always)]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.size, idx % self.size)
    }

    /// Get cell at index
    /// Returns None if out of bounds
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }

    /// Symbol at index, if in bounds and occupied
    pub fn symbol(&self, idx: usize) -> Option<Symbol> {
        self.get(idx).flatten().map(|t| t.symbol)
    }

    /// Set cell at index
    /// Returns false if out of bounds
    pub fn set(&mut self, idx: usize, cell: Cell) -> bool {
        match self.cells.get_mut(idx) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells. No legality check is made.
    /// Returns false (and changes nothing) if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.cells.len() || b >= self.cells.len() {
            return false;
        }
        self.cells.swap(a, b);
        true
    }

    /// True iff `a` and `b` are orthogonal neighbours on a `size` x `size` grid.
    /// Diagonals and wraparound are not adjacent.
    pub fn is_adjacent(a: usize, b: usize, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        let (row_a, col_a) = (a / size, a % size);
        let (row_b, col_b) = (b / size, b % size);
        (row_a.abs_diff(row_b) == 1 && col_a == col_b)
            || (col_a.abs_diff(col_b) == 1 && row_a == row_b)
    }

    /// Adjacency on this board (both indices must also be in bounds)
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        a < self.len() && b < self.len() && Self::is_adjacent(a, b, self.size)
    }

    /// Check that every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Clear a single cell, returning the tile that was there
    pub fn clear_cell(&mut self, idx: usize) -> Cell {
        self.cells.get_mut(idx).and_then(|c| c.take())
    }

    /// Compact each column downward, keeping relative order.
    /// Vacated cells end up at the top. Returns how many tiles moved.
    pub fn apply_gravity(&mut self) -> usize {
        let size = self.size;
        let mut moved = 0;
        for col in 0..size {
            let mut write_row = size;
            for read_row in (0..size).rev() {
                let read = read_row * size + col;
                if self.cells[read].is_none() {
                    continue;
                }
                write_row -= 1;
                if write_row != read_row {
                    let write = write_row * size + col;
                    self.cells[write] = self.cells[read].take();
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Fill every empty cell with a random symbol from `alphabet`.
    /// Columns are filled left to right, each from its lowest empty cell upward.
    /// Returns the number of cells filled.
    pub fn refill<R: RandomSource>(&mut self, alphabet: &[Symbol], rng: &mut R) -> usize {
        if alphabet.is_empty() {
            return 0;
        }
        let size = self.size;
        let mut filled = 0;
        for col in 0..size {
            for row in (0..size).rev() {
                let idx = row * size + col;
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(Tile::new(rng.pick_symbol(alphabet)));
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Symbols of all occupied cells, in index order
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cells.iter().flatten().map(|t| t.symbol).collect()
    }

    /// Wildcard registry view: index -> symbol of every wildcard tile
    pub fn special_tiles(&self) -> BTreeMap<usize, Symbol> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| match cell {
                Some(tile) if tile.wildcard => Some((idx, tile.symbol)),
                _ => None,
            })
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cells (used by shuffles, which only permute)
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Symbol shared by two cells, if both hold the same one
    fn pair_symbol(&self, a: usize, b: usize) -> Option<Symbol> {
        match (self.symbol(a), self.symbol(b)) {
            (Some(x), Some(y)) if x == y => Some(x),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                match cell {
                    Some(tile) => f.write_str(tile.symbol.glyph())?,
                    None => f.write_str("··")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize(size))
    }
}

/// At least three distinct symbols guarantee a candidate always survives the
/// left/above exclusions during generation.
pub(crate) fn check_alphabet(alphabet: &[Symbol]) -> Result<(), BoardError> {
    let distinct = Symbol::ALL
        .iter()
        .filter(|s| alphabet.contains(s))
        .count();
    if distinct < MIN_RUN {
        return Err(BoardError::AlphabetTooSmall(distinct));
    }
    Ok(())
}
