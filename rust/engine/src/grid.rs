use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{GameError, Result};

/// Number of tiles along one side of the board.
pub const GRID_WIDTH: usize = 5;

/// Total number of tiles on the board (5×5).
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_WIDTH;

/// Indices of the tiles holding a mine, fixed for the duration of a round.
pub type MineSet = BTreeSet<usize>;

/// A single tile of the board.
/// `is_mine` is decided when the round starts; `revealed` flips to `true` once.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Whether a mine is hidden under this tile
    pub is_mine: bool,
    /// Whether the tile has been uncovered
    pub revealed: bool,
}

impl Cell {
    /// An uncovered tile without a mine (a "gem").
    pub fn is_gem(&self) -> bool {
        self.revealed && !self.is_mine
    }
}

/// The 25 tiles of one round, stored row-major.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Builds a fully hidden board with mines at the given indices.
    /// Indices outside the board are ignored; callers validate layouts first.
    pub fn from_mines(mines: &MineSet) -> Self {
        let mut cells = [Cell::default(); GRID_SIZE];
        for &index in mines.iter().filter(|&&i| i < GRID_SIZE) {
            cells[index].is_mine = true;
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; GRID_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn validate_index(index: usize) -> Result<usize> {
        if index < GRID_SIZE {
            Ok(index)
        } else {
            Err(GameError::invalid_move("tile index out of range"))
        }
    }

    /// Uncovers one tile and returns it.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidMove`] when the index is off the board or the tile
    /// is already uncovered.
    pub fn reveal(&mut self, index: usize) -> Result<Cell> {
        let index = Self::validate_index(index)?;
        let cell = &mut self.cells[index];
        if cell.revealed {
            return Err(GameError::invalid_move("tile already revealed"));
        }
        cell.revealed = true;
        Ok(*cell)
    }

    /// Uncovers every tile, used when a round ends.
    pub fn reveal_all(&mut self) {
        for cell in &mut self.cells {
            cell.revealed = true;
        }
    }

    pub fn mine_positions(&self) -> MineSet {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_mine)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_mine).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.cells.iter().all(|c| c.revealed)
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|c| !c.revealed)
    }

    /// Indices of the tiles still covered, in ascending order.
    pub fn hidden_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.revealed)
            .map(|(i, _)| i)
    }
}

/// Converts a board index into `(row, col)`.
pub fn index_to_coords(index: usize) -> (usize, usize) {
    (index / GRID_WIDTH, index % GRID_WIDTH)
}

/// Converts `(row, col)` into a board index, `None` when off the board.
pub fn coords_to_index(row: usize, col: usize) -> Option<usize> {
    if row < GRID_WIDTH && col < GRID_WIDTH {
        Some(row * GRID_WIDTH + col)
    } else {
        None
    }
}
