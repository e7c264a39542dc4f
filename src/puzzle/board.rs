//! Board representation and utilities for Sudoku puzzles

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a Sudoku board of side length `size`.
///
/// Cell values: `0` for an empty cell, a positive digit for a given value,
/// and a negative digit for a value tentatively removed during generation
/// (the cell is asserted to NOT hold that digit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub box_size: usize,
    pub cells: Vec<i32>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Result<Self> {
        let box_size = box_size_for(size)?;
        Ok(Self {
            size,
            box_size,
            cells: vec![0; size * size],
        })
    }

    /// Create a board from a 2D array of cell values
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Board cannot be empty");
        }

        let size = rows.len();
        let box_size = box_size_for(size)?;

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                anyhow::bail!("Row {} has length {}, expected {} (board must be square)",
                             i, row.len(), size);
            }
            for (j, &value) in row.iter().enumerate() {
                if value.unsigned_abs() as usize > size {
                    anyhow::bail!("Cell ({}, {}) holds {} which is outside 0..={}",
                                 i, j, value, size);
                }
            }
        }

        let cells: Vec<i32> = rows.into_iter().flatten().collect();

        Ok(Self {
            size,
            box_size,
            cells,
        })
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Get cell value at coordinates (0 if out of bounds)
    pub fn get(&self, row: usize, col: usize) -> i32 {
        if row < self.size && col < self.size {
            self.cells[self.index(row, col)]
        } else {
            0
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: i32) -> Result<()> {
        if row >= self.size || col >= self.size {
            anyhow::bail!("Coordinates ({}, {}) out of bounds for {}x{} board",
                         row, col, self.size, self.size);
        }
        if value.unsigned_abs() as usize > self.size {
            anyhow::bail!("Value {} is outside 0..={}", value, self.size);
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip the sign of a cell, marking a given as tentatively removed
    /// (or restoring a tentatively removed given)
    pub fn negate(&mut self, row: usize, col: usize) -> Result<()> {
        let value = self.get(row, col);
        self.set(row, col, -value)
    }

    /// All non-empty cells as (row, col, value) triples
    pub fn filled_cells(&self) -> Vec<(usize, usize, i32)> {
        let mut filled = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if value != 0 {
                    filled.push((row, col, value));
                }
            }
        }
        filled
    }

    /// Count cells holding a given digit
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    /// Count empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Check if every cell holds a given digit
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v > 0)
    }
}

/// Derive the box side length for a grid size, rejecting non-square sizes
pub fn box_size_for(size: usize) -> Result<usize> {
    let root = (size as f64).sqrt() as usize;
    if size < 4 || root * root != size {
        anyhow::bail!("Grid size {} is not a perfect square of at least 4", size);
    }
    Ok(root)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                let value = self.get(row, col);
                if value == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", value.abs())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
