//! Decoded puzzle grids
//!
//! A [`FilledGrid`] is the readable counterpart of a solver model: one
//! letter-domain value per cell, row-major. The constraint core never
//! touches this type; it exists so solutions can be displayed, exported,
//! and re-validated.

use crate::puzzle::letters::{index_letter, DOMAIN_SIZE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully decoded N×N puzzle grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilledGrid {
    pub size: usize,
    /// Letter-domain values (0 = blank, 1..=26 = 'a'..='z'), row-major.
    pub values: Vec<usize>,
}

impl FilledGrid {
    /// Create an all-blank grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0; size * size],
        }
    }

    /// Create a grid from flat letter-domain values.
    pub fn from_values(size: usize, values: Vec<usize>) -> Result<Self> {
        if values.len() != size * size {
            anyhow::bail!(
                "expected {} cell values for a {}x{} grid, got {}",
                size * size,
                size,
                size,
                values.len()
            );
        }
        if let Some(v) = values.iter().find(|&&v| v >= DOMAIN_SIZE) {
            anyhow::bail!("cell value {} is outside the letter domain", v);
        }
        Ok(Self { size, values })
    }

    /// Flat index of a cell.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Letter-domain value at a cell.
    pub fn value(&self, row: usize, col: usize) -> usize {
        self.values[self.index(row, col)]
    }

    /// Decoded character at a cell (blank marker for empty cells).
    pub fn letter(&self, row: usize, col: usize) -> char {
        index_letter(self.value(row, col))
    }

    /// Set a cell to a letter-domain value.
    pub fn set(&mut self, row: usize, col: usize, value: usize) -> Result<()> {
        if row >= self.size || col >= self.size {
            anyhow::bail!(
                "coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                col,
                self.size,
                self.size
            );
        }
        if value >= DOMAIN_SIZE {
            anyhow::bail!("cell value {} is outside the letter domain", value);
        }
        let idx = self.index(row, col);
        self.values[idx] = value;
        Ok(())
    }

    /// Letter-domain values of one row, in column order.
    pub fn row_values(&self, row: usize) -> Vec<usize> {
        (0..self.size).map(|col| self.value(row, col)).collect()
    }

    /// Letter-domain values of one column, in row order.
    pub fn column_values(&self, col: usize) -> Vec<usize> {
        (0..self.size).map(|row| self.value(row, col)).collect()
    }

    /// One row rendered with the blank marker, e.g. `"#cat#"`.
    pub fn row_string(&self, row: usize) -> String {
        (0..self.size).map(|col| self.letter(row, col)).collect()
    }

    /// One column rendered with the blank marker.
    pub fn column_string(&self, col: usize) -> String {
        (0..self.size).map(|row| self.letter(row, col)).collect()
    }

    /// Number of cells holding an actual letter.
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Number of blank cells.
    pub fn blank_count(&self) -> usize {
        self.values.len() - self.filled_count()
    }
}

impl fmt::Display for FilledGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let v = self.value(row, col);
                if v == 0 {
                    write!(f, "·")?;
                } else {
                    write!(f, "{}", index_letter(v))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
